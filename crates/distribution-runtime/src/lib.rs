//! Distribution Runtime - configuration, logging and event publishing for
//! the distribution core.
//!
//! This crate provides:
//! - Layered configuration loading (`ConfigLoader`, `DistributionConfig`)
//! - Logging setup (`LoggingBuilder`, `logging::init_from_config`)
//! - Configured event publishing (`EventEmitter`)
//!
//! ```rust,ignore
//! use distribution_runtime::{EventEmitter, config::load_config, logging};
//!
//! let config = load_config()?;
//! logging::init_from_config(&config.logging)?;
//!
//! let emitter = EventEmitter::new(admin, config.events);
//! emitter.emit(&event, EventTopic::PackageQueued, Some(enqueued_at));
//! ```

pub mod config;
pub mod emitter;
pub mod error;
pub mod logging;

// Re-exports
pub use config::{
    ConfigError, ConfigLoader, ConfigResult, DistributionConfig, EventsConfig, LoggingConfig,
};
pub use emitter::EventEmitter;
pub use error::LoggingError;
pub use logging::{LoggingBuilder, SpanEvents};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Logging macros and the `Level` type.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
