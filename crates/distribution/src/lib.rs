//! # Distribution
//!
//! Type-safe API for a content-distribution subsystem.
//!
//! ## Overview
//!
//! Modules that cooperate to move content between instances exchange three
//! kinds of data, all modelled here:
//!
//! - **Operation contexts**: per-operation keyed containers whose keys carry
//!   the type of their value ([`core::OperationContext`], [`core::ContextKey`])
//! - **Requests and responses**: what to distribute and how it went
//! - **Events**: lifecycle notifications marshalled to a flat property map for
//!   an external event bus ([`core::DistributionEvent`], [`core::GenericEvent`])
//!
//! The runtime layer adds configuration, logging and a configured publisher
//! ([`runtime::EventEmitter`]).
//!
//! ```text
//! ┌────────────┐  distribute()  ┌─────────────┐  DistributionEvent  ┌──────────────┐  GenericEvent  ┌────────────┐
//! │   Caller   │───────────────▶│ Distributor │────────────────────▶│ EventEmitter │───────────────▶│ EventAdmin │
//! └────────────┘                └─────────────┘                     └──────────────┘                └────────────┘
//!        │      OperationContext        │
//!        └──────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use distribution::prelude::*;
//!
//! const AGENT_QUEUE: ContextKey<String> = ContextKey::new("agentQueue");
//!
//! let config = load_config()?;
//! logging::init_from_config(&config.logging)?;
//!
//! let mut ctx = OperationContext::new();
//! ctx.put(&AGENT_QUEUE, "main".to_string());
//!
//! let request = SimpleDistributionRequest::new(DistributionRequestType::Add, ["/content/site"]);
//! let response = distributor.distribute("publish", &request, &mut ctx);
//!
//! let emitter = EventEmitter::new(admin, config.events);
//! emitter.emit(
//!     &DistributionEvent::new("pkg-1", "publish", "agent", "ADD").with_paths(request.paths()),
//!     EventTopic::PackageQueued,
//!     Some(std::time::SystemTime::now()),
//! );
//! ```
//!
//! ## Features
//!
//! - `toml-config`: TOML configuration files (default)
//! - `yaml-config`: YAML configuration files
//! - `json-log`: JSON log output

pub use distribution_core as core;
pub use distribution_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use distribution::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use distribution_core::prelude::*;
    pub use distribution_core::{INITIAL_PATHS, SharedContext};

    // Runtime
    pub use distribution_runtime::config::{DistributionConfig, load_config};
    pub use distribution_runtime::{EventEmitter, LoggingBuilder, logging};

    // Logging macros
    pub use distribution_runtime::prelude::*;
}
