//! Runtime error types.

use thiserror::Error;

/// Errors that can occur while installing the global subscriber.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// A global subscriber is already installed.
    #[error("Failed to install log subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),

    /// The rolling log file could not be created.
    #[error("Failed to open log file: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),
}
