//! Unified error types for the distribution API.
//!
//! Each concern gets its own error type so callers can match on exactly the
//! failures an operation can produce:
//!
//! - [`ContextError`] - invalid context keys and type mismatches at the
//!   erased boundary of an [`OperationContext`](crate::OperationContext)
//! - [`MarshalError`] - malformed generic events handed to
//!   [`DistributionEvent::from_event`](crate::DistributionEvent::from_event)
//! - [`PathRetrievalError`] / [`ImportPreProcessError`] - vetoes raised by
//!   collaborators, carrying a message and an optional cause
//!
//! [`DistributionError`] wraps all of them for callers that want a single type.

use std::error::Error as StdError;

use thiserror::Error;

/// Boxed error used as the optional cause of collaborator vetoes.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

// =============================================================================
// Context Errors
// =============================================================================

/// Errors raised by context keys and the operation context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// A key was constructed from an unusable identifier.
    #[error("invalid context key: {reason}")]
    InvalidKey {
        /// Why the key was rejected.
        reason: &'static str,
    },

    /// A value does not match the type declared by its key.
    #[error("type mismatch for context key '{identifier}': expected '{expected}', got '{found}'")]
    TypeMismatch {
        /// The key identifier.
        identifier: String,
        /// Type declared by the key.
        expected: &'static str,
        /// Type of the offered value.
        found: &'static str,
    },
}

// =============================================================================
// Marshalling Errors
// =============================================================================

/// Errors raised while reading a distribution event out of a generic event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarshalError {
    /// A required property is absent.
    #[error("missing event property '{0}'")]
    MissingProperty(&'static str),

    /// A property is present but holds the wrong kind of value.
    #[error("event property '{name}' has unexpected type: expected {expected}, got {found}")]
    UnexpectedType {
        /// The property name.
        name: &'static str,
        /// Expected value kind.
        expected: &'static str,
        /// Actual value kind.
        found: &'static str,
    },
}

// =============================================================================
// Collaborator Vetoes
// =============================================================================

/// Raised by a [`DistributionPathSupplier`](crate::DistributionPathSupplier)
/// that cannot produce the paths to distribute.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct PathRetrievalError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl PathRetrievalError {
    /// Creates an error with a message and no cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error with a message and an underlying cause.
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Wraps a cause, reusing its rendering as the message.
    pub fn from_source(source: impl StdError + Send + Sync + 'static) -> Self {
        Self {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the detail message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Raised by an [`ImportPreProcessor`](crate::ImportPreProcessor) to veto an
/// import before it starts.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ImportPreProcessError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl ImportPreProcessError {
    /// Creates an error with a message and no cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error with a message and an underlying cause.
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Wraps a cause, reusing its rendering as the message.
    pub fn from_source(source: impl StdError + Send + Sync + 'static) -> Self {
        Self {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the detail message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

// =============================================================================
// Umbrella Error
// =============================================================================

/// Any failure surfaced by the distribution API.
#[derive(Debug, Error)]
pub enum DistributionError {
    /// Context key or value error.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// Generic event could not be read.
    #[error(transparent)]
    Marshal(#[from] MarshalError),

    /// Path supplier veto.
    #[error(transparent)]
    PathRetrieval(#[from] PathRetrievalError),

    /// Import pre-processor veto.
    #[error(transparent)]
    ImportPreProcess(#[from] ImportPreProcessError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for context operations.
pub type ContextResult<T> = Result<T, ContextError>;

/// Result type for event marshalling.
pub type MarshalResult<T> = Result<T, MarshalError>;

/// Result type for distribution operations.
pub type DistributionResult<T> = Result<T, DistributionError>;
