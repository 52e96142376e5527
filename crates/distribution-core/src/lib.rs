//! # Distribution Core
//!
//! Contracts shared by the modules of a content-distribution subsystem.
//!
//! Most of this crate is declarative: traits for collaborators, error types,
//! and the wire names of distribution events. Two pieces carry real logic:
//!
//! - **Typed operation context** ([`OperationContext`], [`ContextKey`]): a
//!   heterogeneous container whose keys carry the type of their value, so
//!   retrieval never needs a cast.
//! - **Event marshalling** ([`DistributionEvent`], [`GenericEvent`]): the
//!   lossless conversion between a typed distribution event and the topic plus
//!   flat property map carried by an event bus.
//!
//! ## Collaborators
//!
//! - [`Distributor`] - hands a [`DistributionRequest`] to a named agent and
//!   returns a [`DistributionResponse`]
//! - [`DistributionPathSupplier`] - resolves the paths of an operation
//! - [`ImportPreProcessor`] - may veto an import before it starts
//! - [`EventAdmin`] - publish side of the event bus
//!
//! ## Example
//!
//! ```rust
//! use distribution_core::prelude::*;
//!
//! const AGENT: ContextKey<String> = ContextKey::new("agent");
//!
//! let mut ctx = OperationContext::new();
//! ctx.put(&AGENT, "publish".to_string());
//!
//! let event = DistributionEvent::new("pkg-1", "publish", "agent", "ADD")
//!     .with_paths(["/content/site"]);
//! let generic = event.to_event(topics::AGENT_PACKAGE_CREATED);
//!
//! assert_eq!(DistributionEvent::from_event(&generic)?, event);
//! # Ok::<(), MarshalError>(())
//! ```

pub mod context;
pub mod distributor;
pub mod error;
pub mod event;
pub mod import;
pub mod request;
pub mod response;
pub mod supplier;

// Re-export context types
pub use context::{AnyContextKey, ContextKey, ContextValue, OperationContext, SharedContext};

// Re-export event types
pub use event::{
    DistributionEvent, EventAdmin, EventTopic, GenericEvent, Properties, PropertyValue,
    UnknownTopic, properties, topics,
};

// Re-export request/response types
pub use request::{
    DistributionRequest, DistributionRequestType, SimpleDistributionRequest, UnknownRequestType,
    sanitize_paths,
};
pub use response::{
    DistributionRequestState, DistributionResponse, ResponseInfo, SimpleDistributionResponse,
};

// Re-export collaborator traits
pub use distributor::Distributor;
pub use import::{ImportPreProcessor, run_pre_processors};
pub use supplier::{DistributionPathSupplier, INITIAL_PATHS};

// Re-export error types
pub use error::{
    BoxError, ContextError, ContextResult, DistributionError, DistributionResult,
    ImportPreProcessError, MarshalError, MarshalResult, PathRetrievalError,
};

/// Prelude for common imports.
pub mod prelude {
    pub use super::context::{ContextKey, OperationContext};
    pub use super::error::*;
    pub use super::event::{
        DistributionEvent, EventAdmin, EventTopic, GenericEvent, PropertyValue, properties, topics,
    };
    pub use super::request::{DistributionRequest, DistributionRequestType, SimpleDistributionRequest};
    pub use super::response::{
        DistributionRequestState, DistributionResponse, ResponseInfo, SimpleDistributionResponse,
    };
    pub use super::{DistributionPathSupplier, Distributor, ImportPreProcessor};
}
