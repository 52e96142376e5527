//! Distribution events.
//!
//! This module provides:
//!
//! - [`DistributionEvent`] - the typed record of one package lifecycle step
//! - [`GenericEvent`] - topic plus flat property map, as carried by the bus
//! - [`topics`] / [`properties`] - the wire names shared with consumers
//! - [`EventAdmin`] - the publish side of the bus
//!
//! # Marshalling
//!
//! ```rust,ignore
//! let generic = event.to_event(topics::AGENT_PACKAGE_DISTRIBUTED);
//! admin.post_event(generic);
//!
//! // on the consumer side
//! let event = DistributionEvent::from_event(&generic)?;
//! ```

pub mod admin;
pub mod distribution;
pub mod generic;
pub mod properties;
pub mod topics;

pub use admin::EventAdmin;
pub use distribution::DistributionEvent;
pub use generic::{GenericEvent, Properties, PropertyValue};
pub use topics::{EventTopic, UnknownTopic};
