//! Property names carried by distribution events.
//!
//! These strings are part of the wire contract with event consumers and
//! must not change.

/// Name of the component generating the event.
pub const DISTRIBUTION_COMPONENT_NAME: &str = "distribution.component.name";

/// Kind of the component generating the event.
pub const DISTRIBUTION_COMPONENT_KIND: &str = "distribution.component.kind";

/// Type of the distribution request.
pub const DISTRIBUTION_TYPE: &str = "distribution.type";

/// Paths covered by the distribution request.
pub const DISTRIBUTION_PATHS: &str = "distribution.paths";

/// Paths distributed together with all their descendants.
pub const DISTRIBUTION_DEEP_PATHS: &str = "distribution.deep.paths";

/// Package id.
pub const DISTRIBUTION_PACKAGE_ID: &str = "distribution.package.id";

/// Time when an item was created and enqueued for distribution.
pub const DISTRIBUTION_ENQUEUE_TIMESTAMP: &str = "distribution.enqueue.timestamp";
