//! The event bus seen from the distribution API.

use super::generic::GenericEvent;

/// Publish side of an opaque publish/subscribe bus keyed by topic.
///
/// The bus itself lives outside this crate; implementations adapt whatever
/// broker the host application uses.
pub trait EventAdmin: Send + Sync {
    /// Hands the event to the bus for asynchronous delivery and returns
    /// immediately.
    fn post_event(&self, event: GenericEvent);

    /// Delivers the event synchronously, returning once every subscriber has
    /// seen it.
    ///
    /// Defaults to [`post_event`](Self::post_event) for buses without a
    /// synchronous path.
    fn send_event(&self, event: GenericEvent) {
        self.post_event(event);
    }
}

impl<A: EventAdmin + ?Sized> EventAdmin for std::sync::Arc<A> {
    fn post_event(&self, event: GenericEvent) {
        (**self).post_event(event);
    }

    fn send_event(&self, event: GenericEvent) {
        (**self).send_event(event);
    }
}
