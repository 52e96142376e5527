//! Configured publishing of distribution events.

use std::time::{SystemTime, UNIX_EPOCH};

use distribution_core::properties::DISTRIBUTION_ENQUEUE_TIMESTAMP;
use distribution_core::{DistributionEvent, EventAdmin, EventTopic, GenericEvent};
use tracing::debug;

use crate::config::EventsConfig;

/// Publishes [`DistributionEvent`]s on an [`EventAdmin`] under the configured
/// topic base.
#[derive(Debug, Clone)]
pub struct EventEmitter<A> {
    admin: A,
    config: EventsConfig,
}

impl<A: EventAdmin> EventEmitter<A> {
    /// Creates an emitter publishing on `admin`.
    pub fn new(admin: A, config: EventsConfig) -> Self {
        Self { admin, config }
    }

    /// Creates an emitter using the default topic base.
    pub fn with_default_config(admin: A) -> Self {
        Self::new(admin, EventsConfig::default())
    }

    /// Returns the underlying event admin.
    pub fn admin(&self) -> &A {
        &self.admin
    }

    /// Returns the event configuration in use.
    pub fn config(&self) -> &EventsConfig {
        &self.config
    }

    /// Full topic name of `topic` under the configured base.
    pub fn topic(&self, topic: EventTopic) -> String {
        topic.with_base(&self.config.topic_base)
    }

    /// Marshals `event` for `topic`.
    ///
    /// `enqueued_at` is when the package was enqueued. It is written to
    /// `distribution.enqueue.timestamp` only if known and stamping is enabled;
    /// the emit time is never used in its place.
    pub fn build(
        &self,
        event: &DistributionEvent,
        topic: EventTopic,
        enqueued_at: Option<SystemTime>,
    ) -> GenericEvent {
        let mut generic = event.to_event(self.topic(topic));
        if let Some(at) = enqueued_at.filter(|_| self.config.stamp_enqueue_time) {
            generic.set_property(DISTRIBUTION_ENQUEUE_TIMESTAMP, epoch_millis(at));
        }
        generic
    }

    /// Posts `event` for asynchronous delivery.
    pub fn emit(
        &self,
        event: &DistributionEvent,
        topic: EventTopic,
        enqueued_at: Option<SystemTime>,
    ) {
        let generic = self.build(event, topic, enqueued_at);
        debug!(
            topic = %generic.topic(),
            package_id = %event.package_id(),
            component = %event.component_name(),
            "Posting distribution event"
        );
        self.admin.post_event(generic);
    }

    /// Sends `event` synchronously.
    pub fn emit_sync(
        &self,
        event: &DistributionEvent,
        topic: EventTopic,
        enqueued_at: Option<SystemTime>,
    ) {
        let generic = self.build(event, topic, enqueued_at);
        debug!(
            topic = %generic.topic(),
            package_id = %event.package_id(),
            component = %event.component_name(),
            "Sending distribution event"
        );
        self.admin.send_event(generic);
    }
}

/// Milliseconds since the UNIX epoch; 0 for times before it.
fn epoch_millis(at: SystemTime) -> i64 {
    at.duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use distribution_core::PropertyValue;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        posted: Mutex<Vec<GenericEvent>>,
        sent: Mutex<Vec<GenericEvent>>,
    }

    impl EventAdmin for Recorder {
        fn post_event(&self, event: GenericEvent) {
            self.posted.lock().unwrap().push(event);
        }

        fn send_event(&self, event: GenericEvent) {
            self.sent.lock().unwrap().push(event);
        }
    }

    fn event() -> DistributionEvent {
        DistributionEvent::new("pkg-1", "publish", "agent", "ADD").with_paths(["/content/a"])
    }

    #[test]
    fn test_emit_uses_default_base_and_enqueue_time() {
        let admin = Arc::new(Recorder::default());
        let emitter = EventEmitter::with_default_config(admin.clone());
        let enqueued_at = UNIX_EPOCH + Duration::from_millis(1_700_000_000_123);

        emitter.emit(&event(), EventTopic::PackageQueued, Some(enqueued_at));

        let posted = admin.posted.lock().unwrap();
        assert_eq!(posted.len(), 1);
        assert_eq!(
            posted[0].topic(),
            "org/apache/sling/distribution/agent/package/queued"
        );
        assert_eq!(
            posted[0].property(DISTRIBUTION_ENQUEUE_TIMESTAMP),
            Some(&PropertyValue::Long(1_700_000_000_123))
        );
        assert_eq!(DistributionEvent::from_event(&posted[0]).unwrap(), event());
    }

    #[test]
    fn test_later_topics_keep_original_enqueue_time() {
        let admin = Arc::new(Recorder::default());
        let emitter = EventEmitter::with_default_config(admin.clone());
        let enqueued_at = SystemTime::now() - Duration::from_secs(3600);
        let expected = epoch_millis(enqueued_at);

        emitter.emit(&event(), EventTopic::PackageDistributed, Some(enqueued_at));
        emitter.emit(&event(), EventTopic::PackageImported, Some(enqueued_at));

        let posted = admin.posted.lock().unwrap();
        assert_eq!(posted.len(), 2);
        for generic in posted.iter() {
            assert_eq!(
                generic
                    .property(DISTRIBUTION_ENQUEUE_TIMESTAMP)
                    .and_then(PropertyValue::as_long),
                Some(expected)
            );
        }
    }

    #[test]
    fn test_unknown_enqueue_time_is_not_stamped() {
        let emitter = EventEmitter::with_default_config(Recorder::default());

        let generic = emitter.build(&event(), EventTopic::PackageDropped, None);

        assert!(!generic.contains_property(DISTRIBUTION_ENQUEUE_TIMESTAMP));
        assert_eq!(generic.properties().len(), 6);
    }

    #[test]
    fn test_custom_base_without_stamp() {
        let admin = Arc::new(Recorder::default());
        let emitter = EventEmitter::new(
            admin.clone(),
            EventsConfig {
                topic_base: "com/example/dist/".to_string(),
                stamp_enqueue_time: false,
            },
        );

        emitter.emit_sync(&event(), EventTopic::PackageImported, Some(SystemTime::now()));

        assert!(admin.posted.lock().unwrap().is_empty());
        let sent = admin.sent.lock().unwrap();
        assert_eq!(sent[0].topic(), "com/example/dist/importer/package/imported");
        assert!(!sent[0].contains_property(DISTRIBUTION_ENQUEUE_TIMESTAMP));
        assert_eq!(sent[0].properties().len(), 6);
    }

    #[test]
    fn test_epoch_millis_before_epoch_is_zero() {
        assert_eq!(epoch_millis(UNIX_EPOCH - Duration::from_secs(1)), 0);
    }

    #[test]
    fn test_topic_for_every_kind() {
        let emitter = EventEmitter::with_default_config(Recorder::default());
        for topic in EventTopic::ALL {
            assert_eq!(emitter.topic(topic), topic.as_str());
        }
    }
}
