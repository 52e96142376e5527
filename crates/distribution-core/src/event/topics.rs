//! Topics of distribution events.
//!
//! Topics are exposed both as string constants and as the [`EventTopic`]
//! enum, which can also build a topic under a custom base namespace.

use std::fmt;
use std::str::FromStr;

/// Base namespace of all distribution topics.
pub const EVENT_BASE: &str = "org/apache/sling/distribution";

/// Raised after the successful creation of a content package.
pub const AGENT_PACKAGE_CREATED: &str = "org/apache/sling/distribution/agent/package/created";

/// Raised after successfully storing a content package to the distribution queues.
pub const AGENT_PACKAGE_QUEUED: &str = "org/apache/sling/distribution/agent/package/queued";

/// Raised after successfully distributing a content package from a queue.
pub const AGENT_PACKAGE_DISTRIBUTED: &str =
    "org/apache/sling/distribution/agent/package/distributed";

/// Raised when a content package could not be distributed and was removed
/// from a queue.
pub const AGENT_PACKAGE_DROPPED: &str = "org/apache/sling/distribution/agent/package/dropped";

/// Raised after successfully importing a content package.
pub const IMPORTER_PACKAGE_IMPORTED: &str =
    "org/apache/sling/distribution/importer/package/imported";

/// The lifecycle occurrences a distribution event can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTopic {
    /// A content package was created.
    PackageCreated,
    /// A content package was queued.
    PackageQueued,
    /// A content package was distributed.
    PackageDistributed,
    /// A content package was dropped.
    PackageDropped,
    /// A content package was imported.
    PackageImported,
}

impl EventTopic {
    /// Every topic, in lifecycle order.
    pub const ALL: [EventTopic; 5] = [
        EventTopic::PackageCreated,
        EventTopic::PackageQueued,
        EventTopic::PackageDistributed,
        EventTopic::PackageDropped,
        EventTopic::PackageImported,
    ];

    /// Returns the full topic under [`EVENT_BASE`].
    pub const fn as_str(self) -> &'static str {
        match self {
            EventTopic::PackageCreated => AGENT_PACKAGE_CREATED,
            EventTopic::PackageQueued => AGENT_PACKAGE_QUEUED,
            EventTopic::PackageDistributed => AGENT_PACKAGE_DISTRIBUTED,
            EventTopic::PackageDropped => AGENT_PACKAGE_DROPPED,
            EventTopic::PackageImported => IMPORTER_PACKAGE_IMPORTED,
        }
    }

    /// Returns the part of the topic following the base namespace.
    pub const fn suffix(self) -> &'static str {
        match self {
            EventTopic::PackageCreated => "/agent/package/created",
            EventTopic::PackageQueued => "/agent/package/queued",
            EventTopic::PackageDistributed => "/agent/package/distributed",
            EventTopic::PackageDropped => "/agent/package/dropped",
            EventTopic::PackageImported => "/importer/package/imported",
        }
    }

    /// Builds the topic under a custom base namespace.
    ///
    /// A trailing `/` on `base` is ignored.
    pub fn with_base(self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.suffix())
    }
}

impl fmt::Display for EventTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known distribution topic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown distribution topic: {0}")]
pub struct UnknownTopic(pub String);

impl FromStr for EventTopic {
    type Err = UnknownTopic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventTopic::ALL
            .into_iter()
            .find(|topic| topic.as_str() == s)
            .ok_or_else(|| UnknownTopic(s.to_string()))
    }
}
