//! Typed distribution events and their marshalling to generic events.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::generic::{GenericEvent, Properties, PropertyValue};
use super::properties::{
    DISTRIBUTION_COMPONENT_KIND, DISTRIBUTION_COMPONENT_NAME, DISTRIBUTION_DEEP_PATHS,
    DISTRIBUTION_PACKAGE_ID, DISTRIBUTION_PATHS, DISTRIBUTION_TYPE,
};
use crate::error::{MarshalError, MarshalResult};

/// One lifecycle occurrence of a distribution package.
///
/// Converts losslessly to a [`GenericEvent`] with [`to_event`](Self::to_event)
/// and back with [`from_event`](Self::from_event):
///
/// ```rust
/// use distribution_core::{DistributionEvent, event::topics};
///
/// let event = DistributionEvent::new("pkg-1", "publish", "agent", "ADD")
///     .with_paths(["/content/site"]);
///
/// let generic = event.to_event(topics::AGENT_PACKAGE_CREATED);
/// assert_eq!(DistributionEvent::from_event(&generic).unwrap(), event);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DistributionEvent {
    package_id: String,
    component_name: String,
    component_kind: String,
    distribution_type: String,
    #[serde(default)]
    paths: Vec<String>,
    #[serde(default)]
    deep_paths: Vec<String>,
}

impl DistributionEvent {
    /// Creates an event without paths.
    pub fn new(
        package_id: impl Into<String>,
        component_name: impl Into<String>,
        component_kind: impl Into<String>,
        distribution_type: impl Into<String>,
    ) -> Self {
        Self {
            package_id: package_id.into(),
            component_name: component_name.into(),
            component_kind: component_kind.into(),
            distribution_type: distribution_type.into(),
            paths: Vec::new(),
            deep_paths: Vec::new(),
        }
    }

    /// Sets the distributed paths (builder pattern).
    pub fn with_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the deep paths (builder pattern).
    pub fn with_deep_paths<I, S>(mut self, deep_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deep_paths = deep_paths.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the package id.
    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    /// Returns the name of the component that raised the event.
    pub fn component_name(&self) -> &str {
        &self.component_name
    }

    /// Returns the kind of the component that raised the event.
    pub fn component_kind(&self) -> &str {
        &self.component_kind
    }

    /// Returns the distribution request type, e.g. `ADD`.
    pub fn distribution_type(&self) -> &str {
        &self.distribution_type
    }

    /// Returns the distributed paths in order.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Returns the paths distributed together with their descendants.
    pub fn deep_paths(&self) -> &[String] {
        &self.deep_paths
    }

    /// Converts this event into a generic event on `topic`.
    ///
    /// The generic event carries exactly six properties.
    pub fn to_event(&self, topic: impl Into<String>) -> GenericEvent {
        let mut props = Properties::new();
        props.insert(
            DISTRIBUTION_PACKAGE_ID.to_string(),
            PropertyValue::String(self.package_id.clone()),
        );
        props.insert(
            DISTRIBUTION_COMPONENT_NAME.to_string(),
            PropertyValue::String(self.component_name.clone()),
        );
        props.insert(
            DISTRIBUTION_COMPONENT_KIND.to_string(),
            PropertyValue::String(self.component_kind.clone()),
        );
        props.insert(
            DISTRIBUTION_TYPE.to_string(),
            PropertyValue::String(self.distribution_type.clone()),
        );
        props.insert(
            DISTRIBUTION_PATHS.to_string(),
            PropertyValue::StringArray(self.paths.clone()),
        );
        props.insert(
            DISTRIBUTION_DEEP_PATHS.to_string(),
            PropertyValue::StringArray(self.deep_paths.clone()),
        );
        GenericEvent::with_properties(topic, props)
    }

    /// Reads a distribution event out of a generic event.
    ///
    /// The producer is trusted to send well-formed events: a missing scalar
    /// property or a missing `distribution.paths` is
    /// [`MarshalError::MissingProperty`], never a default.
    ///
    /// The two array properties differ: a missing `distribution.deep.paths`
    /// reads as an empty list. Present but not a string array, either one is
    /// [`MarshalError::UnexpectedType`].
    pub fn from_event(event: &GenericEvent) -> MarshalResult<Self> {
        let read = || -> MarshalResult<Self> {
            Ok(Self {
                package_id: scalar(event, DISTRIBUTION_PACKAGE_ID)?,
                component_name: scalar(event, DISTRIBUTION_COMPONENT_NAME)?,
                component_kind: scalar(event, DISTRIBUTION_COMPONENT_KIND)?,
                distribution_type: scalar(event, DISTRIBUTION_TYPE)?,
                paths: string_array(event, DISTRIBUTION_PATHS)?
                    .ok_or(MarshalError::MissingProperty(DISTRIBUTION_PATHS))?,
                deep_paths: string_array(event, DISTRIBUTION_DEEP_PATHS)?.unwrap_or_default(),
            })
        };

        read().inspect_err(|err| {
            debug!(topic = %event.topic(), error = %err, "Malformed distribution event");
        })
    }
}

impl TryFrom<&GenericEvent> for DistributionEvent {
    type Error = MarshalError;

    fn try_from(event: &GenericEvent) -> Result<Self, Self::Error> {
        DistributionEvent::from_event(event)
    }
}

/// Reads a required scalar property through its string rendering.
fn scalar(event: &GenericEvent, name: &'static str) -> MarshalResult<String> {
    match event.property(name) {
        None => Err(MarshalError::MissingProperty(name)),
        Some(value @ PropertyValue::StringArray(_)) => Err(MarshalError::UnexpectedType {
            name,
            expected: "string",
            found: value.kind(),
        }),
        Some(value) => Ok(value.to_string()),
    }
}

/// Reads an optional string array property.
fn string_array(event: &GenericEvent, name: &'static str) -> MarshalResult<Option<Vec<String>>> {
    match event.property(name) {
        None => Ok(None),
        Some(PropertyValue::StringArray(values)) => Ok(Some(values.clone())),
        Some(value) => Err(MarshalError::UnexpectedType {
            name,
            expected: "string array",
            found: value.kind(),
        }),
    }
}
