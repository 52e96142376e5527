//! Distribution responses.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a distribution request ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistributionRequestState {
    /// Accepted and queued for asynchronous distribution.
    Accepted,
    /// Distributed synchronously.
    Distributed,
    /// Could not be queued or distributed.
    Dropped,
    /// Not executed, e.g. because no agent could handle it.
    NotExecuted,
}

/// Additional information attached to a response.
///
/// [`ResponseInfo::NONE`] is the explicit "nothing to report" value; an
/// implementation that deliberately has no info returns `None` from
/// [`DistributionResponse::distribution_info`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResponseInfo {
    id: Cow<'static, str>,
}

static NO_INFO: ResponseInfo = ResponseInfo::NONE;

impl ResponseInfo {
    /// Info with an empty identifier.
    pub const NONE: ResponseInfo = ResponseInfo {
        id: Cow::Borrowed(""),
    };

    /// Creates info carrying the identifier of the associated request.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Cow::Owned(id.into()),
        }
    }

    /// Returns the identifier of the associated request.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns `true` for the empty-identifier sentinel.
    pub fn is_none(&self) -> bool {
        self.id.is_empty()
    }
}

impl Default for ResponseInfo {
    fn default() -> Self {
        Self::NONE
    }
}

/// The outcome of a distribution request.
pub trait DistributionResponse: Send + Sync + fmt::Debug {
    /// Returns `true` if the request was accepted or distributed.
    fn is_successful(&self) -> bool;

    /// Returns the state the request ended in.
    fn state(&self) -> DistributionRequestState;

    /// Returns a human readable message, if any.
    fn message(&self) -> Option<&str>;

    /// Returns additional information about the request.
    ///
    /// Defaults to [`ResponseInfo::NONE`].
    fn distribution_info(&self) -> Option<&ResponseInfo> {
        Some(&NO_INFO)
    }
}

/// A plain [`DistributionResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleDistributionResponse {
    state: DistributionRequestState,
    message: Option<String>,
    info: Option<ResponseInfo>,
}

impl SimpleDistributionResponse {
    /// Creates a response carrying [`ResponseInfo::NONE`].
    pub fn new(state: DistributionRequestState, message: impl Into<String>) -> Self {
        Self {
            state,
            message: Some(message.into()),
            info: Some(ResponseInfo::NONE),
        }
    }

    /// Replaces the attached info; `None` means no info at all.
    pub fn with_info(mut self, info: Option<ResponseInfo>) -> Self {
        self.info = info;
        self
    }
}

impl DistributionResponse for SimpleDistributionResponse {
    fn is_successful(&self) -> bool {
        matches!(
            self.state,
            DistributionRequestState::Accepted | DistributionRequestState::Distributed
        )
    }

    fn state(&self) -> DistributionRequestState {
        self.state
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn distribution_info(&self) -> Option<&ResponseInfo> {
        self.info.as_ref()
    }
}

impl fmt::Display for SimpleDistributionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SimpleDistributionResponse{{state={:?}, message={}}}",
            self.state,
            self.message.as_deref().unwrap_or("")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct BareResponse;

    impl DistributionResponse for BareResponse {
        fn is_successful(&self) -> bool {
            false
        }

        fn state(&self) -> DistributionRequestState {
            DistributionRequestState::Dropped
        }

        fn message(&self) -> Option<&str> {
            None
        }
    }

    #[test]
    fn test_default_distribution_info() {
        let info = BareResponse.distribution_info().unwrap();
        assert_eq!(info.id(), "");
        assert!(info.is_none());
    }

    #[test]
    fn test_empty_distribution_response() {
        let res = SimpleDistributionResponse::new(DistributionRequestState::Distributed, "");
        assert_eq!(res.distribution_info(), Some(&ResponseInfo::NONE));
    }

    #[test]
    fn test_absent_distribution_info() {
        let res = SimpleDistributionResponse::new(DistributionRequestState::Distributed, "")
            .with_info(None);
        assert!(res.distribution_info().is_none());
    }

    #[test]
    fn test_non_empty_distribution_info() {
        let res = SimpleDistributionResponse::new(DistributionRequestState::Distributed, "success")
            .with_info(Some(ResponseInfo::new("res1")));

        assert_eq!(res.distribution_info().map(ResponseInfo::id), Some("res1"));
        assert_eq!(res.message(), Some("success"));
    }

    #[test]
    fn test_success_follows_state() {
        let ok = |state| SimpleDistributionResponse::new(state, "").is_successful();
        assert!(ok(DistributionRequestState::Accepted));
        assert!(ok(DistributionRequestState::Distributed));
        assert!(!ok(DistributionRequestState::Dropped));
        assert!(!ok(DistributionRequestState::NotExecuted));
    }

    #[test]
    fn test_state_wire_names() {
        assert_eq!(
            serde_json::to_string(&DistributionRequestState::NotExecuted).unwrap(),
            "\"NOT_EXECUTED\""
        );
    }
}
