//! Entry point for triggering distribution.

use crate::context::OperationContext;
use crate::request::DistributionRequest;
use crate::response::DistributionResponse;

/// Hands distribution requests to a named agent.
///
/// Failures are reported through the returned response's state and message
/// rather than as errors, so callers always get a [`DistributionResponse`].
pub trait Distributor: Send + Sync {
    /// Performs `request` with the agent named `agent_name`.
    ///
    /// `context` carries ancillary data for this operation only; the
    /// distributor and its collaborators may read and extend it.
    fn distribute(
        &self,
        agent_name: &str,
        request: &dyn DistributionRequest,
        context: &mut OperationContext,
    ) -> Box<dyn DistributionResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextKey;
    use crate::request::{DistributionRequestType, SimpleDistributionRequest};
    use crate::response::{DistributionRequestState, ResponseInfo, SimpleDistributionResponse};

    const HANDLED_BY: ContextKey<String> = ContextKey::new("handledBy");

    struct SingleAgent;

    impl Distributor for SingleAgent {
        fn distribute(
            &self,
            agent_name: &str,
            request: &dyn DistributionRequest,
            context: &mut OperationContext,
        ) -> Box<dyn DistributionResponse> {
            if agent_name != "publish" {
                return Box::new(SimpleDistributionResponse::new(
                    DistributionRequestState::NotExecuted,
                    format!("no agent named {agent_name}"),
                ));
            }
            context.put(&HANDLED_BY, agent_name.to_string());
            Box::new(
                SimpleDistributionResponse::new(
                    DistributionRequestState::Accepted,
                    format!("queued {} paths", request.paths().len()),
                )
                .with_info(Some(ResponseInfo::new("req-1"))),
            )
        }
    }

    #[test]
    fn test_distribute_to_known_agent() {
        let request = SimpleDistributionRequest::new(DistributionRequestType::Add, ["/a", "/b"]);
        let mut ctx = OperationContext::new();

        let response = SingleAgent.distribute("publish", &request, &mut ctx);

        assert!(response.is_successful());
        assert_eq!(response.message(), Some("queued 2 paths"));
        assert_eq!(response.distribution_info().map(ResponseInfo::id), Some("req-1"));
        assert_eq!(ctx.get(&HANDLED_BY).map(String::as_str), Some("publish"));
    }

    #[test]
    fn test_distribute_to_unknown_agent() {
        let request = SimpleDistributionRequest::new(DistributionRequestType::Test, ["/a"]);
        let mut ctx = OperationContext::new();

        let response = SingleAgent.distribute("author", &request, &mut ctx);

        assert!(!response.is_successful());
        assert_eq!(response.state(), DistributionRequestState::NotExecuted);
        assert!(ctx.is_empty());
    }
}
