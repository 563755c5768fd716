//! Observers run around dispatch.
//!
//! Interceptors see the normalized request and, on success, the handler's
//! response. They cannot alter either.

use chime_types::{Request, Response};
use tracing::info;

use super::SKILL_TARGET;

/// Observer invoked before dispatch.
pub trait RequestInterceptor: Send + Sync {
    /// Inspects the normalized request.
    fn process(&self, request: &Request);
}

/// Observer invoked after a successful dispatch.
pub trait ResponseInterceptor: Send + Sync {
    /// Inspects the request and the response produced for it.
    fn process(&self, request: &Request, response: &Response);
}

/// Logs each request and the outcome of handling it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingInterceptor;

impl RequestInterceptor for TracingInterceptor {
    fn process(&self, request: &Request) {
        info!(
            target: SKILL_TARGET,
            event = "request_received",
            kind = request.kind(),
            intent = request.intent_name(),
            "request received"
        );
    }
}

impl ResponseInterceptor for TracingInterceptor {
    fn process(&self, request: &Request, response: &Response) {
        info!(
            target: SKILL_TARGET,
            event = "response_ready",
            kind = request.kind(),
            has_speech = response.speech.is_some(),
            ends_session = response.ends_session(),
            "response ready"
        );
    }
}
