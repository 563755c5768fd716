//! Error types for dispatch and handler failures.

use chime_types::{Request, ResponseError};
use thiserror::Error;

/// Failures raised by a handler action.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The action built a response that failed validation.
    #[error("malformed response: {0}")]
    InvalidResponse(#[from] ResponseError),

    /// The action failed for a handler-specific reason.
    #[error("handler failed: {message}")]
    Failed {
        /// Description of the failure.
        message: String,
    },
}

impl HandlerError {
    /// Creates a handler-specific failure.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

/// Errors surfaced by [`crate::dispatch`].
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No registered predicate accepted the request.
    #[error("no handler found for {request}")]
    NoHandlerFound {
        /// Request kind, with the intent name for intent requests.
        request: String,
    },

    /// The matched handler's action failed; the error is passed through.
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

impl DispatchError {
    /// Creates a no-handler error describing the unmatched request.
    pub fn no_handler_found(request: &Request) -> Self {
        Self::NoHandlerFound {
            request: request.to_string(),
        }
    }
}
