//! Ordered handlers for dispatch failures.
//!
//! When dispatch fails the skill consults its error handlers in registration
//! order and answers with the first one that accepts the error. If none
//! accept it the failure propagates.

use std::fmt;

use chime_types::{Request, Response};

use crate::dispatch::DispatchError;

/// Speech returned by [`ErrorHandler::apology`].
pub const APOLOGY_SPEECH: &str = "Sorry, I had trouble doing what you asked. Please try again.";

type ErrorPredicate = Box<dyn Fn(&DispatchError) -> bool + Send + Sync>;
type ErrorAction = Box<dyn Fn(&Request, &DispatchError) -> Response + Send + Sync>;

/// A named predicate/action pair that turns a dispatch failure into a
/// response.
pub struct ErrorHandler {
    name: String,
    predicate: ErrorPredicate,
    action: ErrorAction,
}

impl ErrorHandler {
    /// Creates an error handler from a predicate and an action.
    pub fn new<P, A>(name: impl Into<String>, predicate: P, action: A) -> Self
    where
        P: Fn(&DispatchError) -> bool + Send + Sync + 'static,
        A: Fn(&Request, &DispatchError) -> Response + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Box::new(predicate),
            action: Box::new(action),
        }
    }

    /// Catch-all handler answering with [`APOLOGY_SPEECH`] and a matching
    /// reprompt.
    #[must_use]
    pub fn apology() -> Self {
        Self::new("apology", |_: &DispatchError| true, |_: &Request, _: &DispatchError| {
            Response {
                speech: Some(APOLOGY_SPEECH.to_owned()),
                reprompt: Some(APOLOGY_SPEECH.to_owned()),
                should_end_session: Some(false),
                ..Response::empty()
            }
        })
    }

    /// Name used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` when this handler accepts the failure.
    pub fn can_handle(&self, error: &DispatchError) -> bool {
        (self.predicate)(error)
    }

    /// Builds the response for the failed request.
    pub fn handle(&self, request: &Request, error: &DispatchError) -> Response {
        (self.action)(request, error)
    }
}

impl fmt::Debug for ErrorHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorHandler")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::HandlerError;

    #[test]
    fn apology_accepts_every_failure() {
        let handler = ErrorHandler::apology();
        assert!(handler.can_handle(&DispatchError::no_handler_found(&Request::Launch)));
        assert!(handler.can_handle(&DispatchError::from(HandlerError::failed("boom"))));
    }

    #[test]
    fn apology_reprompts_and_keeps_the_session_open() {
        let error = DispatchError::no_handler_found(&Request::Launch);
        let response = ErrorHandler::apology().handle(&Request::Launch, &error);
        assert_eq!(response.speech.as_deref(), Some(APOLOGY_SPEECH));
        assert_eq!(response.reprompt.as_deref(), Some(APOLOGY_SPEECH));
        assert_eq!(response.should_end_session, Some(false));
        assert!(response.validated().is_ok());
    }
}
