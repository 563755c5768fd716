//! Predicate and action pairs registered with the dispatcher.

use std::fmt;

use chime_types::{Request, Response};

use super::errors::HandlerError;

type Predicate = Box<dyn Fn(&Request) -> bool + Send + Sync>;
type Action = Box<dyn Fn(&Request) -> Result<Response, HandlerError> + Send + Sync>;

/// A named predicate/action pair responsible for one request kind or intent.
///
/// Handlers are built once at start-up and shared read-only afterwards, so
/// both closures must be `Send + Sync`.
pub struct Handler {
    name: String,
    predicate: Predicate,
    action: Action,
}

impl Handler {
    /// Creates a handler from a predicate and an action.
    pub fn new<P, A>(name: impl Into<String>, predicate: P, action: A) -> Self
    where
        P: Fn(&Request) -> bool + Send + Sync + 'static,
        A: Fn(&Request) -> Result<Response, HandlerError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Box::new(predicate),
            action: Box::new(action),
        }
    }

    /// Name used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` when this handler accepts the request.
    pub fn can_handle(&self, request: &Request) -> bool {
        (self.predicate)(request)
    }

    /// Runs the action for the request.
    ///
    /// # Errors
    ///
    /// Returns whatever [`HandlerError`] the action produces.
    pub fn handle(&self, request: &Request) -> Result<Response, HandlerError> {
        (self.action)(request)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
