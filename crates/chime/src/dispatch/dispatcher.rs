//! First-match dispatch over registered handlers.

use std::sync::Arc;

use chime_types::{Request, Response};
use tracing::{debug, warn};

use super::errors::DispatchError;
use super::handler::Handler;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Invokes the first handler whose predicate accepts `request`.
///
/// Handlers are tried in slice order and evaluation stops at the first match,
/// so earlier registrations take precedence.
///
/// # Errors
///
/// Returns [`DispatchError::NoHandlerFound`] when no predicate matches, or
/// [`DispatchError::Handler`] carrying the matched action's failure.
pub fn dispatch(request: &Request, handlers: &[Handler]) -> Result<Response, DispatchError> {
    let Some(handler) = handlers.iter().find(|handler| handler.can_handle(request)) else {
        warn!(
            target: DISPATCH_TARGET,
            request = %request,
            registered = handlers.len(),
            "no handler found"
        );
        return Err(DispatchError::no_handler_found(request));
    };

    debug!(
        target: DISPATCH_TARGET,
        request = %request,
        handler = handler.name(),
        "dispatching request"
    );

    handler.handle(request).map_err(|error| {
        warn!(
            target: DISPATCH_TARGET,
            handler = handler.name(),
            %error,
            "handler failed"
        );
        DispatchError::from(error)
    })
}

/// Immutable, shareable handler registration list.
///
/// Cloning is cheap; clones share the same handlers.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    handlers: Arc<[Handler]>,
}

impl Dispatcher {
    /// Freezes the handlers in the given order.
    pub fn new(handlers: Vec<Handler>) -> Self {
        Self {
            handlers: Arc::from(handlers),
        }
    }

    /// Registered handlers in precedence order.
    pub fn handlers(&self) -> &[Handler] {
        &self.handlers
    }

    /// Dispatches `request` against the registered handlers.
    ///
    /// # Errors
    ///
    /// See [`dispatch`].
    pub fn dispatch(&self, request: &Request) -> Result<Response, DispatchError> {
        dispatch(request, &self.handlers)
    }
}
