//! Intent dispatch over an ordered handler list.
//!
//! A [`Handler`] pairs a predicate with an action. [`dispatch`] walks the
//! handlers in registration order and invokes the action of the first handler
//! whose predicate accepts the request; later handlers are never consulted.
//! When nothing matches, dispatch fails with
//! [`DispatchError::NoHandlerFound`] and the caller decides how to answer.

mod dispatcher;
mod errors;
mod handler;
pub mod predicate;

pub use self::dispatcher::{Dispatcher, dispatch};
pub use self::errors::{DispatchError, HandlerError};
pub use self::handler::Handler;
