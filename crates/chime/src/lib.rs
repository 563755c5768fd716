//! Intent-dispatch core for the Chime hello-world voice skill.
//!
//! A [`Dispatcher`] holds an ordered list of [`Handler`]s, each a predicate
//! and an action over a normalized [`Request`]. Dispatch invokes the first
//! handler whose predicate matches and returns its [`Response`]; when none
//! match it fails with [`DispatchError::NoHandlerFound`].
//!
//! Around that core the crate provides:
//!
//! - [`handlers::standard`], the hello-world handler set in precedence order;
//! - [`Skill`], which verifies the target skill ID, normalizes the platform
//!   envelope, runs interceptors and answers failures through ordered
//!   [`ErrorHandler`]s;
//! - [`StreamHandler`], which reads one JSON envelope and writes one JSON
//!   response, backing the `chime` binary;
//! - [`bootstrap_with`], which loads configuration and installs telemetry.

mod bootstrap;
mod dispatch;
pub mod handlers;
mod skill;
mod stream;
mod telemetry;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Runtime, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use chime_types::{Request, Response};
pub use dispatch::{DispatchError, Dispatcher, Handler, HandlerError, dispatch, predicate};
pub use skill::{
    APOLOGY_SPEECH, ErrorHandler, RequestInterceptor, ResponseInterceptor, Skill, SkillError,
    TracingInterceptor,
};
pub use stream::{MAX_REQUEST_BYTES, StreamError, StreamHandler};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
