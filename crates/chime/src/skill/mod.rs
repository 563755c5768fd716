//! Skill wrapper around the dispatcher.
//!
//! A [`Skill`] turns a platform [`RequestEnvelope`] into a
//! [`ResponseEnvelope`]: it verifies the target skill ID, normalizes the
//! request, runs interceptors around dispatch and answers dispatch failures
//! through an ordered list of [`ErrorHandler`]s.

mod interceptor;
mod recovery;

use std::fmt;
use std::sync::Arc;

use chime_config::Config;
use chime_types::{EnvelopeError, RequestEnvelope, ResponseEnvelope};
use thiserror::Error;
use tracing::{debug, error};

use crate::dispatch::{DispatchError, Dispatcher};
use crate::handlers::{self, TellTimeSettings};

pub use self::interceptor::{RequestInterceptor, ResponseInterceptor, TracingInterceptor};
pub use self::recovery::{APOLOGY_SPEECH, ErrorHandler};

/// Tracing target for skill-level events.
pub(crate) const SKILL_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::skill");

/// Errors surfaced while handling a request envelope.
#[derive(Debug, Error)]
pub enum SkillError {
    /// The envelope targets a different skill.
    #[error(
        "request targets skill '{}' but this skill is '{expected}'",
        .actual.as_deref().unwrap_or("none")
    )]
    SkillIdMismatch {
        /// Configured skill ID.
        expected: String,
        /// Application ID found in the envelope, if any.
        actual: Option<String>,
    },
    /// The envelope could not be normalized into a request.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] EnvelopeError),
    /// Dispatch failed and no error handler accepted the failure.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Dispatcher plus the request pipeline around it.
#[derive(Clone)]
pub struct Skill {
    dispatcher: Dispatcher,
    skill_id: Option<String>,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
    error_handlers: Vec<Arc<ErrorHandler>>,
}

impl Skill {
    /// Creates a skill with no verification, interceptors or error handlers.
    #[must_use]
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            skill_id: None,
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
            error_handlers: Vec::new(),
        }
    }

    /// Builds the standard skill described by `config`.
    ///
    /// Registers the standard handlers and a [`TracingInterceptor`] on both
    /// sides of dispatch.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let handlers = handlers::standard(TellTimeSettings::from_config(config));
        let observer = Arc::new(TracingInterceptor);
        let skill = Self::new(Dispatcher::new(handlers))
            .with_request_interceptor(observer.clone())
            .with_response_interceptor(observer)
            .with_error_recovery(config.recover_errors());
        match config.skill_id() {
            Some(id) => skill.with_skill_id(id),
            None => skill,
        }
    }

    /// Rejects envelopes whose application ID differs from `skill_id`.
    #[must_use]
    pub fn with_skill_id(mut self, skill_id: impl Into<String>) -> Self {
        self.skill_id = Some(skill_id.into());
        self
    }

    /// Appends an interceptor run before dispatch.
    #[must_use]
    pub fn with_request_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.request_interceptors.push(interceptor);
        self
    }

    /// Appends an interceptor run after a successful dispatch.
    #[must_use]
    pub fn with_response_interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.response_interceptors.push(interceptor);
        self
    }

    /// Appends a handler consulted, in registration order, when dispatch
    /// fails.
    #[must_use]
    pub fn with_error_handler(mut self, handler: ErrorHandler) -> Self {
        self.error_handlers.push(Arc::new(handler));
        self
    }

    /// Registers the catch-all [`ErrorHandler::apology`] when `enabled`.
    #[must_use]
    pub fn with_error_recovery(self, enabled: bool) -> Self {
        if enabled {
            self.with_error_handler(ErrorHandler::apology())
        } else {
            self
        }
    }

    /// The underlying dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Handles one request envelope.
    ///
    /// # Errors
    ///
    /// Returns [`SkillError::SkillIdMismatch`] when verification fails,
    /// [`SkillError::InvalidRequest`] when the envelope cannot be normalized,
    /// and [`SkillError::Dispatch`] when dispatch fails and no error handler
    /// accepts the failure.
    pub fn invoke(&self, envelope: &RequestEnvelope) -> Result<ResponseEnvelope, SkillError> {
        self.verify_skill_id(envelope)?;
        let request = envelope.normalize()?;

        for interceptor in &self.request_interceptors {
            interceptor.process(&request);
        }

        let response = match self.dispatcher.dispatch(&request) {
            Ok(response) => response,
            Err(error) => {
                let Some(handler) = self
                    .error_handlers
                    .iter()
                    .find(|handler| handler.can_handle(&error))
                else {
                    return Err(error.into());
                };
                error!(
                    target: SKILL_TARGET,
                    event = "dispatch_recovered",
                    request = %request,
                    handler = handler.name(),
                    %error,
                    "dispatch failed; answering through error handler"
                );
                let recovered = handler.handle(&request, &error);
                return Ok(ResponseEnvelope::from_response(&recovered));
            }
        };

        for interceptor in &self.response_interceptors {
            interceptor.process(&request, &response);
        }

        Ok(ResponseEnvelope::from_response(&response))
    }

    fn verify_skill_id(&self, envelope: &RequestEnvelope) -> Result<(), SkillError> {
        let Some(expected) = self.skill_id.as_deref() else {
            return Ok(());
        };
        let actual = envelope.application_id();
        if actual == Some(expected) {
            debug!(target: SKILL_TARGET, skill_id = expected, "skill ID verified");
            return Ok(());
        }
        Err(SkillError::SkillIdMismatch {
            expected: expected.to_owned(),
            actual: actual.map(str::to_owned),
        })
    }
}

impl fmt::Debug for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Skill")
            .field("dispatcher", &self.dispatcher)
            .field("skill_id", &self.skill_id)
            .field("request_interceptors", &self.request_interceptors.len())
            .field("response_interceptors", &self.response_interceptors.len())
            .field("error_handlers", &self.error_handlers)
            .finish()
    }
}
