//! Normalized requests and the platform request envelope.
//!
//! Adapters receive a JSON [`RequestEnvelope`] from the voice platform. The
//! envelope carries session and device metadata the dispatcher never looks
//! at, so [`RequestEnvelope::normalize`] reduces it to the small [`Request`]
//! union that handler predicates match against.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EnvelopeError;

/// Wire name of the request sent when a user opens the skill.
pub const LAUNCH_REQUEST: &str = "LaunchRequest";

/// Wire name of the request carrying a resolved intent.
pub const INTENT_REQUEST: &str = "IntentRequest";

/// Wire name of the request sent after the session has closed.
pub const SESSION_ENDED_REQUEST: &str = "SessionEndedRequest";

/// Normalized inbound request matched by handler predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// The user opened the skill without stating an intent.
    Launch,
    /// The platform resolved the utterance to a named intent.
    Intent {
        /// Intent name, for example `HelloWorldIntent`.
        name: String,
    },
    /// The session has ended; no speech may be returned.
    SessionEnded,
}

impl Request {
    /// Creates an intent request for the given intent name.
    #[must_use]
    pub fn intent(name: impl Into<String>) -> Self {
        Self::Intent { name: name.into() }
    }

    /// Returns the wire name of the request kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Launch => LAUNCH_REQUEST,
            Self::Intent { .. } => INTENT_REQUEST,
            Self::SessionEnded => SESSION_ENDED_REQUEST,
        }
    }

    /// Returns the intent name for intent requests.
    #[must_use]
    pub fn intent_name(&self) -> Option<&str> {
        match self {
            Self::Intent { name } => Some(name),
            Self::Launch | Self::SessionEnded => None,
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intent { name } => write!(f, "{INTENT_REQUEST}({name})"),
            Self::Launch | Self::SessionEnded => f.write_str(self.kind()),
        }
    }
}

/// Request envelope as delivered by the voice platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    /// Envelope format version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Session metadata; absent for out-of-session requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
    /// Device and application context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    /// The request itself.
    pub request: RequestBody,
}

/// Session block of the envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Whether this request opened the session.
    #[serde(default)]
    pub new: bool,
    /// Platform session identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Application the session belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<Application>,
}

/// Context block of the envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// System state reported by the device.
    #[serde(rename = "System", default, skip_serializing_if = "Option::is_none")]
    pub system: Option<SystemState>,
}

/// System state nested inside the context block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemState {
    /// Application the request targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<Application>,
}

/// Application (skill) identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Skill identifier assigned by the platform.
    pub application_id: String,
}

/// Request body of the envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    /// Request type discriminant, for example `LaunchRequest`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Platform request identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// ISO 8601 timestamp of the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Locale of the user, for example `en-US`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Resolved intent for intent requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    /// Reason the session ended, for session-ended requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Intent resolved by the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Intent name.
    #[serde(default)]
    pub name: String,
    /// Slot values keyed by slot name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub slots: BTreeMap<String, Slot>,
}

/// Single slot value of an intent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Slot name.
    pub name: String,
    /// Spoken value, when the user filled the slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl RequestEnvelope {
    /// Parses an envelope from raw JSON bytes.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Malformed`] if the payload is empty or does
    /// not match the envelope schema.
    pub fn parse(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        let trimmed = bytes.trim_ascii();
        if trimmed.is_empty() {
            return Err(EnvelopeError::malformed("empty request payload"));
        }
        serde_json::from_slice(trimmed).map_err(EnvelopeError::from_json_error)
    }

    /// Builds a minimal envelope around a normalized request.
    ///
    /// Local tooling uses this to feed requests through the same decoding
    /// path the platform adapter takes.
    #[must_use]
    pub fn for_request(request: &Request) -> Self {
        let intent = request.intent_name().map(|name| Intent {
            name: name.to_owned(),
            slots: BTreeMap::new(),
        });
        Self {
            version: Some(crate::FORMAT_VERSION.to_owned()),
            request: RequestBody {
                kind: request.kind().to_owned(),
                intent,
                ..RequestBody::default()
            },
            ..Self::default()
        }
    }

    /// Attaches an application ID to the context block.
    #[must_use]
    pub fn with_application_id(mut self, application_id: impl Into<String>) -> Self {
        self.context = Some(Context {
            system: Some(SystemState {
                application: Some(Application {
                    application_id: application_id.into(),
                }),
            }),
        });
        self
    }

    /// Returns the application ID the request targets.
    ///
    /// The context block is authoritative; the session block is consulted
    /// for envelopes that predate it.
    #[must_use]
    pub fn application_id(&self) -> Option<&str> {
        let from_context = self
            .context
            .as_ref()
            .and_then(|context| context.system.as_ref())
            .and_then(|system| system.application.as_ref());
        let from_session = self
            .session
            .as_ref()
            .and_then(|session| session.application.as_ref());
        from_context
            .or(from_session)
            .map(|application| application.application_id.as_str())
    }

    /// Reduces the envelope to a normalized [`Request`].
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::MissingRequestType`] when the type is blank,
    /// [`EnvelopeError::MissingIntentName`] for intent requests without a
    /// name, and [`EnvelopeError::UnsupportedRequestType`] for any other type.
    pub fn normalize(&self) -> Result<Request, EnvelopeError> {
        match self.request.kind.trim() {
            "" => Err(EnvelopeError::MissingRequestType),
            LAUNCH_REQUEST => Ok(Request::Launch),
            SESSION_ENDED_REQUEST => Ok(Request::SessionEnded),
            INTENT_REQUEST => {
                let name = self
                    .request
                    .intent
                    .as_ref()
                    .map(|intent| intent.name.trim())
                    .filter(|name| !name.is_empty())
                    .ok_or(EnvelopeError::MissingIntentName)?;
                Ok(Request::intent(name))
            }
            other => Err(EnvelopeError::unsupported(other)),
        }
    }
}
