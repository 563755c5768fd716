//! Errors raised while decoding envelopes and validating responses.

use thiserror::Error;

/// Errors surfaced while parsing or normalizing a request envelope.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The payload was empty or not valid JSON for the envelope schema.
    #[error("malformed request envelope: {message}")]
    Malformed {
        /// Human-readable description of the failure.
        message: String,
        /// Underlying JSON error, when one exists.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The request body carries no `type` discriminant.
    #[error("request type is missing")]
    MissingRequestType,

    /// The request type is valid on the platform but not handled here.
    #[error("unsupported request type: {request_type}")]
    UnsupportedRequestType {
        /// Wire value of the `type` field.
        request_type: String,
    },

    /// An `IntentRequest` arrived without a usable intent name.
    #[error("intent request is missing an intent name")]
    MissingIntentName,
}

impl EnvelopeError {
    /// Creates a malformed envelope error from a serde error.
    #[must_use]
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::Malformed {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates a malformed envelope error with a custom message.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an unsupported request type error.
    #[must_use]
    pub fn unsupported(request_type: impl Into<String>) -> Self {
        Self::UnsupportedRequestType {
            request_type: request_type.into(),
        }
    }
}

/// Reasons a [`crate::Response`] is rejected as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    /// Speech was set but contains no text.
    #[error("speech text is blank")]
    BlankSpeech,

    /// Reprompt was set but contains no text.
    #[error("reprompt text is blank")]
    BlankReprompt,

    /// A card was attached without a title.
    #[error("card title is blank")]
    BlankCardTitle,

    /// A reprompt only makes sense after the skill has spoken.
    #[error("reprompt set without speech")]
    RepromptWithoutSpeech,
}
