//! Structured responses and the platform response envelope.
//!
//! Handlers return a plain [`Response`] value built with named fields. The
//! adapter converts it into a [`ResponseEnvelope`], which is where speech is
//! wrapped in SSML and cards gain their wire `type` tag.

use serde::{Deserialize, Serialize};

use crate::error::ResponseError;

/// Response envelope format version emitted by this crate.
pub const FORMAT_VERSION: &str = "1.0";

const SPEAK_OPEN: &str = "<speak>";
const SPEAK_CLOSE: &str = "</speak>";

/// Structured output produced by a handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// Text spoken to the user.
    pub speech: Option<String>,
    /// Card shown in the companion app.
    pub card: Option<Card>,
    /// Text spoken if the user stays silent after `speech`.
    pub reprompt: Option<String>,
    /// Whether the platform should close the session; `None` leaves it to
    /// the platform default.
    pub should_end_session: Option<bool>,
}

/// Simple companion-app card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Card title.
    pub title: String,
    /// Card body text.
    pub content: String,
}

impl Card {
    /// Creates a simple card.
    #[must_use]
    pub fn simple(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

impl Response {
    /// Creates a response with no content.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` when the response explicitly closes the session.
    #[must_use]
    pub fn ends_session(&self) -> bool {
        self.should_end_session.unwrap_or(false)
    }

    /// Checks the response for malformed content and returns it unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`ResponseError`] when speech, reprompt or card title are
    /// blank, or when a reprompt is set without speech.
    pub fn validated(self) -> Result<Self, ResponseError> {
        if self.speech.as_deref().is_some_and(is_blank) {
            return Err(ResponseError::BlankSpeech);
        }
        if self.reprompt.as_deref().is_some_and(is_blank) {
            return Err(ResponseError::BlankReprompt);
        }
        if self.reprompt.is_some() && self.speech.is_none() {
            return Err(ResponseError::RepromptWithoutSpeech);
        }
        if self.card.as_ref().is_some_and(|card| is_blank(&card.title)) {
            return Err(ResponseError::BlankCardTitle);
        }
        Ok(self)
    }
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Response envelope returned to the voice platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Envelope format version.
    pub version: String,
    /// The response body.
    pub response: ResponseBody,
}

/// Response body of the envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    /// Speech output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    /// Companion-app card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<CardBody>,
    /// Reprompt speech.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    /// Session termination flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

/// Speech payload on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    /// Speech Synthesis Markup Language payload.
    #[serde(rename = "SSML")]
    Ssml {
        /// Markup wrapped in a `speak` element.
        ssml: String,
    },
    /// Unmarked text.
    PlainText {
        /// Text to speak.
        text: String,
    },
}

impl OutputSpeech {
    /// Wraps text in a `speak` element, trimming an existing wrapper first.
    #[must_use]
    pub fn ssml(text: &str) -> Self {
        Self::Ssml {
            ssml: format!("{SPEAK_OPEN}{}{SPEAK_CLOSE}", strip_speak(text)),
        }
    }

    /// Returns the spoken text without SSML wrapper tags.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Ssml { ssml } => strip_speak(ssml),
            Self::PlainText { text } => text,
        }
    }
}

/// Card payload on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CardBody {
    /// Title and text card.
    Simple {
        /// Card title.
        title: String,
        /// Card body text.
        content: String,
    },
}

/// Reprompt payload on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    /// Speech played as the reprompt.
    pub output_speech: OutputSpeech,
}

impl ResponseEnvelope {
    /// Encodes a handler response for the wire.
    #[must_use]
    pub fn from_response(response: &Response) -> Self {
        let body = ResponseBody {
            output_speech: response.speech.as_deref().map(OutputSpeech::ssml),
            card: response.card.as_ref().map(|card| CardBody::Simple {
                title: card.title.clone(),
                content: card.content.clone(),
            }),
            reprompt: response.reprompt.as_deref().map(|text| Reprompt {
                output_speech: OutputSpeech::ssml(text),
            }),
            should_end_session: response.should_end_session,
        };
        Self {
            version: FORMAT_VERSION.to_owned(),
            response: body,
        }
    }

    /// Returns the spoken text of the response, if any.
    #[must_use]
    pub fn speech_text(&self) -> Option<&str> {
        self.response.output_speech.as_ref().map(OutputSpeech::text)
    }
}

/// Removes one outer `speak` element and surrounding whitespace.
fn strip_speak(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix(SPEAK_OPEN)
        .and_then(|rest| rest.strip_suffix(SPEAK_CLOSE))
        .map_or(trimmed, str::trim)
}
