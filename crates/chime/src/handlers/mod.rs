//! The standard hello-world handler set.
//!
//! [`standard`] returns the handlers in precedence order. Every action is a
//! pure function of the request and attaches a simple card titled
//! [`CARD_TITLE`] whose body repeats the speech.

mod intents;
mod session;

use chime_config::Config;
use chime_types::{Card, Response};

use crate::dispatch::{Handler, HandlerError};

/// Title shared by every card the standard handlers emit.
pub const CARD_TITLE: &str = "HelloWorld";
/// Launch greeting, also used as its reprompt.
pub const WELCOME_SPEECH: &str = "Welcome to the Alexa Skills Kit, you can say hello";
/// Reply to the hello-world intent.
pub const HELLO_SPEECH: &str = "Hello world";
/// Help reply, also used as its reprompt.
pub const HELP_SPEECH: &str = "You can say hello to me!";
/// Farewell for cancel and stop.
pub const GOODBYE_SPEECH: &str = "Goodbye";
/// Fallback reply, also used as its reprompt.
pub const FALLBACK_SPEECH: &str = "Sorry, I don't know that. You can say try saying help!";

/// Intent names recognised by the standard handlers.
pub mod intent {
    /// Custom greeting intent.
    pub const HELLO_WORLD: &str = "HelloWorldIntent";
    /// Built-in help intent.
    pub const HELP: &str = "AMAZON.HelpIntent";
    /// Built-in stop intent.
    pub const STOP: &str = "AMAZON.StopIntent";
    /// Built-in cancel intent.
    pub const CANCEL: &str = "AMAZON.CancelIntent";
    /// Built-in fallback intent.
    pub const FALLBACK: &str = "AMAZON.FallbackIntent";
}

/// Configuration consumed by the tell-time handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TellTimeSettings {
    /// Intent name the handler answers.
    pub intent: String,
    /// Speech returned for that intent.
    pub speech: String,
}

impl TellTimeSettings {
    /// Reads the tell-time settings from the resolved configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            intent: config.tell_time_intent().to_owned(),
            speech: config.tell_time_speech().to_owned(),
        }
    }
}

impl Default for TellTimeSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Builds the standard handlers in precedence order.
#[must_use]
pub fn standard(tell_time: TellTimeSettings) -> Vec<Handler> {
    vec![
        session::launch(),
        intents::hello_world(),
        intents::help(),
        intents::cancel_and_stop(),
        intents::fallback(),
        session::session_ended(),
        intents::tell_time(tell_time),
    ]
}

/// Speech plus a matching card.
fn spoken(text: &str) -> Response {
    Response {
        speech: Some(text.to_owned()),
        card: Some(Card::simple(CARD_TITLE, text)),
        ..Response::empty()
    }
}

/// Speech, card and a reprompt repeating the speech; keeps the session open.
fn prompting(text: &str) -> Response {
    Response {
        reprompt: Some(text.to_owned()),
        should_end_session: Some(false),
        ..spoken(text)
    }
}

fn finish(response: Response) -> Result<Response, HandlerError> {
    response.validated().map_err(HandlerError::from)
}
