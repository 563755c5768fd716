//! Handlers for intent requests.

use chime_types::{Request, Response};

use super::{
    FALLBACK_SPEECH, GOODBYE_SPEECH, HELLO_SPEECH, HELP_SPEECH, TellTimeSettings, finish, intent,
    prompting, spoken,
};
use crate::dispatch::Handler;
use crate::dispatch::predicate::{intent_name, intent_name_in};

pub(super) fn hello_world() -> Handler {
    Handler::new("hello-world", intent_name(intent::HELLO_WORLD), |_: &Request| {
        finish(spoken(HELLO_SPEECH))
    })
}

pub(super) fn help() -> Handler {
    Handler::new("help", intent_name(intent::HELP), |_: &Request| {
        finish(prompting(HELP_SPEECH))
    })
}

pub(super) fn cancel_and_stop() -> Handler {
    Handler::new(
        "cancel-and-stop",
        intent_name_in([intent::STOP, intent::CANCEL]),
        |_: &Request| {
            finish(Response {
                should_end_session: Some(true),
                ..spoken(GOODBYE_SPEECH)
            })
        },
    )
}

pub(super) fn fallback() -> Handler {
    Handler::new("fallback", intent_name(intent::FALLBACK), |_: &Request| {
        finish(prompting(FALLBACK_SPEECH))
    })
}

pub(super) fn tell_time(settings: TellTimeSettings) -> Handler {
    let TellTimeSettings { intent, speech } = settings;
    Handler::new("tell-time", intent_name(intent), move |_: &Request| {
        finish(spoken(&speech))
    })
}
