//! Handlers for session lifecycle requests.

use chime_types::{Request, Response};

use super::{WELCOME_SPEECH, finish, prompting};
use crate::dispatch::Handler;
use crate::dispatch::predicate::{is_launch, is_session_ended};

pub(super) fn launch() -> Handler {
    Handler::new("launch", is_launch, |_: &Request| {
        finish(prompting(WELCOME_SPEECH))
    })
}

/// Nothing may be spoken once the platform has closed the session.
pub(super) fn session_ended() -> Handler {
    Handler::new("session-ended", is_session_ended, |_: &Request| {
        finish(Response {
            should_end_session: Some(true),
            ..Response::empty()
        })
    })
}
