//! Shared request and response types for the Chime skill runtime.
//!
//! The crate defines the normalized [`Request`] and [`Response`] values that
//! the dispatcher works with, together with the platform wire envelopes that
//! adapters parse and emit. Converting between the two layers lives here so
//! every adapter applies the same normalization rules.

mod error;
mod request;
mod response;

pub use error::{EnvelopeError, ResponseError};
pub use request::{
    Application, Context, INTENT_REQUEST, Intent, LAUNCH_REQUEST, Request, RequestBody,
    RequestEnvelope, SESSION_ENDED_REQUEST, Session, Slot, SystemState,
};
pub use response::{
    Card, CardBody, FORMAT_VERSION, OutputSpeech, Reprompt, Response, ResponseBody,
    ResponseEnvelope,
};
