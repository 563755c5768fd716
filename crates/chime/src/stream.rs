//! Byte-stream adapter: one request envelope in, one response envelope out.

use std::io::{self, Read, Write};

use chime_types::{EnvelopeError, RequestEnvelope, ResponseEnvelope};
use thiserror::Error;
use tracing::debug;

use crate::skill::{Skill, SkillError};

/// Tracing target for stream handling.
const STREAM_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::stream");

/// Largest request payload accepted, in bytes.
pub const MAX_REQUEST_BYTES: usize = 1024 * 1024;

/// Errors surfaced while handling a request stream.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The payload exceeded [`MAX_REQUEST_BYTES`].
    #[error("request payload exceeds {max_size} bytes")]
    RequestTooLarge {
        /// Maximum accepted payload size.
        max_size: usize,
    },
    /// The payload was not a valid request envelope.
    #[error("malformed request: {0}")]
    MalformedRequest(#[source] EnvelopeError),
    /// The skill rejected or failed to handle the request.
    #[error(transparent)]
    Skill(#[from] SkillError),
    /// Reading the request or writing the response failed.
    #[error("stream I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The response envelope could not be serialized.
    #[error("failed to serialize response: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl StreamError {
    /// Process exit status for this failure.
    ///
    /// Request and dispatch problems map to `1`; transport problems to `2`.
    #[must_use]
    pub const fn exit_status(&self) -> u8 {
        match self {
            Self::RequestTooLarge { .. } | Self::MalformedRequest(_) | Self::Skill(_) => 1,
            Self::Io(_) | Self::Serialize(_) => 2,
        }
    }
}

/// Reads one envelope, invokes the skill and writes the response.
#[derive(Debug, Clone)]
pub struct StreamHandler {
    skill: Skill,
}

impl StreamHandler {
    /// Wraps a skill.
    #[must_use]
    pub const fn new(skill: Skill) -> Self {
        Self { skill }
    }

    /// Handles the request read from `reader`, writing the response as one
    /// JSON line to `writer`.
    ///
    /// # Errors
    ///
    /// Returns a [`StreamError`] when the payload is oversized or malformed,
    /// when the skill fails, or when I/O or serialization fails.
    pub fn handle<R, W>(&self, reader: R, mut writer: W) -> Result<ResponseEnvelope, StreamError>
    where
        R: Read,
        W: Write,
    {
        let payload = read_bounded(reader)?;
        debug!(target: STREAM_TARGET, bytes = payload.len(), "request read");

        let envelope = RequestEnvelope::parse(&payload).map_err(StreamError::MalformedRequest)?;
        let response = self.skill.invoke(&envelope)?;

        serde_json::to_writer(&mut writer, &response).map_err(|error| {
            if error.is_io() {
                StreamError::Io(io::Error::from(error))
            } else {
                StreamError::Serialize(error)
            }
        })?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        debug!(target: STREAM_TARGET, "response written");
        Ok(response)
    }
}

fn read_bounded<R: Read>(reader: R) -> Result<Vec<u8>, StreamError> {
    let limit = u64::try_from(MAX_REQUEST_BYTES).unwrap_or(u64::MAX);
    let mut payload = Vec::new();
    reader.take(limit.saturating_add(1)).read_to_end(&mut payload)?;
    if payload.len() > MAX_REQUEST_BYTES {
        return Err(StreamError::RequestTooLarge {
            max_size: MAX_REQUEST_BYTES,
        });
    }
    Ok(payload)
}
