//! Layered configuration shared by the Chime binaries.
//!
//! Values resolve from built-in defaults, then an optional TOML file, then
//! `CHIME_*` environment variables, then command-line flags. Each later
//! source overrides the earlier ones field by field.

mod defaults;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_TELL_TIME_INTENT, DEFAULT_TELL_TIME_SPEECH, default_log_filter,
    default_log_filter_string, default_log_format, default_tell_time_intent,
    default_tell_time_speech,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved skill configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "CHIME")]
pub struct Config {
    /// `tracing` filter expression applied to log output.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for log lines.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Skill ID that inbound requests must target; unset disables the check.
    pub skill_id: Option<String>,
    /// Answer dispatch failures with a generic apology instead of failing.
    ///
    /// Unset defers to lower layers and finally to `false`.
    pub recover_errors: Option<bool>,
    /// Intent name routed to the tell-time handler.
    #[ortho_config(default = default_tell_time_intent())]
    pub tell_time_intent: String,
    /// Speech returned by the tell-time handler.
    #[ortho_config(default = default_tell_time_speech())]
    pub tell_time_speech: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            skill_id: None,
            recover_errors: None,
            tell_time_intent: default_tell_time_intent(),
            tell_time_speech: default_tell_time_speech(),
        }
    }
}

impl Config {
    /// Filter expression for the tracing subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Output format for the tracing subscriber.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Expected skill ID, when verification is enabled.
    #[must_use]
    pub fn skill_id(&self) -> Option<&str> {
        self.skill_id.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// Whether dispatch failures are answered with a generic response.
    #[must_use]
    pub fn recover_errors(&self) -> bool {
        self.recover_errors.unwrap_or(false)
    }

    /// Intent name routed to the tell-time handler.
    #[must_use]
    pub fn tell_time_intent(&self) -> &str {
        &self.tell_time_intent
    }

    /// Speech returned by the tell-time handler.
    #[must_use]
    pub fn tell_time_speech(&self) -> &str {
        &self.tell_time_speech
    }
}
