use crate::logging::LogFormat;

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Intent name routed to the tell-time handler unless overridden.
pub const DEFAULT_TELL_TIME_INTENT: &str = "TellTimeIntent";

/// Speech returned by the tell-time handler unless overridden.
pub const DEFAULT_TELL_TIME_SPEECH: &str = "Telling the time is not set up for this skill yet.";

/// Default log filter expression used by the binaries.
#[must_use]
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binaries.
#[must_use]
pub fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Owned default tell-time intent name.
#[must_use]
pub fn default_tell_time_intent() -> String {
    DEFAULT_TELL_TIME_INTENT.to_owned()
}

/// Owned default tell-time speech.
#[must_use]
pub fn default_tell_time_speech() -> String {
    DEFAULT_TELL_TIME_SPEECH.to_owned()
}
