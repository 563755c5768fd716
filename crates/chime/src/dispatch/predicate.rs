//! Reusable handler predicates.

use chime_types::Request;

/// Matches launch requests.
pub fn is_launch(request: &Request) -> bool {
    matches!(request, Request::Launch)
}

/// Matches session-ended requests.
pub fn is_session_ended(request: &Request) -> bool {
    matches!(request, Request::SessionEnded)
}

/// Matches intent requests for exactly `name`.
pub fn intent_name(name: impl Into<String>) -> impl Fn(&Request) -> bool + Send + Sync + 'static {
    let name = name.into();
    move |request: &Request| request.intent_name() == Some(name.as_str())
}

/// Matches intent requests for any of `names`.
pub fn intent_name_in<I, S>(names: I) -> impl Fn(&Request) -> bool + Send + Sync + 'static
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: Vec<String> = names.into_iter().map(Into::into).collect();
    move |request: &Request| {
        request
            .intent_name()
            .is_some_and(|intent| names.iter().any(|name| name == intent))
    }
}
