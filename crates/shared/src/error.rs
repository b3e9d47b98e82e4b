//! Client-side API errors and the mapping from error bodies to form text.

use serde::Deserialize;

/// Shown when a request never produced an HTTP response.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

/// API error type for client-side use
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

impl ApiError {
    /// Whether the server answered at all.
    pub fn has_response(&self) -> bool {
        matches!(self, ApiError::Http { .. })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<Detail>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Detail {
    Text(String),
    // Validation failures: `[{"loc": [...], "msg": "...", "type": "..."}]`
    Items(Vec<DetailItem>),
}

#[derive(Deserialize)]
struct DetailItem {
    msg: String,
}

/// Extract the `detail` field of a JSON error body.
///
/// A validation-style list yields its first `msg`. Blank strings count as absent.
pub fn try_error_detail(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok()?;
    let text = match parsed.detail? {
        Detail::Text(text) => text,
        Detail::Items(items) => items.into_iter().next()?.msg,
    };
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Text a form shows for a failed submission.
///
/// The server's `detail` wins; a response without one falls back to
/// `fallback`; no response at all yields [`UNEXPECTED_ERROR`].
pub fn form_error_message(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::Http { body, .. } => try_error_detail(body).unwrap_or_else(|| fallback.to_string()),
        ApiError::Network(_) | ApiError::Deserialize(_) => UNEXPECTED_ERROR.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_is_shown_verbatim() {
        let err = ApiError::Http {
            status: 401,
            body: r#"{"detail":"Incorrect email or password"}"#.to_string(),
        };
        assert_eq!(form_error_message(&err, "Login failed."), "Incorrect email or password");
    }

    #[test]
    fn response_without_detail_uses_fallback() {
        let err = ApiError::Http { status: 500, body: "Internal Server Error".to_string() };
        assert_eq!(form_error_message(&err, "Login failed."), "Login failed.");

        let blank = ApiError::Http { status: 400, body: r#"{"detail":"  "}"#.to_string() };
        assert_eq!(form_error_message(&blank, "Registration failed."), "Registration failed.");
    }

    #[test]
    fn no_response_uses_generic_message() {
        let err = ApiError::Network("connection refused".to_string());
        assert!(!err.has_response());
        assert_eq!(form_error_message(&err, "Login failed."), UNEXPECTED_ERROR);
    }

    #[test]
    fn validation_list_yields_first_msg() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"field required","type":"missing"}]}"#;
        assert_eq!(try_error_detail(body).as_deref(), Some("field required"));
    }
}
