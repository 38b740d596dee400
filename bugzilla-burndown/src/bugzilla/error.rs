//! Bugzilla fetch error types.

use thiserror::Error;

/// Errors that can occur while fetching bugs from Bugzilla.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured Bugzilla URL cannot be used to build a request.
    #[error("Invalid Bugzilla URL: {0}")]
    Url(#[from] url::ParseError),

    /// Non-success HTTP status without a Bugzilla error body.
    #[error("Bugzilla returned HTTP {status}")]
    Status { status: u16 },

    /// Bugzilla reported an error, e.g. an unknown search field.
    #[error("Bugzilla error{}: {message}", display_code(.code))]
    Api { code: Option<i64>, message: String },

    /// The response body was not a bug search result.
    #[error("Failed to decode Bugzilla response: {0}")]
    Decode(#[from] serde_json::Error),
}

fn display_code(code: &Option<i64>) -> String {
    code.map(|code| format!(" {code}")).unwrap_or_default()
}
