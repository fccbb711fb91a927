//! Error type shared by both moderation pipelines.

use thiserror::Error;

/// Errors that can end a single pipeline invocation.
///
/// Every variant is terminal for the invocation that produced it: nothing is
/// retried and there is no partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// The backend could not be reached or refused the call (transport
    /// failure, timeout, invalid credentials, exhausted quota).
    #[error("backend request failed: {0}")]
    Backend(String),

    /// The backend answered, but its reply does not have the expected shape.
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    /// Build a [`AnalysisError::Backend`] from a non-success HTTP status.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let body = body.trim();
        if body.is_empty() {
            AnalysisError::Backend(format!("HTTP {status}"))
        } else {
            AnalysisError::Backend(format!("HTTP {status}: {body}"))
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AnalysisError::Backend("request timed out".into())
        } else if e.is_decode() {
            AnalysisError::MalformedResponse(e.to_string())
        } else {
            AnalysisError::Backend(e.to_string())
        }
    }
}
