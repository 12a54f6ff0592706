//! Auth API client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server rejected request: {status} - {message}")]
    Rejected { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AuthError {
    /// True when the request never reached the server (connect failure,
    /// timeout, DNS). Distinguishes "cannot reach server" from a rejection.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, AuthError::Http(e) if e.is_connect() || e.is_timeout() || e.is_request())
    }

    /// The server-supplied rejection message, if any.
    ///
    /// Server text is opaque; callers surface it verbatim against the
    /// relevant field rather than parsing it into structured kinds.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AuthError::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }
}
