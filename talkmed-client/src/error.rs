use std::result;

use thiserror::Error;

/// Error types for TalkMED search operations
#[derive(Error, Debug)]
pub enum TalkMedError {
    /// User-supplied input could not be used (empty keyword, non-numeric id)
    #[error("Invalid argument: {0}")]
    Validation(String),

    /// Network failure or timeout while talking to the provider
    #[error("{}", describe_transport(.0))]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success HTTP status
    #[error("API error {status}: {message}")]
    Provider { status: u16, message: String },

    /// The provider answered, but not with a usable search payload
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// JSON decoding of the provider body failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading commands or writing output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = result::Result<T, TalkMedError>;

fn describe_transport(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "Request timed out, please try again later".to_string()
    } else if err.is_connect() {
        "Unable to reach the TalkMED server, please check your network connection".to_string()
    } else {
        format!("HTTP request failed: {err}")
    }
}

impl TalkMedError {
    /// Whether the failure happened on the way to the provider rather than in its answer
    pub fn is_transport(&self) -> bool {
        matches!(self, TalkMedError::Transport(_))
    }

    /// Whether the provider itself reported a failure or returned something unusable
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            TalkMedError::Provider { .. } | TalkMedError::MalformedResponse(_) | TalkMedError::Json(_)
        )
    }

    /// Short category label used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            TalkMedError::Validation(_) => "Invalid input",
            TalkMedError::Transport(err) if err.is_timeout() => "Request timeout",
            TalkMedError::Transport(err) if err.is_connect() => "Connection error",
            TalkMedError::Transport(_) => "Network error",
            TalkMedError::Provider { .. } => "Provider error",
            TalkMedError::MalformedResponse(_) | TalkMedError::Json(_) => "Invalid response",
            TalkMedError::Io(_) => "I/O error",
        }
    }
}
