//! Publisher error types.

use thiserror::Error;

pub type TwitterResult<T> = Result<T, TwitterError>;

#[derive(Debug, Error)]
pub enum TwitterError {
    #[error("publish request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("publish endpoint returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("request signing failed: {0}")]
    Signing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
