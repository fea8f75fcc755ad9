//! Error types for listing queries.

use thiserror::Error;

pub type RedditResult<T> = Result<T, RedditError>;

#[derive(Debug, Error)]
pub enum RedditError {
    #[error("listing request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("listing for r/{subreddit} returned HTTP {status}")]
    Status {
        subreddit: String,
        status: reqwest::StatusCode,
    },
}
