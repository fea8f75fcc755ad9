//! Run-level error taxonomy.
//!
//! Source-query failures never appear here: the orchestrator downgrades them
//! to "no match" on the spot. Everything below is fatal to the run (cleanup
//! still happens).

use thiserror::Error;

pub type BotResult<T> = Result<T, BotError>;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("locator client error: {0}")]
    Reddit(#[from] vpost_reddit::RedditError),

    #[error("download failed: {0}")]
    Download(vpost_media::MediaError),

    #[error("transcode failed: {0}")]
    Transcode(vpost_media::MediaError),

    #[error("publish failed: {0}")]
    Publish(#[from] vpost_twitter::TwitterError),
}

impl BotError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
