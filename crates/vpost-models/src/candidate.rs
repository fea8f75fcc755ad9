//! Candidate items and run outcomes.

use serde::{Deserialize, Serialize};

/// A qualifying listing entry: title plus a resolved, directly fetchable
/// media URL. Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Post title, as listed by the source.
    pub title: String,
    /// Direct media URL to download.
    pub media_url: String,
}

impl Candidate {
    pub fn new(title: impl Into<String>, media_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            media_url: media_url.into(),
        }
    }
}

/// Terminal state of a single pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// A candidate was found, downloaded, and published.
    Posted {
        /// Source the candidate came from.
        source: String,
        /// Title of the published post.
        title: String,
        /// Post id returned by the publishing endpoint.
        post_id: String,
    },
    /// Every source in both pools was scanned without a match.
    /// Nothing was downloaded or posted; the run ends cleanly.
    Exhausted,
}
