//! Listing client.

use std::time::Duration;

use tracing::debug;
use vpost_models::Candidate;

use crate::error::{RedditError, RedditResult};
use crate::listing::Listing;

const DEFAULT_BASE_URL: &str = "https://www.reddit.com";

/// Per-request timeout. The locator must never block longer than this.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Read-only client for subreddit top listings.
#[derive(Debug, Clone)]
pub struct RedditClient {
    http: reqwest::Client,
    base_url: String,
}

impl RedditClient {
    /// Create a client with the given User-Agent. Reddit throttles the
    /// default library agent aggressively, so callers always pass one.
    pub fn new(user_agent: &str) -> RedditResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different host. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch the top listing of the last day for `subreddit` and return the
    /// first qualifying video, in listed (descending rank) order.
    ///
    /// `Ok(None)` means the page had no qualifying item. Errors are returned
    /// as-is; no retry happens here.
    pub async fn top_video(
        &self,
        subreddit: &str,
        limit: u32,
    ) -> RedditResult<Option<Candidate>> {
        let url = format!("{}/r/{}/top.json", self.base_url, subreddit);
        let limit = limit.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[("t", "day"), ("limit", limit.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RedditError::Status {
                subreddit: subreddit.to_string(),
                status,
            });
        }

        let listing: Listing = response.json().await?;
        debug!(
            subreddit,
            entries = listing.data.children.len(),
            "fetched top listing"
        );

        for child in listing.data.children {
            let post = child.data;
            if let Some(media_url) = post.media_link().url() {
                debug!(subreddit, title = %post.title, "qualifying video found");
                return Ok(Some(Candidate::new(post.title, media_url)));
            }
        }

        Ok(None)
    }
}
