//! Reddit content locator.
//!
//! Fetches the "top of the last 24 hours" listing for a subreddit and picks
//! the first entry that resolves to fetchable video. Locator failures are
//! plain errors; deciding whether they abort the run is the orchestrator's
//! job, not this crate's.

pub mod client;
pub mod error;
pub mod listing;

pub use client::RedditClient;
pub use error::{RedditError, RedditResult};
