//! Twitter/X publisher.
//!
//! Two calls, no retries: upload the media file to obtain a media id, then
//! create a post referencing it. Requests are signed with OAuth 1.0a
//! user context (HMAC-SHA1).

pub mod auth;
pub mod client;
pub mod error;

pub use auth::{Credentials, OAuth1};
pub use client::TwitterClient;
pub use error::{TwitterError, TwitterResult};
