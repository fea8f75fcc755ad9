//! Shared data models for the vpost pipeline.
//!
//! This crate provides:
//! - Candidate items produced by the content locator
//! - Tagged classification of listing URLs into playable media links
//! - Caption formatting with the platform length cap

pub mod candidate;
pub mod caption;
pub mod media_link;

pub use candidate::{Candidate, RunOutcome};
pub use caption::{build_caption, truncate_caption, MAX_CAPTION_CHARS};
pub use media_link::MediaLink;
