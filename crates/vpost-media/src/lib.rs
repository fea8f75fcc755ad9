//! Media retrieval and normalization.
//!
//! This crate provides:
//! - Streaming download of a media URL to local disk
//! - FFmpeg re-encode to a delivery-compatible format, with a pass-through
//!   copy when ffmpeg is absent
//! - Best-effort artifact removal

pub mod download;
pub mod error;
pub mod fs_utils;
pub mod transcode;

pub use download::download_to;
pub use error::{MediaError, MediaResult};
pub use fs_utils::remove_if_exists;
pub use transcode::{FfmpegCommand, Transcoder};
