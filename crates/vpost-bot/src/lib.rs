//! Single-run video repost bot.
//!
//! This crate provides:
//! - Environment configuration with fail-fast credential checks
//! - The deterministic rotation selector
//! - The pipeline orchestrator (search, download, normalize, publish,
//!   unconditional cleanup)

pub mod config;
pub mod error;
pub mod pipeline;
pub mod rotation;

pub use config::BotConfig;
pub use error::{BotError, BotResult};
pub use pipeline::Pipeline;
