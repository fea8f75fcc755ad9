//! Bot configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use vpost_twitter::Credentials;

use crate::error::{BotError, BotResult};

const DEFAULT_SOURCES: &[&str] = &["funny", "memes", "aww", "nextfuckinglevel", "dankvideos"];
const DEFAULT_FALLBACK_SOURCES: &[&str] = &["videos", "Unexpected", "ContagiousLaughter"];

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Publishing credentials. All four are required.
    pub credentials: Credentials,
    /// User-Agent for listing queries.
    pub user_agent: String,
    /// Primary source pool, scanned in lineup order.
    pub primary_sources: Vec<String>,
    /// Fallback pool, scanned only when the primary lineup is exhausted.
    pub fallback_sources: Vec<String>,
    /// Listing page size per source.
    pub listing_limit: u32,
    /// Pause between source-search attempts.
    pub search_delay: Duration,
    /// Directory for transient artifacts.
    pub work_dir: PathBuf,
}

impl BotConfig {
    /// Read configuration from the environment. Fails before any network
    /// activity when a publishing credential is missing.
    pub fn from_env() -> BotResult<Self> {
        let credentials = Credentials {
            consumer_key: require_env("TW_CONSUMER_KEY")?,
            consumer_secret: require_env("TW_CONSUMER_SECRET")?,
            access_token: require_env("TW_ACCESS_TOKEN")?,
            access_secret: require_env("TW_ACCESS_SECRET")?,
        };
        Ok(Self {
            credentials,
            user_agent: std::env::var("VPOST_USER_AGENT")
                .unwrap_or_else(|_| "vpost/0.1 (video repost bot)".to_string()),
            primary_sources: env_list("VPOST_SOURCES", DEFAULT_SOURCES),
            fallback_sources: env_list("VPOST_FALLBACK_SOURCES", DEFAULT_FALLBACK_SOURCES),
            listing_limit: env_parsed("VPOST_LISTING_LIMIT", 5),
            search_delay: Duration::from_secs(env_parsed("VPOST_SEARCH_DELAY_SECS", 2)),
            work_dir: std::env::var("VPOST_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/tmp/vpost")),
        })
    }
}

fn require_env(name: &'static str) -> BotResult<String> {
    match std::env::var(name) {
        Ok(v) if !v.is_empty() => Ok(v),
        _ => Err(BotError::config(format!(
            "missing required environment variable {name}"
        ))),
    }
}

fn env_list(name: &str, default: &[&str]) -> Vec<String> {
    match std::env::var(name) {
        Ok(raw) => {
            let list: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            if list.is_empty() {
                default.iter().map(|s| s.to_string()).collect()
            } else {
                list
            }
        }
        Err(_) => default.iter().map(|s| s.to_string()).collect(),
    }
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
