//! Pipeline orchestrator.
//!
//! Linear state machine for one run: compute the lineup, scan sources for a
//! candidate (primary pool, then fallback), download it, normalize it,
//! publish it, and delete local artifacts on every path out. This is the
//! only place that decides between fallback and abort; the component crates
//! just report success or failure.

use std::path::Path;

use chrono::{Timelike, Utc};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use vpost_media::{download_to, remove_if_exists, Transcoder};
use vpost_models::{build_caption, Candidate, RunOutcome};
use vpost_reddit::RedditClient;
use vpost_twitter::TwitterClient;

use crate::config::BotConfig;
use crate::error::{BotError, BotResult};
use crate::rotation;

pub struct Pipeline {
    config: BotConfig,
    reddit: RedditClient,
    twitter: TwitterClient,
    transcoder: Transcoder,
    http: reqwest::Client,
}

impl Pipeline {
    /// Build the pipeline from configuration, detecting ffmpeg in PATH.
    pub fn new(config: BotConfig) -> BotResult<Self> {
        let reddit = RedditClient::new(&config.user_agent)?;
        let twitter = TwitterClient::new(config.credentials.clone())?;
        Ok(Self {
            config,
            reddit,
            twitter,
            transcoder: Transcoder::detect(),
            http: reqwest::Client::new(),
        })
    }

    /// Build the pipeline from pre-built components. Used by tests to point
    /// every client at stub endpoints.
    pub fn with_components(
        config: BotConfig,
        reddit: RedditClient,
        twitter: TwitterClient,
        transcoder: Transcoder,
    ) -> Self {
        Self {
            config,
            reddit,
            twitter,
            transcoder,
            http: reqwest::Client::new(),
        }
    }

    /// Execute one full run.
    pub async fn run(&self) -> BotResult<RunOutcome> {
        let now = Utc::now();
        let lineup = rotation::lineup_for(
            &self.config.primary_sources,
            now.date_naive(),
            now.hour(),
        );
        info!(?lineup, "computed today's lineup");

        let found = match self.search(&lineup, 0).await {
            Some(hit) => Some(hit),
            None => {
                info!("primary lineup exhausted, scanning fallback sources");
                self.search(&self.config.fallback_sources, lineup.len())
                    .await
            }
        };
        let Some((source, candidate)) = found else {
            info!("all sources exhausted, nothing to post");
            return Ok(RunOutcome::Exhausted);
        };

        let run_id = Uuid::new_v4();
        let raw = self.config.work_dir.join(format!("raw-{run_id}.mp4"));
        let ready = self.config.work_dir.join(format!("ready-{run_id}.mp4"));

        let result = self.execute(&source, &candidate, &raw, &ready).await;

        // Cleanup runs on every path, success or failure, and never fails.
        remove_if_exists(&raw).await;
        remove_if_exists(&ready).await;

        match &result {
            Ok(RunOutcome::Posted { source, post_id, .. }) => {
                info!(source = %source, post_id = %post_id, "run finished: posted");
            }
            Ok(RunOutcome::Exhausted) => {}
            Err(e) => error!(error = %e, "run finished: failed"),
        }
        result
    }

    /// Scan sources in order, pausing between attempts. `prior_attempts`
    /// keeps the pause in effect across the primary/fallback boundary.
    /// Locator errors are logged and treated identically to "no match".
    async fn search(
        &self,
        sources: &[String],
        prior_attempts: usize,
    ) -> Option<(String, Candidate)> {
        for (i, source) in sources.iter().enumerate() {
            if prior_attempts + i > 0 {
                tokio::time::sleep(self.config.search_delay).await;
            }
            match self
                .reddit
                .top_video(source, self.config.listing_limit)
                .await
            {
                Ok(Some(candidate)) => {
                    info!(source = %source, title = %candidate.title, "candidate found");
                    return Some((source.clone(), candidate));
                }
                Ok(None) => debug!(source = %source, "no qualifying video"),
                Err(e) => {
                    warn!(source = %source, error = %e, "source query failed, treating as no match");
                }
            }
        }
        None
    }

    async fn execute(
        &self,
        source: &str,
        candidate: &Candidate,
        raw: &Path,
        ready: &Path,
    ) -> BotResult<RunOutcome> {
        tokio::fs::create_dir_all(&self.config.work_dir)
            .await
            .map_err(|e| BotError::Download(e.into()))?;

        download_to(&self.http, &candidate.media_url, raw)
            .await
            .map_err(BotError::Download)?;

        self.transcoder
            .normalize(raw, ready)
            .await
            .map_err(BotError::Transcode)?;

        let caption = build_caption(source, &candidate.title);
        let media_id = self.twitter.upload_media(ready).await?;
        let post_id = self.twitter.create_post(&caption, &media_id).await?;

        Ok(RunOutcome::Posted {
            source: source.to_string(),
            title: candidate.title.clone(),
            post_id,
        })
    }
}
