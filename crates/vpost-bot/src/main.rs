//! vpost binary: one run of the repost pipeline.

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vpost_bot::{BotConfig, Pipeline};
use vpost_models::RunOutcome;

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Load environment variables
    dotenvy::dotenv().ok();

    // Colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("vpost_bot=info,vpost_reddit=info,vpost_media=info,vpost_twitter=info")
    });

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("starting vpost run");

    let config = match BotConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let pipeline = match Pipeline::new(config) {
        Ok(p) => p,
        Err(e) => {
            error!("failed to build pipeline: {e}");
            std::process::exit(1);
        }
    };

    match pipeline.run().await {
        Ok(RunOutcome::Posted {
            source,
            title,
            post_id,
        }) => info!(source = %source, title = %title, post_id = %post_id, "posted video"),
        Ok(RunOutcome::Exhausted) => info!("no qualifying video found, nothing posted"),
        Err(e) => {
            error!("run failed: {e}");
            std::process::exit(1);
        }
    }
}
