//! End-to-end pipeline runs against stubbed listing, media, and publishing
//! endpoints. Artifacts must be gone after every run, whatever the outcome.

use std::path::Path;
use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vpost_bot::{BotConfig, BotError, Pipeline};
use vpost_media::Transcoder;
use vpost_models::RunOutcome;
use vpost_reddit::RedditClient;
use vpost_twitter::{Credentials, TwitterClient};

fn test_config(work_dir: &Path, primary: &[&str], fallback: &[&str]) -> BotConfig {
    BotConfig {
        credentials: Credentials {
            consumer_key: "ck".into(),
            consumer_secret: "cs".into(),
            access_token: "at".into(),
            access_secret: "as".into(),
        },
        user_agent: "vpost-test".into(),
        primary_sources: primary.iter().map(|s| s.to_string()).collect(),
        fallback_sources: fallback.iter().map(|s| s.to_string()).collect(),
        listing_limit: 5,
        search_delay: Duration::ZERO,
        work_dir: work_dir.to_path_buf(),
    }
}

fn pipeline_for(server: &MockServer, config: BotConfig, transcoder: Transcoder) -> Pipeline {
    let reddit = RedditClient::new("vpost-test")
        .unwrap()
        .with_base_url(server.uri());
    let twitter = TwitterClient::new(config.credentials.clone())
        .unwrap()
        .with_endpoints(
            format!("{}/1.1/media/upload.json", server.uri()),
            format!("{}/2/tweets", server.uri()),
        );
    Pipeline::with_components(config, reddit, twitter, transcoder)
}

fn empty_listing() -> serde_json::Value {
    json!({ "data": { "children": [
        { "data": { "title": "text post", "url": "https://example.com/article" } }
    ] } })
}

fn video_listing(server_uri: &str, title: &str) -> serde_json::Value {
    json!({ "data": { "children": [
        { "data": {
            "title": title,
            "url": "https://www.reddit.com/r/x/comments/1",
            "is_video": true,
            "secure_media": { "reddit_video": {
                "fallback_url": format!("{server_uri}/media/clip.mp4")
            } }
        } }
    ] } })
}

async fn mount_listing(server: &MockServer, source: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/r/{source}/top.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_media(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/media/clip.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x11u8; 4096]))
        .mount(server)
        .await;
}

async fn mount_publish(server: &MockServer, expected_caption: &str) {
    Mock::given(method("POST"))
        .and(path("/1.1/media/upload.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "media_id_string": "710511363345354753",
        })))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .and(body_partial_json(json!({
            "text": expected_caption,
            "media": { "media_ids": ["710511363345354753"] },
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "id": "1445880548472328192", "text": expected_caption },
        })))
        .expect(1)
        .mount(server)
        .await;
}

fn assert_no_artifacts(work_dir: &Path) {
    if work_dir.exists() {
        let leftover: Vec<_> = std::fs::read_dir(work_dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert!(leftover.is_empty(), "artifacts left behind: {leftover:?}");
    }
}

#[tokio::test]
async fn posts_candidate_and_cleans_up() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let work_dir = dir.path().join("work");

    mount_listing(&server, "alpha", empty_listing()).await;
    mount_listing(&server, "beta", video_listing(&server.uri(), "native clip")).await;
    mount_media(&server).await;
    mount_publish(&server, "From r/beta: native clip").await;

    let config = test_config(&work_dir, &["alpha", "beta"], &[]);
    let pipeline = pipeline_for(&server, config, Transcoder::passthrough());

    let outcome = pipeline.run().await.unwrap();
    match outcome {
        RunOutcome::Posted {
            source,
            title,
            post_id,
        } => {
            assert_eq!(source, "beta");
            assert_eq!(title, "native clip");
            assert_eq!(post_id, "1445880548472328192");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_no_artifacts(&work_dir);
}

#[tokio::test]
async fn fallback_pool_is_reached_only_after_primary_exhausted() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let work_dir = dir.path().join("work");

    // Every primary source must be queried exactly once before the fallback.
    for source in ["alpha", "beta"] {
        Mock::given(method("GET"))
            .and(path(format!("/r/{source}/top.json")))
            .respond_with(ResponseTemplate::new(200).set_body_json(empty_listing()))
            .expect(1)
            .mount(&server)
            .await;
    }
    mount_listing(&server, "gamma", video_listing(&server.uri(), "fallback clip")).await;
    mount_media(&server).await;
    mount_publish(&server, "From r/gamma: fallback clip").await;

    let config = test_config(&work_dir, &["alpha", "beta"], &["gamma"]);
    let pipeline = pipeline_for(&server, config, Transcoder::passthrough());

    let outcome = pipeline.run().await.unwrap();
    assert!(
        matches!(outcome, RunOutcome::Posted { ref source, .. } if source == "gamma"),
        "unexpected outcome: {outcome:?}"
    );
    assert_no_artifacts(&work_dir);
}

#[tokio::test]
async fn exhausted_pools_end_cleanly_without_publishing() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let work_dir = dir.path().join("work");

    for source in ["alpha", "beta", "gamma"] {
        mount_listing(&server, source, empty_listing()).await;
    }
    // A failing source counts as "no match", not as a run failure.
    Mock::given(method("GET"))
        .and(path("/r/delta/top.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/1.1/media/upload.json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&work_dir, &["alpha", "beta"], &["gamma", "delta"]);
    let pipeline = pipeline_for(&server, config, Transcoder::passthrough());

    let outcome = pipeline.run().await.unwrap();
    assert_eq!(outcome, RunOutcome::Exhausted);
    assert_no_artifacts(&work_dir);
}

#[tokio::test]
async fn download_failure_aborts_before_publish_and_cleans_up() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let work_dir = dir.path().join("work");

    mount_listing(&server, "alpha", video_listing(&server.uri(), "dead link")).await;
    Mock::given(method("GET"))
        .and(path("/media/clip.mp4"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/1.1/media/upload.json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&work_dir, &["alpha"], &[]);
    let pipeline = pipeline_for(&server, config, Transcoder::passthrough());

    let err = pipeline.run().await.unwrap_err();
    assert!(matches!(err, BotError::Download(_)), "got: {err}");
    assert_no_artifacts(&work_dir);
}

#[tokio::test]
async fn publish_failure_is_fatal_but_cleanup_still_runs() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let work_dir = dir.path().join("work");

    mount_listing(&server, "alpha", video_listing(&server.uri(), "rejected clip")).await;
    mount_media(&server).await;
    Mock::given(method("POST"))
        .and(path("/1.1/media/upload.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("over capacity"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&work_dir, &["alpha"], &[]);
    let pipeline = pipeline_for(&server, config, Transcoder::passthrough());

    // Both the raw and normalized artifacts exist at this point; the failed
    // upload must not leave either behind.
    let err = pipeline.run().await.unwrap_err();
    assert!(matches!(err, BotError::Publish(_)), "got: {err}");
    assert_no_artifacts(&work_dir);
}

#[tokio::test]
async fn pause_holds_across_the_primary_fallback_boundary() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let work_dir = dir.path().join("work");

    mount_listing(&server, "alpha", empty_listing()).await;
    mount_listing(&server, "gamma", video_listing(&server.uri(), "paced clip")).await;
    mount_media(&server).await;
    mount_publish(&server, "From r/gamma: paced clip").await;

    let delay = Duration::from_millis(100);
    let mut config = test_config(&work_dir, &["alpha"], &["gamma"]);
    config.search_delay = delay;
    let pipeline = pipeline_for(&server, config, Transcoder::passthrough());

    // One primary attempt, then one fallback attempt: exactly one pause.
    let started = std::time::Instant::now();
    let outcome = pipeline.run().await.unwrap();
    assert!(
        started.elapsed() >= delay,
        "fallback attempt went out without pausing"
    );
    assert!(matches!(outcome, RunOutcome::Posted { ref source, .. } if source == "gamma"));
    assert_no_artifacts(&work_dir);
}

#[tokio::test]
async fn transcode_failure_aborts_before_publish_and_cleans_up() {
    // `false` stands in for an ffmpeg that exits non-zero.
    let Ok(false_bin) = which::which("false") else {
        return;
    };

    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let work_dir = dir.path().join("work");

    mount_listing(&server, "alpha", video_listing(&server.uri(), "bad encode")).await;
    mount_media(&server).await;
    Mock::given(method("POST"))
        .and(path("/1.1/media/upload.json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&work_dir, &["alpha"], &[]);
    let pipeline = pipeline_for(&server, config, Transcoder::with_ffmpeg(false_bin));

    let err = pipeline.run().await.unwrap_err();
    assert!(matches!(err, BotError::Transcode(_)), "got: {err}");
    assert_no_artifacts(&work_dir);
}
