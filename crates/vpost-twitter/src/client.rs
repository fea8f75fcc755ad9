//! Publishing client: media upload then post creation.

use std::path::Path;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::auth::{Credentials, OAuth1};
use crate::error::{TwitterError, TwitterResult};

const DEFAULT_UPLOAD_URL: &str = "https://upload.twitter.com/1.1/media/upload.json";
const DEFAULT_POST_URL: &str = "https://api.twitter.com/2/tweets";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Deserialize)]
struct MediaUploadResponse {
    media_id_string: String,
}

#[derive(Debug, Deserialize)]
struct CreatePostResponse {
    data: CreatedPost,
}

#[derive(Debug, Deserialize)]
struct CreatedPost {
    id: String,
}

/// Client for the two publishing calls. No retries; a failed call is the
/// run's failure.
#[derive(Debug, Clone)]
pub struct TwitterClient {
    http: reqwest::Client,
    auth: OAuth1,
    upload_url: String,
    post_url: String,
}

impl TwitterClient {
    pub fn new(credentials: Credentials) -> TwitterResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            auth: OAuth1::new(credentials),
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            post_url: DEFAULT_POST_URL.to_string(),
        })
    }

    /// Point both calls at different endpoints. Used by tests.
    pub fn with_endpoints(
        mut self,
        upload_url: impl Into<String>,
        post_url: impl Into<String>,
    ) -> Self {
        self.upload_url = upload_url.into();
        self.post_url = post_url.into();
        self
    }

    /// Upload a media file, returning the media id to reference in a post.
    pub async fn upload_media(&self, path: impl AsRef<Path>) -> TwitterResult<String> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "media.mp4".to_string());
        debug!(path = %path.display(), size_kb = bytes.len() / 1024, "uploading media");

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("video/mp4")?;
        let form = Form::new().part("media", part);

        // Multipart bodies are excluded from OAuth signing.
        let header = self.auth.authorization_header("POST", &self.upload_url, &[])?;
        let response = self
            .http
            .post(&self.upload_url)
            .header(AUTHORIZATION, header)
            .multipart(form)
            .send()
            .await?;

        let payload: MediaUploadResponse = Self::parse(response).await?;
        info!(media_id = %payload.media_id_string, "media uploaded");
        Ok(payload.media_id_string)
    }

    /// Create a post with the caption text and an uploaded media id.
    /// Returns the new post's id.
    pub async fn create_post(&self, text: &str, media_id: &str) -> TwitterResult<String> {
        let header = self.auth.authorization_header("POST", &self.post_url, &[])?;
        let response = self
            .http
            .post(&self.post_url)
            .header(AUTHORIZATION, header)
            .json(&json!({
                "text": text,
                "media": { "media_ids": [media_id] },
            }))
            .send()
            .await?;

        let payload: CreatePostResponse = Self::parse(response).await?;
        info!(post_id = %payload.data.id, "post created");
        Ok(payload.data.id)
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> TwitterResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TwitterError::Status { status, body });
        }
        Ok(response.json().await?)
    }
}
