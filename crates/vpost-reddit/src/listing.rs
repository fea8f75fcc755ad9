//! Serde models for the Reddit top listing and the qualifying predicate.

use serde::Deserialize;
use vpost_models::MediaLink;

#[derive(Debug, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
pub struct ListingChild {
    pub data: Post,
}

/// The subset of a listing entry the predicate needs.
#[derive(Debug, Default, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub is_video: bool,
    /// Playback descriptor for native video. Reddit populates `secure_media`
    /// on current posts; `media` survives on older ones.
    #[serde(default)]
    pub secure_media: Option<MediaPayload>,
    #[serde(default)]
    pub media: Option<MediaPayload>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MediaPayload {
    #[serde(default)]
    pub reddit_video: Option<RedditVideo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RedditVideo {
    #[serde(default)]
    pub fallback_url: Option<String>,
}

impl Post {
    /// Classify this entry, native video first, then the external-URL
    /// predicates.
    pub fn media_link(&self) -> MediaLink {
        if self.is_video {
            if let Some(url) = self.native_video_url() {
                return MediaLink::NativeVideo(url.to_string());
            }
        }
        match self.url.as_deref() {
            Some(url) => MediaLink::from_external_url(url),
            None => MediaLink::Unrecognized,
        }
    }

    fn native_video_url(&self) -> Option<&str> {
        // A populated `secure_media` may still carry no `reddit_video`
        // (external embeds), so each field is probed to the end before
        // moving on to the next.
        [&self.secure_media, &self.media]
            .into_iter()
            .flatten()
            .find_map(|payload| payload.reddit_video.as_ref()?.fallback_url.as_deref())
    }
}
