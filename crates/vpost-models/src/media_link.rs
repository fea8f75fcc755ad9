//! Tagged classification of listing URLs.
//!
//! Listing entries point at all kinds of external pages. Only two shapes are
//! playable without scraping: a native video with an embedded playback
//! descriptor, and a direct link to a video file or known video host. The
//! classification is an ordered set of explicit predicates; anything else is
//! `Unrecognized`.

use url::Url;

/// File extensions accepted as direct video links.
const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".m4v", ".mov", ".webm"];

/// Hosts whose links resolve to fetchable video. Matched against the parsed
/// host (exact or subdomain suffix), never by substring containment.
const VIDEO_HOSTS: &[&str] = &[
    "v.redd.it",
    "i.imgur.com",
    "gfycat.com",
    "redgifs.com",
    "streamable.com",
];

/// Classification of a listing entry's media reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaLink {
    /// Item is flagged as native video and exposes a direct playback URL.
    NativeVideo(String),
    /// External URL with a video file extension or on a known video host.
    DirectLink(String),
    /// Nothing fetchable.
    Unrecognized,
}

impl MediaLink {
    /// Classify an item's external URL.
    ///
    /// Native-video detection happens upstream from the listing payload;
    /// this covers the extension and host predicates, in that order.
    pub fn from_external_url(raw: &str) -> Self {
        if has_video_extension(raw) {
            return Self::DirectLink(raw.to_string());
        }
        if is_video_host(raw) {
            return Self::DirectLink(raw.to_string());
        }
        Self::Unrecognized
    }

    /// The fetchable URL, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::NativeVideo(url) | Self::DirectLink(url) => Some(url),
            Self::Unrecognized => None,
        }
    }
}

fn has_video_extension(raw: &str) -> bool {
    // Compare against the path only so query strings don't defeat the check.
    let path = match Url::parse(raw) {
        Ok(url) => url.path().to_ascii_lowercase(),
        Err(_) => return false,
    };
    VIDEO_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

fn is_video_host(raw: &str) -> bool {
    let Ok(url) = Url::parse(raw) else {
        return false;
    };
    let Some(host) = url.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();
    VIDEO_HOSTS
        .iter()
        .any(|allowed| host == *allowed || host.ends_with(&format!(".{allowed}")))
}
