//! Caption formatting.

/// Platform caption limit, in characters.
pub const MAX_CAPTION_CHARS: usize = 280;

/// Build the post caption for a candidate, capped at the platform limit.
pub fn build_caption(source: &str, title: &str) -> String {
    truncate_caption(&format!("From r/{source}: {title}"))
}

/// Truncate a caption to [`MAX_CAPTION_CHARS`] on a char boundary.
pub fn truncate_caption(caption: &str) -> String {
    if caption.chars().count() <= MAX_CAPTION_CHARS {
        return caption.to_string();
    }
    caption.chars().take(MAX_CAPTION_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_includes_source_and_title() {
        assert_eq!(build_caption("aww", "Tiny kitten"), "From r/aww: Tiny kitten");
    }

    #[test]
    fn short_caption_is_untouched() {
        let caption = "From r/funny: short";
        assert_eq!(truncate_caption(caption), caption);
    }

    #[test]
    fn long_caption_is_cut_to_limit() {
        let title = "x".repeat(500);
        let caption = build_caption("videos", &title);
        assert_eq!(caption.chars().count(), MAX_CAPTION_CHARS);
        assert!(caption.starts_with("From r/videos: "));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let title = "é".repeat(400);
        let caption = build_caption("aww", &title);
        assert_eq!(caption.chars().count(), MAX_CAPTION_CHARS);
    }
}
