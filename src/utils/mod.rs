// Utility functions
pub mod validation;

/// Build a YouTube embed URL from a watch or short link.
///
/// The video id is the last path segment (query stripped) unless that
/// segment is empty or is `watch`, in which case the `v=` parameter is used.
pub fn youtube_embed_url(video_url: &str) -> Option<String> {
    let video_url = video_url.trim();
    let last = video_url.rsplit('/').next().unwrap_or_default();

    let id = if last.is_empty() || last.starts_with("watch") {
        video_url
            .split_once("v=")
            .map(|(_, rest)| rest.split('&').next().unwrap_or_default())
            .unwrap_or_default()
    } else {
        last.split(['?', '#']).next().unwrap_or_default()
    };

    if id.is_empty() {
        None
    } else {
        Some(format!("https://www.youtube.com/embed/{id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_link() {
        assert_eq!(
            youtube_embed_url("https://youtu.be/dQw4w9WgXcQ"),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            youtube_embed_url("https://youtu.be/dQw4w9WgXcQ?t=42"),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_watch_link() {
        assert_eq!(
            youtube_embed_url("https://www.youtube.com/watch?v=abc123&list=PL1"),
            Some("https://www.youtube.com/embed/abc123".to_string())
        );
    }

    #[test]
    fn test_no_video_id() {
        assert_eq!(youtube_embed_url("https://www.youtube.com/"), None);
        assert_eq!(youtube_embed_url(""), None);
    }
}
