/// Track domain type
use serde::{Deserialize, Serialize};
use url::Url;

/// Title used for the built-in fallback track
pub const FALLBACK_TITLE: &str = "夜に溶けるまま";

/// File name of the built-in fallback track, relative to the asset base
pub const FALLBACK_FILE: &str = "chill 01.mp3";

/// A playable track
///
/// Identity is the URL: two tracks with the same URL are the same track
/// within a mood, whatever their titles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub url: String,
}

impl Track {
    /// Create a track from a title and URL
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// Built-in fallback track resolved against the asset base URL
    ///
    /// Falls back to the bare file name when the base cannot be joined.
    pub fn fallback(asset_base: &Url) -> Self {
        let url = asset_base
            .join(FALLBACK_FILE)
            .map(String::from)
            .unwrap_or_else(|_| FALLBACK_FILE.to_string());
        Self::new(FALLBACK_TITLE, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_resolves_against_base_directory() {
        let base = Url::parse("https://example.github.io/mood-player/").unwrap();
        let track = Track::fallback(&base);
        assert_eq!(track.title, FALLBACK_TITLE);
        assert_eq!(
            track.url,
            "https://example.github.io/mood-player/chill%2001.mp3"
        );
    }

    #[test]
    fn fallback_replaces_page_name() {
        let base = Url::parse("https://example.com/app/index.html").unwrap();
        let track = Track::fallback(&base);
        assert_eq!(track.url, "https://example.com/app/chill%2001.mp3");
    }
}
