//! Catalog text parsing and title derivation

use mood_core::Track;
use percent_encoding::percent_decode_str;

/// Parse catalog text into tracks
///
/// Keeps trimmed, non-empty lines starting with an HTTP(S) scheme; every
/// other line is ignored. May return an empty list; the loader substitutes
/// the fallback in that case.
pub fn parse_catalog(text: &str) -> Vec<Track> {
    text.lines()
        .map(str::trim)
        .filter(|line| is_track_url(line))
        .enumerate()
        .map(|(index, url)| Track::new(derive_title(url, index), url))
        .collect()
}

fn is_track_url(line: &str) -> bool {
    line.starts_with("http://") || line.starts_with("https://")
}

/// Derive a display title from a track URL
///
/// Uses the first path segment ending in `.mp3`, percent-decoded, with the
/// `Title_` and `chill_<n>_` prefixes removed. URLs without such a segment
/// are titled `曲 NN` after their 1-based position.
pub fn derive_title(url: &str, index: usize) -> String {
    let Some(stem) = mp3_stem(url) else {
        return format!("曲 {:02}", index + 1);
    };

    match percent_decode_str(stem).decode_utf8() {
        Ok(decoded) => strip_known_prefixes(&decoded).to_string(),
        // Undecodable names are shown raw
        Err(_) => stem.strip_suffix(".mp3").unwrap_or(stem).to_string(),
    }
}

/// Segment text preceding `.mp3`, taken from the first `/`-delimited segment
/// that contains it
fn mp3_stem(url: &str) -> Option<&str> {
    url.split('/').skip(1).find_map(|segment| {
        segment
            .rfind(".mp3")
            .filter(|pos| *pos > 0)
            .map(|pos| &segment[..pos])
    })
}

fn strip_known_prefixes(title: &str) -> &str {
    let title = title.strip_prefix("Title_").unwrap_or(title);

    if let Some(rest) = title.strip_prefix("chill_") {
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits > 0 {
            if let Some(stripped) = rest[digits..].strip_prefix('_') {
                return stripped;
            }
        }
    }

    title
}
