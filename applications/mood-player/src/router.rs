//! Mood state carried in the page URL
//!
//! Selecting a mood writes both `?mood=<key>` and `#<key>`. On start the
//! query parameter wins over the fragment. Returning to the pick screen
//! removes both.

use crate::error::Result;
use mood_core::MoodKey;
use url::Url;

const MOOD_PARAM: &str = "mood";

/// Page URL with mood routing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    url: Url,
}

impl Router {
    /// Parse the starting URL
    pub fn new(url: &str) -> Result<Self> {
        Ok(Self {
            url: Url::parse(url)?,
        })
    }

    /// Current URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Mood encoded in the URL, query parameter first
    ///
    /// Unknown keys are ignored, so `?mood=bogus#hype` yields `hype`.
    pub fn mood(&self) -> Option<MoodKey> {
        let from_query = self
            .url
            .query_pairs()
            .find(|(key, _)| key == MOOD_PARAM)
            .and_then(|(_, value)| value.parse::<MoodKey>().ok());

        from_query.or_else(|| {
            self.url
                .fragment()
                .map(str::trim)
                .filter(|fragment| !fragment.is_empty())
                .and_then(|fragment| fragment.parse::<MoodKey>().ok())
        })
    }

    /// Record a selected mood in query and fragment
    pub fn set_mood(&mut self, mood: MoodKey) {
        self.url = with_mood_query(&self.url, mood);
        self.url.set_fragment(Some(mood.as_str()));
    }

    /// Remove the mood from query and fragment
    pub fn clear(&mut self) {
        let others = other_pairs(&self.url);
        if others.is_empty() {
            self.url.set_query(None);
        } else {
            self.url.query_pairs_mut().clear().extend_pairs(others);
        }
        self.url.set_fragment(None);
    }

    /// Link reopening `mood`: the current URL with its `mood` query set
    pub fn share_link(&self, mood: Option<MoodKey>) -> String {
        match mood {
            Some(mood) => with_mood_query(&self.url, mood).to_string(),
            None => self.url.to_string(),
        }
    }
}

fn other_pairs(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .filter(|(key, _)| key != MOOD_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

fn with_mood_query(url: &Url, mood: MoodKey) -> Url {
    let mut next = url.clone();
    let others = other_pairs(url);
    next.query_pairs_mut()
        .clear()
        .extend_pairs(others)
        .append_pair(MOOD_PARAM, mood.as_str());
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selecting_relax_sets_query_and_fragment() {
        let mut router = Router::new("http://localhost:3000/").unwrap();
        router.set_mood(MoodKey::Relax);
        assert_eq!(router.url().as_str(), "http://localhost:3000/?mood=relax#relax");
        assert_eq!(router.mood(), Some(MoodKey::Relax));
    }

    #[test]
    fn query_alone_restores_mood() {
        let router = Router::new("http://localhost:3000/?mood=relax").unwrap();
        assert_eq!(router.mood(), Some(MoodKey::Relax));
    }

    #[test]
    fn fragment_alone_restores_mood() {
        let router = Router::new("http://localhost:3000/#love").unwrap();
        assert_eq!(router.mood(), Some(MoodKey::Love));
    }

    #[test]
    fn query_wins_over_fragment() {
        let router = Router::new("http://localhost:3000/?mood=hype#quiet").unwrap();
        assert_eq!(router.mood(), Some(MoodKey::Hype));

        let unknown = Router::new("http://localhost:3000/?mood=sleepy#quiet").unwrap();
        assert_eq!(unknown.mood(), Some(MoodKey::Quiet));
    }

    #[test]
    fn no_mood_means_pick_screen() {
        assert_eq!(Router::new("http://localhost:3000/").unwrap().mood(), None);
        assert_eq!(Router::new("http://localhost:3000/#").unwrap().mood(), None);
        assert_eq!(Router::new("http://localhost:3000/#about").unwrap().mood(), None);
    }

    #[test]
    fn clear_keeps_unrelated_query() {
        let mut router = Router::new("http://localhost:3000/?lang=ja").unwrap();
        router.set_mood(MoodKey::Fun);
        assert_eq!(router.url().as_str(), "http://localhost:3000/?lang=ja&mood=fun#fun");

        router.clear();
        assert_eq!(router.url().as_str(), "http://localhost:3000/?lang=ja");
        assert_eq!(router.mood(), None);
    }

    #[test]
    fn clear_drops_empty_query() {
        let mut router = Router::new("http://localhost:3000/").unwrap();
        router.set_mood(MoodKey::Heartbreak);
        router.clear();
        assert_eq!(router.url().as_str(), "http://localhost:3000/");
    }

    #[test]
    fn share_link_replaces_existing_mood() {
        let mut router = Router::new("http://localhost:3000/").unwrap();
        router.set_mood(MoodKey::Relax);
        assert_eq!(
            router.share_link(Some(MoodKey::Hype)),
            "http://localhost:3000/?mood=hype#relax"
        );
        assert_eq!(router.share_link(None), "http://localhost:3000/?mood=relax#relax");
    }
}
