//! Catalog fetching with fallback

use crate::parse::parse_catalog;
use futures_util::future::join_all;
use mood_core::{MoodKey, MoodTable, Track};
use reqwest::Client;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use url::Url;

/// A finished catalog load, delivered to whoever owns the mood table
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogLoaded {
    pub mood: MoodKey,
    pub tracks: Vec<Track>,
}

/// Fetches per-mood catalog files relative to an asset base URL
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    http: Client,
    asset_base: Url,
    fallback: Track,
}

impl CatalogLoader {
    /// Create a loader for catalogs living under `asset_base`
    pub fn new(asset_base: Url) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!("MoodPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self::with_client(http, asset_base)
    }

    /// Create a loader sharing an existing HTTP client
    pub fn with_client(http: Client, asset_base: Url) -> Self {
        let fallback = Track::fallback(&asset_base);
        Self {
            http,
            asset_base,
            fallback,
        }
    }

    /// The single-track list used whenever a catalog is unusable
    pub fn fallback_tracks(&self) -> Vec<Track> {
        vec![self.fallback.clone()]
    }

    /// Load one catalog file
    ///
    /// Never fails and never returns an empty list.
    pub async fn load_tracks(&self, file: &str) -> Vec<Track> {
        let url = match self.asset_base.join(file) {
            Ok(url) => url,
            Err(e) => {
                warn!(file = %file, error = %e, "Invalid catalog location, using fallback track");
                return self.fallback_tracks();
            }
        };

        debug!(url = %url, "Fetching catalog");

        let response = match self.http.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "Catalog unreachable, using fallback track");
                return self.fallback_tracks();
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "Catalog not available, using fallback track");
            return self.fallback_tracks();
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!(url = %url, error = %e, "Catalog body unreadable, using fallback track");
                return self.fallback_tracks();
            }
        };

        let tracks = parse_catalog(&text);
        if tracks.is_empty() {
            warn!(url = %url, "Catalog has no track URLs, using fallback track");
            return self.fallback_tracks();
        }

        info!(file = %file, tracks = tracks.len(), "Catalog loaded");
        tracks
    }

    /// Load every mood's catalog concurrently and wait for all of them
    pub async fn load_all(&self, table: &MoodTable) -> Vec<CatalogLoaded> {
        let loads = table.iter().map(|mood| async move {
            let tracks = self.load_tracks(mood.catalog_file).await;
            CatalogLoaded {
                mood: mood.key,
                tracks,
            }
        });

        let loaded = join_all(loads).await;
        info!(moods = loaded.len(), "All mood catalogs loaded");
        loaded
    }

    /// Start one background load per mood
    ///
    /// Results arrive on `results` as each load finishes. Loads are not
    /// retried or cancelled; a closed receiver just discards them.
    pub fn spawn_all(&self, table: &MoodTable, results: mpsc::UnboundedSender<CatalogLoaded>) {
        for mood in table.iter() {
            let loader = self.clone();
            let results = results.clone();
            let key = mood.key;
            let file = mood.catalog_file;

            tokio::spawn(async move {
                let tracks = loader.load_tracks(file).await;
                if results.send(CatalogLoaded { mood: key, tracks }).is_err() {
                    debug!(mood = %key, "Catalog result dropped, receiver gone");
                }
            });
        }
    }
}
