/// Player configuration
use crate::error::{PlayerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Default configuration file, read when present
pub const DEFAULT_CONFIG_FILE: &str = "mood-player.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default = "default_assets")]
    pub assets: AssetSettings,

    #[serde(default = "default_backend")]
    pub backend: BackendSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_ui")]
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetSettings {
    /// Directory holding the catalog files and the fallback track
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendSettings {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Websocket endpoint for presence and chat; empty disables listen-together
    #[serde(default)]
    pub realtime_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Preferences file (last mood, anonymous chat identity, access token)
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiSettings {
    #[serde(default)]
    pub reduced_motion: bool,

    #[serde(default = "default_viewport_width")]
    pub viewport_width: f32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: f32,

    /// Page URL the router starts from
    #[serde(default = "default_initial_url")]
    pub initial_url: String,
}

impl PlayerConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `mood-player.toml` is read
    /// when present. `MOOD_`-prefixed variables override both, with `__`
    /// between section and field (`MOOD_BACKEND__API_URL`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("MOOD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| PlayerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| PlayerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let assets = Url::parse(&self.assets.base_url)
            .map_err(|e| PlayerError::Config(format!("assets.base_url: {}", e)))?;
        if assets.cannot_be_a_base() {
            return Err(PlayerError::Config(
                "assets.base_url must be a directory URL".to_string(),
            ));
        }

        let api = Url::parse(&self.backend.api_url)
            .map_err(|e| PlayerError::Config(format!("backend.api_url: {}", e)))?;
        if !matches!(api.scheme(), "http" | "https") {
            return Err(PlayerError::Config(format!(
                "backend.api_url must be http(s), got {}",
                api.scheme()
            )));
        }

        if let Some(realtime) = self.realtime_url() {
            let url = Url::parse(realtime)
                .map_err(|e| PlayerError::Config(format!("backend.realtime_url: {}", e)))?;
            if !matches!(url.scheme(), "ws" | "wss") {
                return Err(PlayerError::Config(format!(
                    "backend.realtime_url must be ws(s), got {}",
                    url.scheme()
                )));
            }
        }

        Url::parse(&self.ui.initial_url)
            .map_err(|e| PlayerError::Config(format!("ui.initial_url: {}", e)))?;

        if self.ui.viewport_width <= 0.0 || self.ui.viewport_height <= 0.0 {
            return Err(PlayerError::Config(
                "ui viewport must be larger than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Asset base with a trailing slash, so catalog names resolve inside it
    pub fn asset_base(&self) -> Result<Url> {
        let mut base = self.assets.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Url::parse(&base)?)
    }

    /// Realtime endpoint, `None` when unset or blank
    pub fn realtime_url(&self) -> Option<&str> {
        self.backend
            .realtime_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            assets: default_assets(),
            backend: default_backend(),
            storage: default_storage(),
            ui: default_ui(),
        }
    }
}

// Default values
fn default_assets() -> AssetSettings {
    AssetSettings {
        base_url: default_base_url(),
    }
}

fn default_base_url() -> String {
    "http://localhost:3000/".to_string()
}

fn default_backend() -> BackendSettings {
    BackendSettings {
        api_url: default_api_url(),
        realtime_url: None,
    }
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        path: default_storage_path(),
    }
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("./data/mood-player.json")
}

fn default_ui() -> UiSettings {
    UiSettings {
        reduced_motion: false,
        viewport_width: default_viewport_width(),
        viewport_height: default_viewport_height(),
        initial_url: default_initial_url(),
    }
}

fn default_viewport_width() -> f32 {
    120.0
}

fn default_viewport_height() -> f32 {
    40.0
}

fn default_initial_url() -> String {
    "http://localhost:3000/".to_string()
}
