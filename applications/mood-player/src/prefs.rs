//! Client-side preferences
//!
//! A small string key/value store standing in for browser local storage.
//! Every key is optional and regenerable; losing the file only costs the
//! last mood, the anonymous chat identity and the session token.

use crate::error::{PlayerError, Result};
use mood_core::MoodKey;
use rand::Rng;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, warn};

pub const LAST_MOOD_KEY: &str = "mood-player:lastMood";
pub const CHAT_USER_ID_KEY: &str = "mood-player:chatUserId";
pub const CHAT_USER_NAME_KEY: &str = "mood-player:chatUserName";
pub const ACCESS_TOKEN_KEY: &str = "access_token";

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// String key/value persistence
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// JSON object on disk, rewritten on every change
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`
    ///
    /// A missing file starts empty. An unreadable or corrupt file is logged
    /// and also starts empty; it is overwritten on the next change.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(values) => values,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Preferences file corrupt, starting fresh");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Preferences file unreadable, starting fresh");
                BTreeMap::new()
            }
        };

        debug!(path = %path.display(), keys = values.len(), "Preferences loaded");
        Self { path, values }
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, text)
            .map_err(|e| PlayerError::Preferences(format!("{}: {}", self.path.display(), e)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.values.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Typed access to the player's keys
///
/// Write failures are logged and swallowed: preferences never break the
/// session.
pub struct Preferences {
    store: Box<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Preferences held in memory only
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    /// Last selected mood
    pub fn last_mood(&self) -> Option<MoodKey> {
        self.store.get(LAST_MOOD_KEY)?.parse().ok()
    }

    pub fn set_last_mood(&mut self, mood: MoodKey) {
        self.write(LAST_MOOD_KEY, mood.as_str());
    }

    /// Persisted bearer token
    pub fn access_token(&self) -> Option<String> {
        self.store.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn set_access_token(&mut self, token: Option<&str>) {
        match token {
            Some(token) => self.write(ACCESS_TOKEN_KEY, token),
            None => {
                if let Err(e) = self.store.remove(ACCESS_TOKEN_KEY) {
                    warn!(error = %e, "Failed to remove access token");
                }
            }
        }
    }

    /// Anonymous chat id, generated (`u_` + 10 base36 chars) on first use
    pub fn chat_user_id<R: Rng + ?Sized>(&mut self, rng: &mut R) -> String {
        self.get_or_generate(CHAT_USER_ID_KEY, "u_", 10, rng)
    }

    /// Anonymous chat name, generated (`User_` + 4 base36 chars) on first use
    pub fn chat_user_name<R: Rng + ?Sized>(&mut self, rng: &mut R) -> String {
        self.get_or_generate(CHAT_USER_NAME_KEY, "User_", 4, rng)
    }

    fn get_or_generate<R: Rng + ?Sized>(
        &mut self,
        key: &str,
        prefix: &str,
        len: usize,
        rng: &mut R,
    ) -> String {
        if let Some(value) = self.store.get(key).filter(|v| !v.is_empty()) {
            return value;
        }
        let value = format!("{}{}", prefix, random_base36(len, rng));
        self.write(key, &value);
        value
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            warn!(key = %key, error = %e, "Failed to persist preference");
        }
    }
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences").finish_non_exhaustive()
    }
}

/// `len` random characters from `[0-9a-z]`
pub fn random_base36<R: Rng + ?Sized>(len: usize, rng: &mut R) -> String {
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_base36(s: &str) -> bool {
        s.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
    }

    #[test]
    fn anonymous_identity_is_generated_once() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut prefs = Preferences::in_memory();

        let id = prefs.chat_user_id(&mut rng);
        assert!(id.starts_with("u_"));
        assert_eq!(id.len(), 12);
        assert!(is_base36(&id[2..]));

        let name = prefs.chat_user_name(&mut rng);
        assert!(name.starts_with("User_"));
        assert_eq!(name.len(), 9);
        assert!(is_base36(&name[5..]));

        assert_eq!(prefs.chat_user_id(&mut rng), id);
        assert_eq!(prefs.chat_user_name(&mut rng), name);
    }

    #[test]
    fn last_mood_ignores_garbage() {
        let mut store = MemoryStore::new();
        store.set(LAST_MOOD_KEY, "sleepy").unwrap();
        let mut prefs = Preferences::new(Box::new(store));
        assert_eq!(prefs.last_mood(), None);

        prefs.set_last_mood(MoodKey::Quiet);
        assert_eq!(prefs.last_mood(), Some(MoodKey::Quiet));
    }

    #[test]
    fn token_can_be_cleared() {
        let mut prefs = Preferences::in_memory();
        prefs.set_access_token(Some("tok"));
        assert_eq!(prefs.access_token().as_deref(), Some("tok"));
        prefs.set_access_token(None);
        assert_eq!(prefs.access_token(), None);
    }
}
