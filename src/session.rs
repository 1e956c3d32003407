//! Client-side session state: the logged-in user, kept as JSON under a
//! single storage key. No expiry, no refresh, no cross-session sync.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::config::CURRENT_USER_KEY;
use crate::models::models::User;

/// String key/value storage with session semantics.
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove_item(&self, key: &str) -> anyhow::Result<()>;
}

/// Lives as long as the process, like a browser tab's session storage.
#[derive(Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.items
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        self.items
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
        Ok(())
    }
}

/// Same contract, backed by a JSON object on disk so a command-line
/// session survives between invocations.
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> BTreeMap<String, String> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return BTreeMap::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                log::warn!("Ignoring unreadable session file {}: {}", self.path.display(), e);
                BTreeMap::new()
            }
        }
    }

    fn save(&self, items: &BTreeMap<String, String>) -> anyhow::Result<()> {
        if items.is_empty() {
            if self.path.exists() {
                std::fs::remove_file(&self.path)?;
            }
            return Ok(());
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(items)?)?;
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        let _lock = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.load().remove(key)
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let _lock = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut items = self.load();
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }

    fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        let _lock = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut items = self.load();
        if items.remove(key).is_some() {
            self.save(&items)?;
        }
        Ok(())
    }
}

/// Typed view over the storage: who is logged in.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn SessionStorage>,
}

impl Session {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn current_user(&self) -> Option<User> {
        let raw = self.storage.get_item(CURRENT_USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("Discarding corrupt session entry: {}", e);
                None
            }
        }
    }

    /// `None` clears the session.
    pub fn set_current_user(&self, user: Option<&User>) -> anyhow::Result<()> {
        match user {
            Some(user) => self
                .storage
                .set_item(CURRENT_USER_KEY, &serde_json::to_string(user)?),
            None => self.storage.remove_item(CURRENT_USER_KEY),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }
}
