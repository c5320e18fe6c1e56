//! Persisted session state (`auth_token`, `user_data`).

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Mutex, RwLock};

use anyhow::Context;
use thiserror::Error;

/// Key holding the opaque bearer token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// Key holding the serialized [`crate::User`].
pub const USER_DATA_KEY: &str = "user_data";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("session storage unavailable: {0}")]
    Backend(String),
}

/// Session-scoped key/value storage.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Drop everything the session store persists.
    fn clear_session(&self) -> Result<(), StorageError> {
        self.remove(AUTH_TOKEN_KEY)?;
        self.remove(USER_DATA_KEY)
    }
}

/// Process-lifetime storage; the default when no session file is configured.
#[derive(Debug, Default)]
pub struct InMemorySessionStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for InMemorySessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StorageError::Backend("lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::Backend("lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::Backend("lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

/// JSON file storage so a session survives restarts of the headless console.
#[derive(Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles on the file.
    guard: Mutex<()>,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    fn read_map(&self) -> anyhow::Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read session file {:?}", self.path))?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw)
            .with_context(|| format!("session file {:?} is not a JSON object", self.path))
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create session directory at {:?}", parent))?;
        }
        let raw = serde_json::to_string_pretty(map).context("failed to encode session file")?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("failed to write session file {:?}", self.path))
    }

    fn update(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StorageError> {
        let _lock = self
            .guard
            .lock()
            .map_err(|_| StorageError::Backend("lock poisoned".to_string()))?;
        let result = self.read_map().and_then(|mut map| {
            f(&mut map);
            self.write_map(&map)
        });
        result.map_err(|err| StorageError::Backend(format!("{err:#}")))
    }
}

impl SessionStorage for FileSessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _lock = self
            .guard
            .lock()
            .map_err(|_| StorageError::Backend("lock poisoned".to_string()))?;
        let map = self
            .read_map()
            .map_err(|err| StorageError::Backend(format!("{err:#}")))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|map| {
            map.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|map| {
            map.remove(key);
        })
    }
}
