//! Persistent key/value storage for session state
//!
//! The client persists exactly two values: the bearer token and the
//! language preference, under [`TOKEN_KEY`] and [`LANGUAGE_KEY`]. Backends
//! implement [`SessionStore`]; which one is used is decided by
//! [`StorageConfig`](crate::config::StorageConfig).

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use directories::ProjectDirs;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::{ContactbookError, Result};

/// Key holding the bearer token
pub const TOKEN_KEY: &str = "token";
/// Key holding the locale code
pub const LANGUAGE_KEY: &str = "language";

/// A string key/value store
pub trait SessionStore: Send + Sync {
    /// Read the value for `key`; `Ok(None)` when it was never set
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`; a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// Build the store selected by `config`
///
/// # Errors
///
/// Returns [`ContactbookError::Storage`] if the platform data directory
/// cannot be determined for the file backend
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn SessionStore>> {
    let store: Arc<dyn SessionStore> = match config.backend {
        StorageBackend::File => {
            let path = match &config.path {
                Some(path) => path.clone(),
                None => FileStore::default_path()?,
            };
            tracing::debug!("Using file session store at {}", path.display());
            Arc::new(FileStore::new(path))
        }
        StorageBackend::Keyring => {
            tracing::debug!("Using keyring session store: {}", config.keyring_service);
            Arc::new(KeyringStore::new(&config.keyring_service))
        }
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(store)
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process store; contents are lost on exit
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| ContactbookError::Storage("memory store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| ContactbookError::Storage("memory store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| ContactbookError::Storage("memory store lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// JSON object on disk, one string value per key
///
/// The whole file is read on every access and rewritten on every change,
/// so edits made by another process are picked up immediately.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by `path`; the file is created on first write
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// `session.json` in the platform data directory
    pub fn default_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "contactbook", "contactbook").ok_or_else(|| {
            ContactbookError::Storage("Could not determine data directory".into())
        })?;
        Ok(proj_dirs.data_dir().join("session.json"))
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents).map_err(|e| {
            ContactbookError::Storage(format!(
                "Corrupt session file {}: {}",
                self.path.display(),
                e
            ))
            .into()
        })
    }

    /// Current entries for a read-modify-write. A file that does not parse
    /// is replaced rather than blocking every later write; the flag reports
    /// that it must be rewritten.
    fn read_for_update(&self) -> Result<(BTreeMap<String, String>, bool)> {
        match self.read_all() {
            Ok(entries) => Ok((entries, false)),
            Err(e) => match e.downcast_ref::<ContactbookError>() {
                Some(ContactbookError::Storage(_)) => {
                    tracing::warn!("{}; starting a fresh session file", e);
                    Ok((BTreeMap::new(), true))
                }
                _ => Err(e),
            },
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let (mut entries, _) = self.read_for_update()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let (mut entries, corrupt) = self.read_for_update()?;
        if entries.remove(key).is_some() || corrupt {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// KeyringStore
// ---------------------------------------------------------------------------

/// OS credential store; each key is a separate entry under one service name
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    /// Create a store that files entries under `service`
    pub fn new(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, key).map_err(|e| ContactbookError::Keyring(e).into())
    }
}

impl SessionStore for KeyringStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(ContactbookError::Keyring(e).into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entry(key)?
            .set_password(value)
            .map_err(ContactbookError::Keyring)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(ContactbookError::Keyring(e).into()),
        }
    }
}
