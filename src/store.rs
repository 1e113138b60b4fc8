//! Persisted key-value state.
//!
//! The client keeps a handful of string flags between runs (credential,
//! signed-in email, admin flag, theme). Storage sits behind the
//! [`KeyValueStore`] trait so the session layer never touches files directly.
//!
//! # Storage
//!
//! - [`FileStore`]: JSON object at `{config_dir}/state.json`, owner-only
//!   permissions on unix. Every mutation is written through immediately.
//! - [`MemoryStore`]: process-local map, used by tests and one-off contexts.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Minimal string key-value storage.
pub trait KeyValueStore: Send + std::fmt::Debug {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Removes every key in `keys`. All of them are gone afterwards even when
    /// the change could not be saved.
    fn remove_all(&mut self, keys: &[&str]) -> Result<()> {
        let mut first_err = None;
        for key in keys {
            if let Err(e) = self.remove(key) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Removes every key.
    fn clear(&mut self) -> Result<()>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
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

    fn clear(&mut self) -> Result<()> {
        self.values.clear();
        Ok(())
    }
}

/// JSON-file backed store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`, starting empty when the file does not exist.
    ///
    /// A corrupted file is treated as empty (and overwritten on the next
    /// write) rather than failing startup.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable state file {}: {e}", path.display());
                BTreeMap::new()
            })
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, values })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.values)?)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        // Credential lives here, keep it owner read/write only
        #[cfg(unix)]
        fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    fn remove_all(&mut self, keys: &[&str]) -> Result<()> {
        let mut changed = false;
        for key in keys {
            changed |= self.values.remove(*key).is_some();
        }
        if changed {
            self.persist()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.values.clear();
        self.persist()
    }
}
