//! Configuration loading and persistence.
//!
//! Handles reading and writing the PeerSkill configuration file. Session
//! state (credential, email, admin flag, theme) is not part of the config;
//! it lives in `state.json` next to it, see [`crate::store::FileStore`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{HTTP_REQUEST_TIMEOUT, NOTIFICATION_POLL_INTERVAL};
use crate::env::Environment;
use crate::session::SessionContext;
use crate::store::FileStore;

/// Name of the configuration file inside the config directory.
const CONFIG_FILE: &str = "config.json";

/// Name of the persisted session state file inside the config directory.
const STATE_FILE: &str = "state.json";

/// Configuration for the PeerSkill client.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Explicit API base URL. When unset the environment decides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    /// Seconds between notification polls.
    pub poll_interval: u64,
    /// Seconds before an API request is abandoned.
    pub request_timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            poll_interval: NOTIFICATION_POLL_INTERVAL.as_secs(),
            request_timeout: HTTP_REQUEST_TIMEOUT.as_secs(),
        }
    }
}

impl Config {
    /// Returns the configuration directory path, creating it if necessary.
    ///
    /// Directory selection priority:
    /// 1. `#[cfg(test)]` (unit tests): `tmp/peerskill-test`
    /// 2. `PEERSKILL_CONFIG_DIR` env var: explicit override
    /// 3. `PEERSKILL_ENV=test`: `tmp/peerskill-test` (integration tests)
    /// 4. Default: platform config dir (Linux: ~/.config/peerskill)
    pub fn config_dir() -> Result<PathBuf> {
        let dir = {
            #[cfg(test)]
            {
                PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tmp/peerskill-test")
            }

            #[cfg(not(test))]
            {
                if let Ok(dir) = std::env::var("PEERSKILL_CONFIG_DIR") {
                    PathBuf::from(dir)
                } else if crate::env::is_test_mode() {
                    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tmp/peerskill-test")
                } else {
                    dirs::config_dir()
                        .context("Could not determine config directory")?
                        .join("peerskill")
                }
            }
        };
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {}", dir.display()))?;
        Ok(dir)
    }

    /// Loads configuration from the config directory, with environment
    /// variable overrides. A missing or unreadable file means defaults.
    pub fn load() -> Result<Self> {
        Ok(Self::load_in(&Self::config_dir()?))
    }

    /// Like [`load`](Self::load), reading from `dir`.
    pub fn load_in(dir: &Path) -> Self {
        let mut config = Self::load_from_file(&dir.join(CONFIG_FILE)).unwrap_or_else(|e| {
            log::debug!("Using default configuration: {e:#}");
            Self::default()
        });
        config.apply_env_overrides();
        config
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Config file not found");
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("PEERSKILL_API_URL") {
            if !url.trim().is_empty() {
                self.api_base_url = Some(url);
            }
        }

        if let Ok(poll_interval) = std::env::var("PEERSKILL_POLL_INTERVAL") {
            match poll_interval.parse::<u64>() {
                Ok(secs) if secs > 0 => self.poll_interval = secs,
                _ => log::warn!("Ignoring PEERSKILL_POLL_INTERVAL={poll_interval}"),
            }
        }
    }

    /// Persists the configuration into the config directory.
    pub fn save(&self) -> Result<()> {
        self.save_in(&Self::config_dir()?)
    }

    /// Persists the configuration into `dir`.
    pub fn save_in(&self, dir: &Path) -> Result<()> {
        let config_path = dir.join(CONFIG_FILE);
        fs::write(&config_path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;

        // Owner read/write only
        #[cfg(unix)]
        fs::set_permissions(&config_path, fs::Permissions::from_mode(0o600))?;

        Ok(())
    }

    /// Path of the persisted session state.
    pub fn state_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(STATE_FILE))
    }

    /// API base URL: explicit setting first, then the environment default.
    pub fn api_base_url(&self) -> String {
        self.api_base_url
            .clone()
            .unwrap_or_else(|| Environment::current().api_base_url().to_string())
    }

    /// Notification poll interval.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval.max(1))
    }

    /// Request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout.max(1))
    }

    /// Opens the persisted session state.
    pub fn open_session() -> Result<SessionContext> {
        let store = FileStore::open(Self::state_path()?)?;
        Ok(SessionContext::new(store))
    }
}
