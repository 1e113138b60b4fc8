//! Explicit session context.
//!
//! [`SessionContext`] is the only way the rest of the crate reads or changes
//! the signed-in state. It wraps a shared [`KeyValueStore`] and exposes typed
//! accessors for the three session fields (credential, subject email,
//! privilege flag) plus the theme preference, which is stored alongside but
//! is not part of the session.

use anyhow::Result;
use std::sync::{Arc, Mutex, PoisonError};

use crate::constants::{KEY_IS_ADMIN, KEY_THEME, KEY_TOKEN, KEY_USER_EMAIL, SESSION_KEYS};
use crate::navigation::Page;
use crate::store::{KeyValueStore, MemoryStore};

/// Point-in-time copy of the session fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Bearer credential, absent when signed out.
    pub credential: Option<String>,
    /// Email of the signed-in user.
    pub subject_email: Option<String>,
    /// Whether the signed-in user is an administrator.
    pub is_privileged: bool,
}

impl Session {
    /// A session without a credential is unauthenticated.
    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }
}

/// Display theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Light theme (default).
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl Theme {
    /// Value persisted under the theme key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => anyhow::bail!("Unknown theme '{other}' (expected light or dark)"),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared handle to the persisted session state.
///
/// Clones share the same underlying store, so a credential cleared by the
/// session gate is immediately invisible to the notification poller.
#[derive(Debug, Clone)]
pub struct SessionContext {
    store: Arc<Mutex<Box<dyn KeyValueStore>>>,
}

impl SessionContext {
    /// Wraps a store.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Arc::new(Mutex::new(Box::new(store))),
        }
    }

    /// Context backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    fn with_store<R>(&self, f: impl FnOnce(&mut dyn KeyValueStore) -> R) -> R {
        let mut guard = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut **guard)
    }

    fn read(&self, key: &str) -> Option<String> {
        self.with_store(|s| s.get(key)).filter(|v| !v.is_empty())
    }

    /// Stored bearer credential.
    pub fn token(&self) -> Option<String> {
        self.read(KEY_TOKEN)
    }

    /// Stored subject identity.
    pub fn subject_email(&self) -> Option<String> {
        self.read(KEY_USER_EMAIL)
    }

    /// Whether the privilege flag is set.
    pub fn is_privileged(&self) -> bool {
        self.read(KEY_IS_ADMIN).as_deref() == Some("true")
    }

    /// Whether anyone is signed in (student email or admin flag).
    pub fn is_signed_in(&self) -> bool {
        self.subject_email().is_some() || self.is_privileged()
    }

    /// Copies the session fields out.
    pub fn snapshot(&self) -> Session {
        Session {
            credential: self.token(),
            subject_email: self.subject_email(),
            is_privileged: self.is_privileged(),
        }
    }

    /// Stores the bearer credential.
    pub fn set_token(&self, token: &str) -> Result<()> {
        self.with_store(|s| s.set(KEY_TOKEN, token))
    }

    /// Stores the subject identity.
    pub fn set_subject_email(&self, email: &str) -> Result<()> {
        self.with_store(|s| s.set(KEY_USER_EMAIL, email))
    }

    /// Sets or clears the privilege flag.
    pub fn set_privileged(&self, privileged: bool) -> Result<()> {
        self.with_store(|s| {
            if privileged {
                s.set(KEY_IS_ADMIN, "true")
            } else {
                s.remove(KEY_IS_ADMIN)
            }
        })
    }

    /// Clears credential, identity and privilege flag; keeps everything else.
    pub fn clear_auth(&self) -> Result<()> {
        self.with_store(|s| s.remove_all(SESSION_KEYS))
    }

    /// Wipes the whole store, preferences included.
    pub fn clear_all(&self) -> Result<()> {
        self.with_store(|s| s.clear())
    }

    /// Stored theme, light when unset or unrecognized.
    pub fn theme(&self) -> Theme {
        self.read(KEY_THEME)
            .and_then(|t| t.parse().ok())
            .unwrap_or_default()
    }

    /// Persists the theme preference.
    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.with_store(|s| s.set(KEY_THEME, theme.as_str()))
    }

    /// Page a signed-in user lands on.
    pub fn home_page(&self) -> Page {
        if self.is_privileged() {
            Page::Admin
        } else {
            Page::Dashboard
        }
    }
}
