//! Runtime environment detection.
//!
//! Provides a single source of truth for which backend the client talks to
//! and whether it runs under test, based on the `PEERSKILL_ENV` environment
//! variable. The environment is read once at startup and used to pick the
//! default API base URL.
//!
//! # Usage
//!
//! ```rust
//! use peerskill::env::Environment;
//!
//! let base_url = Environment::current().api_base_url();
//! assert!(base_url.starts_with("http"));
//! ```
//!
//! # Environment Variable
//!
//! Set `PEERSKILL_ENV` to one of:
//! - `local`, `development` or `dev` - Local backend on port 5000
//! - `test` - Test mode (local backend, no interactive prompts)
//! - (anything else or unset) - Hosted backend

use crate::constants::{HOSTED_API_BASE_URL, LOCAL_API_BASE_URL};

/// Runtime environment for the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Hosted backend (default).
    Hosted,
    /// Backend running on the developer's machine.
    Local,
    /// Test environment.
    Test,
}

impl Environment {
    /// Detect current environment from `PEERSKILL_ENV`.
    #[must_use]
    pub fn current() -> Self {
        Self::parse(std::env::var("PEERSKILL_ENV").ok().as_deref())
    }

    /// Map a raw `PEERSKILL_ENV` value to an environment.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("test") => Self::Test,
            Some("local" | "development" | "dev") => Self::Local,
            _ => Self::Hosted,
        }
    }

    /// Default API base URL for this environment.
    #[must_use]
    pub fn api_base_url(self) -> &'static str {
        match self {
            Self::Hosted => HOSTED_API_BASE_URL,
            Self::Local | Self::Test => LOCAL_API_BASE_URL,
        }
    }

    /// Returns `true` if this is the test environment.
    #[must_use]
    pub fn is_test(self) -> bool {
        self == Self::Test
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hosted => write!(f, "hosted"),
            Self::Local => write!(f, "local"),
            Self::Test => write!(f, "test"),
        }
    }
}

/// Convenience function to check if running in test mode.
#[must_use]
pub fn is_test_mode() -> bool {
    Environment::current().is_test()
}
