//! Page identifiers and redirects.
//!
//! Every invocation resolves exactly one [`Page`] up front and hands it to
//! that page's initializer. Code that wants to move the user elsewhere (the
//! session gate on an expired credential, a successful login) records the
//! target on the shared [`Navigator`]; the binary follows it once the current
//! command is done.

use std::sync::{Arc, Mutex, PoisonError};

/// A screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Landing page.
    Home,
    /// Sign-in form. The entry point after a session expires.
    Login,
    /// Account creation form.
    Signup,
    /// Signed-in student's dashboard.
    Dashboard,
    /// Profile editor.
    EditProfile,
    /// Moderation console for administrators.
    Admin,
}

impl Page {
    /// Stable identifier, also the CLI subcommand that shows the page.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Login => "login",
            Self::Signup => "signup",
            Self::Dashboard => "dashboard",
            Self::EditProfile => "profile",
            Self::Admin => "admin",
        }
    }

    /// Whether the page needs a signed-in user.
    pub fn requires_session(self) -> bool {
        matches!(self, Self::Dashboard | Self::EditProfile | Self::Admin)
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared holder for the next page to show.
///
/// Cloning shares the same slot. Only the most recent redirect is kept.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    pending: Arc<Mutex<Option<Page>>>,
}

impl Navigator {
    /// Creates a navigator with no pending redirect.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a move to `page`.
    pub fn redirect(&self, page: Page) {
        log::debug!("Redirect requested: {page}");
        *self.slot() = Some(page);
    }

    /// Returns the pending redirect without consuming it.
    pub fn pending(&self) -> Option<Page> {
        *self.slot()
    }

    /// Consumes the pending redirect.
    pub fn take_redirect(&self) -> Option<Page> {
        self.slot().take()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Page>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
