//! Application-wide constants for the PeerSkill client.
//!
//! This module centralizes magic numbers, endpoint bases and persisted key
//! names so they are discoverable in one place. Constants are grouped by
//! domain.
//!
//! # Categories
//!
//! - **Backends**: API base URLs per environment
//! - **Timing**: Request timeout, notification polling, toasts, search debounce
//! - **Storage**: Keys of the persisted key-value state
//! - **Presentation**: Defaults used when rendering views

use std::time::Duration;

// ============================================================================
// Backends
// ============================================================================

/// API base URL used when running against a local backend.
pub const LOCAL_API_BASE_URL: &str = "http://localhost:5000";

/// API base URL of the hosted backend.
pub const HOSTED_API_BASE_URL: &str = "https://peerskill-backend.onrender.com";

// ============================================================================
// Timing
// ============================================================================

/// HTTP client request timeout for API calls.
///
/// The hosted backend sleeps when idle and can take several seconds to
/// answer the first request, so this is kept above the usual few seconds.
pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Interval between notification polls.
pub const NOTIFICATION_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// How long a toast stays fully visible before it starts fading.
pub const TOAST_VISIBLE_DURATION: Duration = Duration::from_secs(5);

/// Fade-out time after which a hidden toast is removed from the container.
pub const TOAST_FADE_DURATION: Duration = Duration::from_millis(500);

/// Quiet period after the last keystroke before a peer search fires.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Upper bound on redirects followed after a single command.
pub const MAX_REDIRECTS: usize = 4;

// ============================================================================
// Storage
// ============================================================================

/// Persisted key holding the bearer credential.
pub const KEY_TOKEN: &str = "token";

/// Persisted key holding the signed-in user's email (subject identity).
pub const KEY_USER_EMAIL: &str = "userEmail";

/// Persisted key holding the privilege flag (`"true"` when admin).
pub const KEY_IS_ADMIN: &str = "isAdmin";

/// Persisted key holding the display theme preference.
pub const KEY_THEME: &str = "psx_theme";

/// Keys cleared when the server rejects the credential.
///
/// Everything else in the store (theme, future preferences) survives.
pub const SESSION_KEYS: &[&str] = &[KEY_TOKEN, KEY_USER_EMAIL, KEY_IS_ADMIN];

// ============================================================================
// Presentation
// ============================================================================

/// Email of the built-in administrator account.
pub const ADMIN_EMAIL: &str = "admin@peerskill.com";

/// Avatar shown when a user has not picked one.
pub const DEFAULT_AVATAR: &str = "profile_pictures/bot.png";

/// Number of taught skills previewed on a random-peer card.
pub const PEER_CARD_SKILL_PREVIEW: usize = 2;

/// Highest star rating a peer can receive.
pub const MAX_RATING: u8 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_lifetime_is_five_and_a_half_seconds() {
        assert_eq!(
            TOAST_VISIBLE_DURATION + TOAST_FADE_DURATION,
            Duration::from_millis(5500)
        );
    }

    #[test]
    fn test_session_keys_exclude_theme() {
        assert_eq!(SESSION_KEYS.len(), 3);
        assert!(!SESSION_KEYS.contains(&KEY_THEME));
    }

    #[test]
    fn test_timing_values_are_reasonable() {
        // Debounce must be far shorter than the poll interval
        assert!(SEARCH_DEBOUNCE < Duration::from_secs(1));
        assert!(NOTIFICATION_POLL_INTERVAL >= Duration::from_secs(10));
        assert!(HTTP_REQUEST_TIMEOUT <= Duration::from_secs(60));
    }
}
