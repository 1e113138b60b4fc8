//! PeerSkill - client for the peer-to-peer skill exchange.
//!
//! This crate provides the API SDK and the page logic behind the
//! `peerskill` command-line client.
//!
//! # Architecture
//!
//! - **Session gate** - Every page request goes through one wrapper
//!   that attaches the credential and signs the user out on 401/403
//! - **Notification poller** - Fixed-interval fetch of unread notifications,
//!   shown as auto-dismissing toasts and acknowledged in bulk
//! - **Pages** - One initializer per screen, resolved once per invocation
//! - **Session context** - Explicit handle over the persisted state, shared by
//!   the gate, the poller and the pages
//!
//! # Modules
//!
//! - [`gate`] - Authenticated request wrapper
//! - [`notifications`] - Poller and toast container
//! - [`server`] - Typed API client
//! - [`pages`] - Page initializers and actions
//! - [`config`] - Configuration loading/saving

// Library modules
pub mod app;
pub mod gate;
pub mod notifications;
pub mod pages;
pub mod search;
pub mod server;

pub mod avatars;
pub mod config;
pub mod constants;
pub mod env;
pub mod error;
pub mod navigation;
pub mod prompt;
pub mod session;
pub mod store;
pub mod tags;
pub mod views;

// Re-export commonly used types
pub use app::AppContext;
pub use config::Config;
pub use error::{ClientError, ClientResult};
pub use gate::{RequestOptions, SessionGate};
pub use navigation::{Navigator, Page};
pub use notifications::{NotificationPoller, PollerHandle, ToastContainer};
pub use server::ApiClient;
pub use session::{SessionContext, Theme};
