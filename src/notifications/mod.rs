//! Notification feed for the signed-in user.
//!
//! - [`poller`] - Fixed-interval fetch + acknowledgement loop
//! - [`toast`] - Auto-dismissing on-screen notifications
//!
//! # Example
//!
//! ```ignore
//! let toasts = ToastContainer::new();
//! if let Some(handle) = start_if_signed_in(&api, &toasts, NOTIFICATION_POLL_INTERVAL) {
//!     // ... later
//!     handle.shutdown().await;
//! }
//! ```

pub mod poller;
pub mod toast;

pub use poller::{start_if_signed_in, NotificationPoller, PollerHandle, PollerState, TickOutcome};
pub use toast::{Toast, ToastContainer, ToastEvent, ToastState};
