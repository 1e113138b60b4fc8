//! Server communication module.
//!
//! This module provides the typed surface of the PeerSkill HTTP API:
//!
//! - HTTP client with one method per endpoint (`ApiClient`)
//! - Request/response data types
//!
//! # Modules
//!
//! - [`client`] - HTTP client for the API
//! - [`types`] - Request/response data types

pub mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{Notification, UserProfile};
