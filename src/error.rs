//! Error taxonomy for API calls.
//!
//! Callers branch on the variant to decide what the user sees:
//!
//! - [`ClientError::SessionExpired`]: already handled by the session gate
//!   (state cleared, login redirect queued). Show nothing else.
//! - [`ClientError::Application`]: the server answered but refused the
//!   operation. Show a blocking alert.
//! - [`ClientError::Transport`]: the request never completed. Show a
//!   generic alert.
//! - [`ClientError::Serialization`]: a payload could not be encoded or the
//!   reply could not be decoded. Treated like an application failure.

/// Failure of a single API call.
#[derive(Debug)]
pub enum ClientError {
    /// The server rejected the credential with 401 or 403.
    SessionExpired,
    /// The server refused the operation. Carries the server's message when
    /// it sent one.
    Application(Option<String>),
    /// Network-level failure (DNS, refused connection, timeout).
    Transport(reqwest::Error),
    /// Request or response body was not the expected JSON.
    Serialization(String),
}

impl ClientError {
    /// Returns `true` for [`ClientError::SessionExpired`].
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// Server-provided message of an application failure.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Application(message) => message.as_deref(),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SessionExpired => write!(f, "Session Expired"),
            Self::Application(Some(msg)) => write!(f, "{msg}"),
            Self::Application(None) => write!(f, "Request was rejected by the server"),
            Self::Transport(e) => write!(f, "Network error: {e}"),
            Self::Serialization(msg) => write!(f, "Invalid payload: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Serialization(err.to_string())
        } else {
            Self::Transport(err)
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result alias for API calls.
pub type ClientResult<T> = Result<T, ClientError>;
