//! Shared state for one client invocation.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::Config;
use crate::gate::SessionGate;
use crate::navigation::Navigator;
use crate::notifications::{start_if_signed_in, PollerHandle, ToastContainer};
use crate::prompt::Prompter;
use crate::server::ApiClient;
use crate::session::SessionContext;

/// Everything a page needs, wired together once at startup.
///
/// The session, navigator and toast container are shared handles: the
/// gate, the poller and the pages all see the same state.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Loaded configuration.
    pub config: Config,
    /// Persisted session state.
    pub session: SessionContext,
    /// Pending redirect slot.
    pub navigator: Navigator,
    /// API client (owns the session gate).
    pub api: ApiClient,
    /// Process-wide toast container.
    pub toasts: ToastContainer,
    /// Alert/confirm dialogs.
    pub prompter: Arc<dyn Prompter>,
}

impl AppContext {
    /// Builds the context and the HTTP client behind it.
    pub fn new(config: Config, session: SessionContext, prompter: Arc<dyn Prompter>) -> Result<Self> {
        let navigator = Navigator::new();
        let base_url = config.api_base_url();
        let gate = SessionGate::new(
            base_url.as_str(),
            config.request_timeout(),
            session.clone(),
            navigator.clone(),
        )
        .with_context(|| format!("Failed to create HTTP client for {base_url}"))?;

        log::debug!("Using API at {}", gate.base_url());

        Ok(Self {
            config,
            session,
            navigator,
            api: ApiClient::new(gate),
            toasts: ToastContainer::new(),
            prompter,
        })
    }

    /// Context against `base_url` with in-memory session state.
    pub fn in_memory(base_url: &str, prompter: Arc<dyn Prompter>) -> Result<Self> {
        let config = Config {
            api_base_url: Some(base_url.to_string()),
            ..Config::default()
        };
        Self::new(config, SessionContext::in_memory(), prompter)
    }

    /// Shows a blocking alert.
    pub fn alert(&self, message: &str) {
        self.prompter.alert(message);
    }

    /// Asks for confirmation.
    pub fn confirm(&self, message: &str) -> bool {
        self.prompter.confirm(message)
    }

    /// Starts notification polling when an email is stored. The first poll
    /// runs right away.
    pub fn start_notifications(&self) -> Option<PollerHandle> {
        start_if_signed_in(&self.api, &self.toasts, self.config.poll_interval())
    }

    /// Waits for the first poll of `poller` (bounded by the request
    /// timeout), stops it and returns the messages on screen.
    pub async fn finish_notifications(&self, mut poller: PollerHandle) -> Vec<String> {
        let first_poll = poller.wait_for_ticks(1);
        if tokio::time::timeout(self.config.request_timeout(), first_poll)
            .await
            .is_err()
        {
            log::debug!("First notification poll still running, not waiting");
        }
        poller.shutdown().await;

        self.toasts.toasts().into_iter().map(|t| t.message).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;

    #[test]
    fn test_in_memory_context_uses_given_url() {
        let app = AppContext::in_memory("http://127.0.0.1:4010/", Arc::new(ScriptedPrompter::default()))
            .unwrap();
        assert_eq!(app.api.gate().base_url(), "http://127.0.0.1:4010");
        assert!(!app.session.is_signed_in());
        assert!(app.navigator.pending().is_none());
    }

    #[tokio::test]
    async fn test_no_notifications_without_identity() {
        let app = AppContext::in_memory("http://127.0.0.1:4010", Arc::new(ScriptedPrompter::default()))
            .unwrap();
        assert!(app.start_notifications().is_none());
    }

    #[test]
    fn test_gate_shares_navigator() {
        let app = AppContext::in_memory("http://127.0.0.1:4010", Arc::new(ScriptedPrompter::default()))
            .unwrap();
        app.api.gate().navigator().redirect(crate::navigation::Page::Login);
        assert_eq!(app.navigator.take_redirect(), Some(crate::navigation::Page::Login));
    }
}
