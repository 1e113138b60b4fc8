//! Debounced peer search.
//!
//! Each new input cancels the pending search; the search only fires once the
//! input has been quiet for [`SEARCH_DEBOUNCE`]. A blank query shows random
//! peers instead of searching.

use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::constants::SEARCH_DEBOUNCE;
use crate::error::ClientResult;
use crate::server::{ApiClient, UserProfile};

/// Delays an action until calls stop arriving.
///
/// Only the timer is cancelled by a newer call: once an action has started
/// it runs to completion.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedules `action`, dropping any action still waiting.
    pub fn call<F>(&mut self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(action);
        }));
    }

    /// Drops the waiting action, if any.
    pub fn cancel(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }
    }

    /// Whether an action is still waiting for its timer.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|t| !t.is_finished())
    }
}

/// Search box bound to one user.
#[derive(Debug)]
pub struct PeerSearch {
    api: ApiClient,
    email: String,
    debouncer: Debouncer,
    results: mpsc::UnboundedSender<ClientResult<Vec<UserProfile>>>,
}

impl PeerSearch {
    /// Search box delivering result lists on `results`.
    pub fn new(
        api: ApiClient,
        email: impl Into<String>,
        results: mpsc::UnboundedSender<ClientResult<Vec<UserProfile>>>,
    ) -> Self {
        Self {
            api,
            email: email.into(),
            debouncer: Debouncer::new(SEARCH_DEBOUNCE),
            results,
        }
    }

    /// Feeds the current contents of the search box.
    pub fn input(&mut self, text: &str) {
        let query = text.trim().to_string();
        let api = self.api.clone();
        let email = self.email.clone();
        let results = self.results.clone();

        self.debouncer.call(async move {
            let peers = if query.is_empty() {
                api.random_peers(&email).await
            } else {
                log::debug!("Searching peers for '{query}'");
                api.search_peers(&email, &query).await
            };
            // Receiver gone means the search box was closed
            let _ = results.send(peers);
        });
    }
}
