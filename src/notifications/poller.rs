//! Notification polling loop.
//!
//! # States
//!
//! - **Idle**: no credential stored. Ticks do nothing, no request is sent.
//! - **Polling**: credential present. Each tick fetches unread
//!   notifications, shows one toast per item and acknowledges all of them
//!   with a single fire-and-forget call.
//!
//! The loop ticks immediately, then every interval. It does not stop when
//! the user signs out; it goes dormant until a credential shows up again.
//! Each tick runs as its own task, so a slow poll can overlap the next one.
//!
//! Poll and acknowledgement carry the credential but a 401/403 on either is
//! only logged. Signing out is left to the page calls.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::toast::ToastContainer;
use crate::constants::NOTIFICATION_POLL_INTERVAL;
use crate::error::ClientResult;
use crate::server::ApiClient;

/// Whether the poller currently has anything to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    /// No credential; ticks are no-ops.
    Idle,
    /// Credential present; ticks hit the server.
    Polling,
}

/// Result of one tick.
#[derive(Debug)]
pub struct TickOutcome {
    /// Toasts created.
    pub shown: usize,
    /// The detached acknowledgement task, when one was sent.
    pub acknowledgement: Option<JoinHandle<()>>,
}

impl TickOutcome {
    fn skipped() -> Self {
        Self {
            shown: 0,
            acknowledgement: None,
        }
    }
}

/// Fixed-interval notification fetcher.
#[derive(Debug, Clone)]
pub struct NotificationPoller {
    api: ApiClient,
    toasts: ToastContainer,
    subject_email: String,
    interval: Duration,
}

impl NotificationPoller {
    /// Creates a poller for `subject_email`.
    pub fn new(api: ApiClient, toasts: ToastContainer, subject_email: impl Into<String>) -> Self {
        Self {
            api,
            toasts,
            subject_email: subject_email.into(),
            interval: NOTIFICATION_POLL_INTERVAL,
        }
    }

    /// Overrides the tick interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Email the notifications are fetched for.
    pub fn subject_email(&self) -> &str {
        &self.subject_email
    }

    /// Current state, derived from the stored credential.
    pub fn state(&self) -> PollerState {
        if self.api.session().token().is_some() {
            PollerState::Polling
        } else {
            PollerState::Idle
        }
    }

    /// Runs one poll.
    pub async fn tick(&self) -> ClientResult<TickOutcome> {
        if self.state() == PollerState::Idle {
            log::trace!("No credential, skipping notification poll");
            return Ok(TickOutcome::skipped());
        }

        let notifications = self.api.notifications(&self.subject_email).await?;
        if notifications.is_empty() {
            return Ok(TickOutcome::skipped());
        }

        let mut ids = Vec::with_capacity(notifications.len());
        for notification in notifications {
            self.toasts.show(notification.message);
            ids.push(notification.id);
        }

        let shown = ids.len();
        log::info!("Showing {shown} new notification(s)");

        Ok(TickOutcome {
            shown,
            acknowledgement: Some(self.acknowledge(ids)),
        })
    }

    /// Marks `ids` read in the background. The outcome is not observed.
    fn acknowledge(&self, ids: Vec<String>) -> JoinHandle<()> {
        let api = self.api.clone();
        tokio::spawn(async move {
            if let Err(e) = api.mark_notifications_read(ids).await {
                log::debug!("Notification acknowledgement failed: {e}");
            }
        })
    }

    /// Ticks until `shutdown` fires. `completed` counts finished ticks,
    /// acknowledgement included.
    pub async fn run(self, shutdown: CancellationToken, completed: watch::Sender<u64>) {
        let completed = Arc::new(completed);
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        log::info!(
            "Notification polling started for {} every {:?}",
            self.subject_email,
            self.interval
        );

        loop {
            tokio::select! {
                () = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    let poller = self.clone();
                    let completed = Arc::clone(&completed);
                    tokio::spawn(async move {
                        poller.tick_and_log().await;
                        completed.send_modify(|done| *done += 1);
                    });
                }
            }
        }

        log::info!("Notification polling stopped");
    }

    /// Starts [`run`](Self::run) on the current runtime.
    pub fn spawn(self) -> PollerHandle {
        let shutdown = CancellationToken::new();
        let (completed_tx, completed) = watch::channel(0);
        let task = tokio::spawn(self.run(shutdown.clone(), completed_tx));
        PollerHandle {
            shutdown,
            task,
            completed,
        }
    }

    async fn tick_and_log(&self) {
        match self.tick().await {
            Ok(TickOutcome {
                acknowledgement: Some(ack),
                ..
            }) => {
                if let Err(e) = ack.await {
                    log::debug!("Acknowledgement task ended abnormally: {e}");
                }
            }
            Ok(_) => {}
            Err(e) => log::warn!("Notification poll failed: {e}"),
        }
    }
}

/// Handle to a running poller.
#[derive(Debug)]
pub struct PollerHandle {
    shutdown: CancellationToken,
    task: JoinHandle<()>,
    completed: watch::Receiver<u64>,
}

impl PollerHandle {
    /// Whether the loop is still running.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Number of ticks finished so far.
    pub fn completed_ticks(&self) -> u64 {
        *self.completed.borrow()
    }

    /// Waits until `count` ticks have finished.
    ///
    /// Returns `false` if the poller went away first.
    pub async fn wait_for_ticks(&mut self, count: u64) -> bool {
        self.completed.wait_for(|done| *done >= count).await.is_ok()
    }

    /// Stops the loop and waits for it. In-flight polls are not cancelled.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        if let Err(e) = self.task.await {
            log::warn!("Notification poller ended abnormally: {e}");
        }
    }
}

/// Starts polling when a subject identity is stored.
pub fn start_if_signed_in(
    api: &ApiClient,
    toasts: &ToastContainer,
    interval: Duration,
) -> Option<PollerHandle> {
    let email = api.session().subject_email()?;
    Some(
        NotificationPoller::new(api.clone(), toasts.clone(), email)
            .with_interval(interval)
            .spawn(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::SessionGate;
    use crate::navigation::Navigator;
    use crate::session::SessionContext;

    fn offline_api(session: SessionContext) -> ApiClient {
        // Nothing listens here; any request would fail as a transport error
        let gate = SessionGate::with_client(
            reqwest::Client::new(),
            "http://127.0.0.1:9",
            session,
            Navigator::new(),
        );
        ApiClient::new(gate)
    }

    #[tokio::test]
    async fn test_tick_without_credential_is_noop() {
        let session = SessionContext::in_memory();
        session.set_subject_email("ada@example.com").unwrap();
        let toasts = ToastContainer::new();
        let poller = NotificationPoller::new(offline_api(session), toasts.clone(), "ada@example.com");

        assert_eq!(poller.state(), PollerState::Idle);
        let outcome = poller.tick().await.unwrap();
        assert_eq!(outcome.shown, 0);
        assert!(outcome.acknowledgement.is_none());
        assert!(toasts.is_empty());
    }

    #[tokio::test]
    async fn test_state_follows_credential() {
        let session = SessionContext::in_memory();
        let poller =
            NotificationPoller::new(offline_api(session.clone()), ToastContainer::new(), "a@b.c");

        assert_eq!(poller.state(), PollerState::Idle);
        session.set_token("abc").unwrap();
        assert_eq!(poller.state(), PollerState::Polling);
        session.clear_auth().unwrap();
        assert_eq!(poller.state(), PollerState::Idle);
    }

    #[tokio::test]
    async fn test_not_started_without_identity() {
        let api = offline_api(SessionContext::in_memory());
        assert!(start_if_signed_in(&api, &ToastContainer::new(), Duration::from_secs(30)).is_none());
    }

    #[tokio::test]
    async fn test_handle_shutdown_stops_loop() {
        let session = SessionContext::in_memory();
        session.set_subject_email("ada@example.com").unwrap();
        let api = offline_api(session);

        let handle = start_if_signed_in(&api, &ToastContainer::new(), Duration::from_secs(30))
            .expect("identity is stored");
        assert!(handle.is_running());
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_first_tick_is_counted_without_credential() {
        let session = SessionContext::in_memory();
        session.set_subject_email("ada@example.com").unwrap();
        let api = offline_api(session);

        let mut handle = start_if_signed_in(&api, &ToastContainer::new(), Duration::from_secs(30))
            .expect("identity is stored");
        assert!(handle.wait_for_ticks(1).await);
        assert_eq!(handle.completed_ticks(), 1);
        handle.shutdown().await;
    }
}
