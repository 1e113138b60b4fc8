//! Transient on-screen notifications.
//!
//! A [`ToastContainer`] is created once per process and lives for its whole
//! duration. Each [`ToastContainer::show`] appends a toast and schedules its
//! own dismissal: visible for 5 s, then fading, then removed 0.5 s later.
//! Front ends follow changes through [`ToastContainer::subscribe`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::{sleep, Instant};
use uuid::Uuid;

use crate::constants::{TOAST_FADE_DURATION, TOAST_VISIBLE_DURATION};

/// Capacity of the event channel. Slow subscribers skip older events.
const EVENT_CAPACITY: usize = 64;

/// Display phase of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastState {
    /// Fully shown.
    Visible,
    /// Fading out, about to be removed.
    Hiding,
}

/// A toast currently in the container.
#[derive(Debug, Clone)]
pub struct Toast {
    /// Identifier, unique per toast.
    pub id: Uuid,
    /// Text shown.
    pub message: String,
    /// Display phase.
    pub state: ToastState,
    /// When it was added.
    pub shown_at: Instant,
}

/// Change in the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastEvent {
    /// A toast was appended.
    Shown {
        /// Toast identifier.
        id: Uuid,
        /// Toast text.
        message: String,
    },
    /// A toast started fading.
    Hiding {
        /// Toast identifier.
        id: Uuid,
    },
    /// A toast was removed.
    Removed {
        /// Toast identifier.
        id: Uuid,
    },
}

/// Persistent holder of the active toasts.
#[derive(Debug, Clone)]
pub struct ToastContainer {
    toasts: Arc<Mutex<Vec<Toast>>>,
    visible_for: Duration,
    fade_for: Duration,
    events: broadcast::Sender<ToastEvent>,
}

impl Default for ToastContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastContainer {
    /// Container with the standard 5 s + 0.5 s lifetime.
    pub fn new() -> Self {
        Self::with_timing(TOAST_VISIBLE_DURATION, TOAST_FADE_DURATION)
    }

    /// Container with custom timing.
    pub fn with_timing(visible_for: Duration, fade_for: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            toasts: Arc::new(Mutex::new(Vec::new())),
            visible_for,
            fade_for,
            events,
        }
    }

    /// Appends a toast and schedules its dismissal.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&self, message: impl Into<String>) -> Uuid {
        let message = message.into();
        let id = Uuid::new_v4();

        self.lock().push(Toast {
            id,
            message: message.clone(),
            state: ToastState::Visible,
            shown_at: Instant::now(),
        });
        self.emit(ToastEvent::Shown { id, message });

        let container = self.clone();
        tokio::spawn(async move {
            sleep(container.visible_for).await;
            container.mark_hiding(id);
            sleep(container.fade_for).await;
            container.remove(id);
        });

        id
    }

    /// Snapshot of the toasts, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.lock().clone()
    }

    /// Number of toasts on screen.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no toast is on screen.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Receives every subsequent change.
    pub fn subscribe(&self) -> broadcast::Receiver<ToastEvent> {
        self.events.subscribe()
    }

    fn mark_hiding(&self, id: Uuid) {
        if let Some(toast) = self.lock().iter_mut().find(|t| t.id == id) {
            toast.state = ToastState::Hiding;
        }
        self.emit(ToastEvent::Hiding { id });
    }

    fn remove(&self, id: Uuid) {
        self.lock().retain(|t| t.id != id);
        self.emit(ToastEvent::Removed { id });
    }

    fn emit(&self, event: ToastEvent) {
        // Err only means nobody is listening
        let _ = self.events.send(event);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Toast>> {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
