//! Single-slot notification timer.
//!
//! A new notification replaces the visible one immediately. Each shown
//! notification moves `Visible -> Closing -> removed` on its own timer; only
//! one timer is armed at a time and every timer step checks that it still
//! belongs to the current notification before writing.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    fn icon(self) -> &'static str {
        match self {
            NotificationKind::Success => "✓",
            NotificationKind::Error => "✕",
            NotificationKind::Info => "ℹ",
        }
    }
}

/// Transient message shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub icon: String,
    pub title: String,
    pub content: String,
    pub kind: NotificationKind,
    pub raised_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            icon: kind.icon().to_string(),
            title: title.into(),
            content: content.into(),
            kind,
            raised_at: Utc::now(),
        }
    }

    pub fn success(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, title, content)
    }

    pub fn error(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, title, content)
    }

    pub fn info(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, title, content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Visible,
    /// Exit transition; removed once it elapses.
    Closing,
}

/// The notification currently occupying the slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveNotification {
    /// Generation that armed it; stale timers compare against this.
    pub id: u64,
    pub notification: Notification,
    pub phase: Phase,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

#[derive(Debug)]
struct Inner {
    slot: Mutex<Slot>,
    state: watch::Sender<Option<LiveNotification>>,
    visible: Duration,
    exit: Duration,
}

impl Inner {
    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_closing(&self, id: u64) -> bool {
        self.state.send_if_modified(|current| match current {
            Some(live) if live.id == id && live.phase == Phase::Visible => {
                live.phase = Phase::Closing;
                true
            }
            _ => false,
        })
    }

    fn remove(&self, id: u64) {
        let removed = self.state.send_if_modified(|current| {
            if current.as_ref().is_some_and(|live| live.id == id) {
                *current = None;
                true
            } else {
                false
            }
        });
        if removed {
            tracing::debug!(id, "notification removed");
        }
    }
}

/// Owner of the notification slot. Cloning shares the slot.
///
/// Timers run on the ambient tokio runtime, so [`NotificationCenter::show`]
/// and [`NotificationCenter::close`] must be called from within one.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    inner: Arc<Inner>,
}

impl NotificationCenter {
    pub fn new(visible: Duration, exit: Duration) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                slot: Mutex::new(Slot::default()),
                state,
                visible,
                exit,
            }),
        }
    }

    /// Replace whatever is shown with `notification` and re-arm the timer.
    pub fn show(&self, notification: Notification) -> u64 {
        let mut slot = self.inner.slot();
        slot.generation += 1;
        let id = slot.generation;
        if let Some(previous) = slot.timer.take() {
            previous.abort();
        }

        tracing::debug!(id, kind = ?notification.kind, title = %notification.title, "notification shown");
        self.inner.state.send_replace(Some(LiveNotification {
            id,
            notification,
            phase: Phase::Visible,
        }));

        let inner = Arc::clone(&self.inner);
        slot.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(inner.visible).await;
            if inner.begin_closing(id) {
                tokio::time::sleep(inner.exit).await;
                inner.remove(id);
            }
        }));
        id
    }

    /// Manual close: skip the rest of the visible phase and start the exit
    /// transition. Returns `false` when nothing is visible.
    pub fn close(&self) -> bool {
        let mut slot = self.inner.slot();
        let Some(id) = self
            .inner
            .state
            .borrow()
            .as_ref()
            .filter(|live| live.phase == Phase::Visible)
            .map(|live| live.id)
        else {
            return false;
        };

        if let Some(previous) = slot.timer.take() {
            previous.abort();
        }
        self.inner.begin_closing(id);

        let inner = Arc::clone(&self.inner);
        slot.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(inner.exit).await;
            inner.remove(id);
        }));
        true
    }

    pub fn current(&self) -> Option<LiveNotification> {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<LiveNotification>> {
        self.inner.state.subscribe()
    }

    /// Disarm the timer and clear the slot.
    pub fn shutdown(&self) {
        let mut slot = self.inner.slot();
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }
        self.inner.state.send_replace(None);
    }
}
