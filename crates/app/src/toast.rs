//! In-process toast board backing the [`Notifier`] port.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use agridash_domain::notification::{Notification, NotificationLevel};
use tokio::time::Instant;

use crate::ports::Notifier;

/// How long a toast stays visible unless dismissed.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(5);

/// A notification on display.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub notification: Notification,
    created_at: Instant,
}

/// Transient notifications with auto-expiry and manual dismissal.
///
/// Ids are strictly increasing for the lifetime of the board.
#[derive(Debug)]
pub struct ToastBoard {
    ttl: Duration,
    next_id: AtomicU32,
    toasts: Mutex<Vec<Toast>>,
}

impl Default for ToastBoard {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TTL)
    }
}

impl ToastBoard {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            next_id: AtomicU32::new(1),
            toasts: Mutex::new(Vec::new()),
        }
    }

    /// Toasts still on display, oldest first. Expired toasts are dropped.
    pub fn active(&self) -> Vec<Toast> {
        let now = Instant::now();
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        toasts.retain(|toast| now.duration_since(toast.created_at) < self.ttl);
        toasts.clone()
    }

    /// Remove a toast. Returns `false` when it was already gone.
    pub fn dismiss(&self, id: u32) -> bool {
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        let before = toasts.len();
        toasts.retain(|toast| toast.id != id);
        toasts.len() != before
    }
}

impl Notifier for ToastBoard {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => tracing::warn!(text = %notification.message, "error notification"),
            NotificationLevel::Success | NotificationLevel::Info => {
                tracing::info!(level = %notification.level, text = %notification.message, "notification");
            }
        }
        let toast = Toast {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            notification,
            created_at: Instant::now(),
        };
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast);
    }
}
