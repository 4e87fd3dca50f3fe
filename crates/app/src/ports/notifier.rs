//! Notifier port: transient user-facing messages.

use std::sync::Arc;

use agridash_domain::notification::Notification;

/// Delivers notifications to the user without blocking the caller.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl<T: Notifier> Notifier for Arc<T> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}
