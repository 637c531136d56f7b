//! Notifier that forwards notifications to the tracing subscriber.

use tracing::{info, warn};

use crate::task::ports::{Notification, NotificationLevel, Notifier};

/// Notifier for headless sessions: successes log at `INFO`, errors at
/// `WARN`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => info!(target: "taskboard::notify", "{notification}"),
            NotificationLevel::Error => warn!(target: "taskboard::notify", "{notification}"),
        }
    }
}
