//! Notifier that records every notification for later inspection.

use std::sync::{Arc, Mutex, PoisonError};

use crate::task::ports::{Notification, Notifier};

/// Thread-safe notifier that keeps every notification in emission order.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    received: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    /// Creates a notifier with no recorded notifications.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every notification received so far.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the most recent notification.
    #[must_use]
    pub fn last(&self) -> Option<Notification> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Forgets every recorded notification.
    pub fn clear(&self) {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
