//! Cancellation scope of a board session.
//!
//! Persistence calls started by a board race the session token. Once the
//! session is cancelled, pending calls stop being awaited and their results
//! are discarded, so a torn-down view is never updated.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

/// Cloneable cancellation token tied to one board session.
#[derive(Debug, Clone)]
pub struct SessionToken {
    sender: Arc<watch::Sender<bool>>,
    receiver: watch::Receiver<bool>,
}

impl Default for SessionToken {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionToken {
    /// Creates a live token.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Cancels the session; every clone observes it.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    /// Returns whether the session has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Completes once the session is cancelled.
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        let outcome = receiver.wait_for(|cancelled| *cancelled).await.map(|_| ());
        if outcome.is_err() {
            // Sender gone: the session can no longer be cancelled.
            std::future::pending::<()>().await;
        }
    }

    /// Drives `operation` unless the session is cancelled first.
    ///
    /// Returns `None` when the session was cancelled before or while the
    /// operation ran.
    pub async fn run<F>(&self, operation: F) -> Option<F::Output>
    where
        F: Future,
    {
        if self.is_cancelled() {
            return None;
        }
        tokio::select! {
            biased;
            () = self.cancelled() => None,
            output = operation => Some(output),
        }
    }
}
