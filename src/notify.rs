//! Ephemeral notification emitter.
//!
//! Keeps at most the 5 newest notifications; each entry is removed by its own
//! expiry task 5 seconds after creation, independent of any other entry. All
//! timers are owned by the emitter and aborted on shutdown so a torn-down
//! session leaks nothing.

use crate::domain::{Notification, Severity};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Maximum notifications retained at once.
pub const MAX_VISIBLE: usize = 5;

/// Lifetime of a single notification.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Default)]
pub struct Notifier {
    entries: Mutex<Vec<Notification>>,
    timers: Mutex<Vec<JoinHandle<()>>>,
}

impl Notifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Notifier::default())
    }

    /// Emit a notification. Prepends, truncates to the cap, and schedules the
    /// removal of this specific entry after the fixed TTL.
    pub fn push(self: &Arc<Self>, message: impl Into<String>, severity: Severity) -> Notification {
        let notification = Notification::new(message, severity);
        let id = notification.id.clone();

        {
            let mut entries = self.entries.lock().expect("notifier lock poisoned");
            entries.insert(0, notification.clone());
            entries.truncate(MAX_VISIBLE);
        }

        let weak = Arc::downgrade(self);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(NOTIFICATION_TTL).await;
            if let Some(notifier) = weak.upgrade() {
                let mut entries = notifier.entries.lock().expect("notifier lock poisoned");
                entries.retain(|n| n.id != id);
            }
        });

        let mut timers = self.timers.lock().expect("notifier lock poisoned");
        timers.retain(|t| !t.is_finished());
        timers.push(handle);

        notification
    }

    /// Current notifications, newest first.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.entries.lock().expect("notifier lock poisoned").clone()
    }

    /// Cancel every outstanding expiry timer and clear the list.
    pub fn shutdown(&self) {
        for handle in self.timers.lock().expect("notifier lock poisoned").drain(..) {
            handle.abort();
        }
        self.entries.lock().expect("notifier lock poisoned").clear();
    }
}
