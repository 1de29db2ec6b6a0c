//! # Notification Center
//!
//! User-visible acknowledgments and error banners. Every pushed
//! notification auto-dismisses after a configurable delay; the dismiss
//! timer is an owned task, aborted on manual dismissal and on teardown,
//! so no timer outlives the component that scheduled it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::info;

/// Severity/kind of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

/// One active notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
}

/// The notification center.
pub struct NotificationCenter {
    active: Arc<Mutex<Vec<Notification>>>,
    timers: Mutex<HashMap<u64, JoinHandle<()>>>,
    next_id: AtomicU64,
    dismiss_after: Duration,
}

impl NotificationCenter {
    /// Creates a center whose notifications auto-dismiss after `dismiss_after`.
    ///
    /// Must be constructed inside a tokio runtime; every push spawns a
    /// dismiss timer.
    pub fn new(dismiss_after: Duration) -> Self {
        NotificationCenter {
            active: Arc::new(Mutex::new(Vec::new())),
            timers: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            dismiss_after,
        }
    }

    /// Shows a notification and schedules its auto-dismiss.
    pub fn push(&self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        let message = message.into();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        info!(kind = ?kind, %message, "notification");

        if let Ok(mut active) = self.active.lock() {
            active.push(Notification {
                id,
                message,
                kind,
            });
        }

        let active = Arc::clone(&self.active);
        let delay = self.dismiss_after;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Ok(mut active) = active.lock() {
                active.retain(|n| n.id != id);
            }
        });

        if let Ok(mut timers) = self.timers.lock() {
            // Reap timers for notifications that are long gone
            timers.retain(|_, handle| !handle.is_finished());
            timers.insert(id, timer);
        }

        id
    }

    /// Dismisses a notification early, cancelling its timer.
    pub fn dismiss(&self, id: u64) {
        if let Ok(mut active) = self.active.lock() {
            active.retain(|n| n.id != id);
        }
        if let Ok(mut timers) = self.timers.lock() {
            if let Some(timer) = timers.remove(&id) {
                timer.abort();
            }
        }
    }

    /// Snapshot of the currently visible notifications.
    pub fn active(&self) -> Vec<Notification> {
        self.active
            .lock()
            .map(|a| a.clone())
            .unwrap_or_default()
    }
}

/// Teardown aborts every outstanding dismiss timer.
impl Drop for NotificationCenter {
    fn drop(&mut self) {
        if let Ok(timers) = self.timers.lock() {
            for timer in timers.values() {
                timer.abort();
            }
        }
    }
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("active", &self.active().len())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_push_and_auto_dismiss() {
        let center = NotificationCenter::new(Duration::from_millis(20));
        center.push("Order received", NotificationKind::Success);
        assert_eq!(center.active().len(), 1);

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(center.active().is_empty());
    }

    #[tokio::test]
    async fn test_manual_dismiss_cancels_timer() {
        let center = NotificationCenter::new(Duration::from_secs(3600));
        let id = center.push("Slow one", NotificationKind::Info);
        assert_eq!(center.active().len(), 1);

        center.dismiss(id);
        assert!(center.active().is_empty());
    }

    #[tokio::test]
    async fn test_independent_notifications() {
        let center = NotificationCenter::new(Duration::from_secs(3600));
        let a = center.push("first", NotificationKind::Info);
        let _b = center.push("second", NotificationKind::Error);

        center.dismiss(a);
        let active = center.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "second");
    }

    #[tokio::test]
    async fn test_drop_aborts_timers() {
        let center = NotificationCenter::new(Duration::from_secs(3600));
        center.push("doomed", NotificationKind::Warning);
        // Dropping must not hang on the hour-long timer
        drop(center);
    }
}
