//! # Notifications
//!
//! Transient, user-facing messages ("toasts"). Every user action in the
//! portal ends in exactly one of these, success or failure. The library
//! emits them through the [`Notifier`] trait; the front end decides how to
//! show them.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Default,
    Destructive,
}

/// A single toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Destructive,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == Variant::Destructive
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let marker = match self.variant {
            Variant::Default => "✓",
            Variant::Destructive => "✗",
        };
        write!(f, "{} {}: {}", marker, self.title, self.description)
    }
}

/// Sink for notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Shared, append-only notification log. Cloning shares the log.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything notified so far.
    pub fn entries(&self) -> Vec<Notification> {
        self.entries.lock().clone()
    }

    /// Removes and returns everything notified so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.entries.lock())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        tracing::debug!(title = %notification.title, "notification");
        self.entries.lock().push(notification);
    }
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_is_shared_across_clones() {
        let log = NotificationLog::new();
        let other = log.clone();
        other.notify(Notification::info("Vault Created", "ok"));
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].title, "Vault Created");
    }

    #[test]
    fn drain_empties_the_log() {
        let log = NotificationLog::new();
        log.notify(Notification::destructive("Approval Failed", "nope"));
        let drained = log.drain();
        assert_eq!(drained.len(), 1);
        assert!(drained[0].is_destructive());
        assert!(log.is_empty());
    }

    #[test]
    fn display_marks_variant() {
        let n = Notification::destructive("Wallet Not Connected", "Please connect your wallet first.");
        assert_eq!(n.to_string(), "✗ Wallet Not Connected: Please connect your wallet first.");
    }
}
