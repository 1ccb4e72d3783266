use std::sync::Mutex;

use crate::models::notification::{Notification, NotificationKind};

/// Alert surface the screens report outcomes to.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes alerts to the terminal: successes on stdout, failures on stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => println!("{notification}"),
            NotificationKind::Failure => eprintln!("{notification}"),
        }
    }
}

/// Keeps every alert in memory, in the order received.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn count(&self, kind: NotificationKind) -> usize {
        self.all().iter().filter(|n| n.kind == kind).count()
    }

    pub fn successes(&self) -> usize {
        self.count(NotificationKind::Success)
    }

    pub fn failures(&self) -> usize {
        self.count(NotificationKind::Failure)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(notification);
    }
}
