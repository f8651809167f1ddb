use crate::common::Notification;

/// Surfaces retrieval failures to the person looking at the page.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Blocking-alert stand-in for terminals: writes the notice to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notification: Notification) {
        eprintln!(
            "[{}] {}",
            notification.raised_at.format("%H:%M:%S"),
            notification.message
        );
    }
}

/// Keeps every notification; used by callers that inspect failures afterwards.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub notifications: Vec<Notification>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.notifications.len()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}
