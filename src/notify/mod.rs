//! Desktop-notification collaborator.
//!
//! The engine only ever hands a title and body to a [`Notifier`] and moves
//! on; no return value is consumed. [`DesktopNotifier`] displays a native
//! OS notification, [`NullNotifier`] is for headless hosts, and
//! [`RecordingNotifier`](crate::testing::RecordingNotifier) captures calls
//! in tests.

use tracing::warn;

/// Capability to display a notification. Fire-and-forget.
pub trait Notifier: Send + Sync {
    /// Display a notification with the given title and body.
    fn notify(&self, title: &str, body: &str);
}

/// Production notifier backed by the platform's native notification system.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) {
        if let Err(error) = notify_rust::Notification::new()
            .summary(title)
            .body(body)
            .show()
        {
            warn!(%error, title, "failed to display desktop notification");
        }
    }
}

/// Notifier that silently drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _title: &str, _body: &str) {}
}
