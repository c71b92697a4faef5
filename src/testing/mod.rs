//! Testing utilities for hosts orchestrating with [`Executor`].
//!
//! - [`RecordingNotifier`]: captures notifications instead of displaying them
//! - [`StubPinger`]: records pings and returns preset results
//! - [`console_context`] / [`web_context`]: deterministic host contexts
//!
//! [`Executor`]: crate::Executor

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::core::context::ExecutionContext;
use crate::core::error::ExecutorError;
use crate::notify::Notifier;
use crate::ping::Pinger;

/// A console-capable context for tests.
///
/// Marked as under test, so nothing is echoed or streamed to stdout, while
/// interactive commands still pass validation. Rooted at the current
/// directory.
pub fn console_context() -> ExecutionContext {
    ExecutionContext::new(".")
        .running_in_console(true)
        .running_tests(true)
}

/// A non-console context for tests, as seen from a network-request handler.
pub fn web_context() -> ExecutionContext {
    ExecutionContext::new(".").running_tests(true)
}

/// Test double that records notifications instead of displaying them.
///
/// Clones share the same log, so a test can keep a handle after moving the
/// notifier into an executor.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications sent so far, as (title, body) pairs in call order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().expect("lock poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str) {
        self.sent
            .lock()
            .expect("lock poisoned")
            .push((title.to_string(), body.to_string()));
    }
}

/// Test double that records ping requests and returns a preset result.
///
/// Clones share the same request log.
#[derive(Clone, Default)]
pub struct StubPinger {
    requests: Arc<Mutex<Vec<(String, HashMap<String, String>)>>>,
    failure: Option<String>,
}

impl StubPinger {
    /// A pinger whose every request succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// A pinger whose every request fails with the given reason.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            requests: Arc::default(),
            failure: Some(reason.into()),
        }
    }

    /// Requests issued so far, as (url, headers) pairs in call order.
    pub fn requests(&self) -> Vec<(String, HashMap<String, String>)> {
        self.requests.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl Pinger for StubPinger {
    async fn get(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<(), ExecutorError> {
        self.requests
            .lock()
            .expect("lock poisoned")
            .push((url.to_string(), headers.clone()));
        match &self.failure {
            Some(reason) => Err(ExecutorError::Ping {
                url: url.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_call_order() {
        let notifier = RecordingNotifier::new();

        notifier.notify("first", "one");
        notifier.notify("second", "two");

        let sent = notifier.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], ("first".to_string(), "one".to_string()));
        assert_eq!(sent[1], ("second".to_string(), "two".to_string()));
    }

    #[tokio::test]
    async fn test_stub_pinger_records_and_succeeds() {
        let pinger = StubPinger::new();
        let headers = HashMap::from([("X-Probe".to_string(), "1".to_string())]);

        pinger.get("https://example.com/up", &headers).await.unwrap();

        let requests = pinger.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "https://example.com/up");
        assert_eq!(requests[0].1, headers);
    }

    #[tokio::test]
    async fn test_failing_stub_pinger_still_records() {
        let pinger = StubPinger::failing("boom");

        let result = pinger.get("https://example.com/up", &HashMap::new()).await;

        assert!(matches!(result, Err(ExecutorError::Ping { .. })));
        assert_eq!(pinger.requests().len(), 1);
    }

    #[test]
    fn test_contexts_differ_only_in_console_capability() {
        assert!(console_context().is_console());
        assert!(!web_context().is_console());
        assert!(console_context().is_under_test());
        assert!(!console_context().interactive_console());
    }
}
