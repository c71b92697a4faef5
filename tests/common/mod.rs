//! Shared helpers for integration tests.

use runbook::testing::{console_context, RecordingNotifier, StubPinger};
use runbook::Executor;

/// Build an executor in a console-capable, under-test context with
/// recording collaborators, returning handles to both doubles.
pub fn console_executor() -> (Executor, RecordingNotifier, StubPinger) {
    let notifier = RecordingNotifier::new();
    let pinger = StubPinger::new();
    let executor = Executor::new(console_context())
        .with_notifier(notifier.clone())
        .with_pinger(pinger.clone());
    (executor, notifier, pinger)
}
