//! Command execution internals.
//!
//! Two modes of running a command string:
//!
//! - **Captured**: the string is split on whitespace into argv and spawned
//!   with stdout/stderr piped, the working directory forced to the
//!   application root, and an optional deadline. Output chunks are echoed to
//!   stdout as they arrive when the host is an attended console outside
//!   tests. On exit, the caller receives captured stdout for a zero exit and
//!   captured stderr otherwise; a non-zero exit is NOT an error.
//! - **Interactive**: the string is run through `sh -c` with inherited
//!   stdio, so the child talks to the terminal directly and nothing can be
//!   captured. The caller receives a fixed marker describing the outcome.
//!
//! Known limitation: the whitespace split supports no shell quoting, so
//! arguments containing spaces cannot be expressed in captured mode.

use std::io::Write;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::time;
use tracing::debug;

use crate::core::context::ExecutionContext;
use crate::core::error::ExecutorError;

/// Marker appended after an interactive command exits with status 0.
pub(crate) const INTERACTIVE_COMPLETED: &str = " Interactive command completed";

/// Marker appended after an interactive command exits non-zero.
pub(crate) const INTERACTIVE_FAILED: &str = " Interactive command failed";

/// Run a command with captured output.
///
/// Returns the text to append to the output buffer: captured stdout when the
/// process exited successfully, captured stderr otherwise.
pub(crate) async fn run_captured(
    command: &str,
    context: &ExecutionContext,
    timeout: Option<Duration>,
) -> Result<String, ExecutorError> {
    let mut argv = command.split_whitespace();
    let program = argv.next().ok_or(ExecutorError::EmptyCommand)?;
    let echo = context.interactive_console();

    debug!(command, ?timeout, "running captured command");

    let mut child = Command::new(program)
        .args(argv)
        .current_dir(context.app_root())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ExecutorError::Spawn {
            command: command.to_string(),
            source,
        })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let (out, err, status) = match timeout {
        Some(limit) => {
            let collected =
                time::timeout(limit, collect(&mut child, stdout, stderr, echo)).await;
            match collected {
                Ok(collected) => collected.map_err(|source| ExecutorError::Io {
                    command: command.to_string(),
                    source,
                })?,
                Err(_) => {
                    let _ = child.kill().await;
                    return Err(ExecutorError::Timeout {
                        command: command.to_string(),
                        timeout: limit,
                    });
                }
            }
        }
        None => collect(&mut child, stdout, stderr, echo)
            .await
            .map_err(|source| ExecutorError::Io {
                command: command.to_string(),
                source,
            })?,
    };

    debug!(command, code = status.code(), "captured command finished");
    Ok(if status.success() { out } else { err })
}

/// Run a command interactively through the shell with inherited stdio.
///
/// The command string is escaped for shell metacharacters first; this
/// neutralizes legitimate metacharacters too and is a documented limitation,
/// not a security boundary. The deadline does not apply here. Returns the
/// outcome marker to append to the output buffer.
pub(crate) async fn run_interactive(command: &str) -> Result<&'static str, ExecutorError> {
    if command.trim().is_empty() {
        return Err(ExecutorError::EmptyCommand);
    }
    let script = escape_shell_metachars(command);

    debug!(command, "running interactive command");

    let status = Command::new("sh")
        .arg("-c")
        .arg(&script)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|source| ExecutorError::Spawn {
            command: command.to_string(),
            source,
        })?;

    debug!(command, code = status.code(), "interactive command finished");
    Ok(if status.success() {
        INTERACTIVE_COMPLETED
    } else {
        INTERACTIVE_FAILED
    })
}

/// Read both pipes to completion, then reap the child.
///
/// Both pipes are drained concurrently so neither can fill up and stall the
/// child while the other is being read.
async fn collect(
    child: &mut Child,
    stdout: Option<impl AsyncRead + Unpin>,
    stderr: Option<impl AsyncRead + Unpin>,
    echo: bool,
) -> std::io::Result<(String, String, ExitStatus)> {
    let (out, err) = tokio::join!(drain(stdout, echo), drain(stderr, echo));
    let status = child.wait().await?;
    Ok((out?, err?, status))
}

/// Drain a pipe to a string, echoing each chunk to stdout as it arrives when
/// requested.
async fn drain(pipe: Option<impl AsyncRead + Unpin>, echo: bool) -> std::io::Result<String> {
    let Some(mut pipe) = pipe else {
        return Ok(String::new());
    };

    let mut collected = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let read = pipe.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        if echo {
            print!("{}", String::from_utf8_lossy(&chunk[..read]));
            let _ = std::io::stdout().flush();
        }
        collected.extend_from_slice(&chunk[..read]);
    }
    Ok(String::from_utf8_lossy(&collected).into_owned())
}

/// Backslash-escape shell metacharacters in a command string.
///
/// Quotes are escaped unconditionally, so quoted arguments are neutralized
/// along with the rest of the metacharacters.
fn escape_shell_metachars(command: &str) -> String {
    let mut escaped = String::with_capacity(command.len());
    for c in command.chars() {
        if matches!(
            c,
            '#' | '&'
                | ';'
                | '`'
                | '|'
                | '*'
                | '?'
                | '~'
                | '<'
                | '>'
                | '^'
                | '('
                | ')'
                | '['
                | ']'
                | '{'
                | '}'
                | '$'
                | '\\'
                | '\''
                | '"'
                | '\n'
                | '\r'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::console_context;
    use std::time::Instant;

    #[tokio::test]
    async fn test_captured_success_returns_stdout() {
        let out = run_captured("echo hi", &console_context(), None)
            .await
            .unwrap();

        assert_eq!(out, "hi\n");
    }

    #[tokio::test]
    async fn test_captured_failure_returns_stderr_without_error() {
        let out = run_captured("cat /definitely/not/a/real/file", &console_context(), None)
            .await
            .unwrap();

        assert!(out.contains("/definitely/not/a/real/file"));
    }

    #[tokio::test]
    async fn test_captured_forces_working_directory() {
        let ctx = ExecutionContext::new("/tmp")
            .running_in_console(true)
            .running_tests(true);
        let out = run_captured("pwd", &ctx, None).await.unwrap();

        assert_eq!(out.trim(), "/tmp");
    }

    #[tokio::test]
    async fn test_captured_rejects_empty_command() {
        let result = run_captured("   ", &console_context(), None).await;

        assert!(matches!(result, Err(ExecutorError::EmptyCommand)));
    }

    #[tokio::test]
    async fn test_captured_unknown_program_is_spawn_error() {
        let result = run_captured(
            "definitely-not-a-real-binary-xyz",
            &console_context(),
            None,
        )
        .await;

        assert!(matches!(result, Err(ExecutorError::Spawn { .. })));
    }

    #[tokio::test]
    async fn test_captured_timeout_kills_child_promptly() {
        let start = Instant::now();
        let result = run_captured(
            "sleep 60",
            &console_context(),
            Some(Duration::from_millis(100)),
        )
        .await;
        let elapsed = start.elapsed();

        match result {
            Err(ExecutorError::Timeout { timeout, .. }) => {
                assert_eq!(timeout, Duration::from_millis(100));
            }
            other => panic!("expected Timeout, got {:?}", other),
        }
        assert!(
            elapsed < Duration::from_secs(1),
            "timeout took too long: {:?}",
            elapsed
        );
    }

    #[tokio::test]
    async fn test_interactive_success_marker() {
        let marker = run_interactive("true").await.unwrap();

        assert_eq!(marker, " Interactive command completed");
    }

    #[tokio::test]
    async fn test_interactive_failure_marker() {
        let marker = run_interactive("false").await.unwrap();

        assert_eq!(marker, " Interactive command failed");
    }

    #[tokio::test]
    async fn test_interactive_rejects_empty_command() {
        let result = run_interactive("  ").await;

        assert!(matches!(result, Err(ExecutorError::EmptyCommand)));
    }

    #[test]
    fn test_escape_neutralizes_metacharacters() {
        assert_eq!(
            escape_shell_metachars("echo hi; rm -rf /"),
            "echo hi\\; rm -rf /"
        );
        assert_eq!(escape_shell_metachars("echo $(whoami)"), "echo \\$\\(whoami\\)");
        assert_eq!(escape_shell_metachars("plain words"), "plain words");
    }
}
