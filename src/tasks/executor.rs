use std::process::Stdio;
use std::time::{Duration, SystemTime};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;

use crate::tasks::config::ExecutorConfig;
use crate::tasks::error::ExecutionError;
use crate::tasks::shell::ShellAdapter;
use crate::tasks::state::ExecutionState;

/// Substituted when a completed command produced no output on either stream.
pub const EMPTY_OUTPUT_PLACEHOLDER: &str = "[INFO] Command completed successfully with no output.";

/// Separator between the stdout and stderr portions of combined output.
pub const STDERR_MARKER: &str = "\n[STDERR]\n";

/// Result of one completed execution: timestamps taken immediately before
/// spawn and immediately after stream draining, plus the combined output.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionOutcome {
    pub start_time: SystemTime,
    pub end_time: SystemTime,
    pub output: String,
}

/// Runs a single shell command with a hard timeout and captures its output.
///
/// This is the one place untrusted input reaches an OS shell; callers are
/// expected to have passed the command through
/// [`CommandValidator`](crate::tasks::validator::CommandValidator) first.
/// The exit code is deliberately not part of the outcome: a process that
/// exits non-zero within the bound still completes, with whatever it wrote
/// captured.
#[derive(Debug, Clone)]
pub struct TaskExecutor {
    shell: ShellAdapter,
    timeout: Duration,
}

impl TaskExecutor {
    pub fn new(config: &ExecutorConfig) -> Self {
        TaskExecutor {
            shell: config.shell,
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    /// Executes `command` through the configured shell.
    ///
    /// The invocation moves through
    /// `Idle -> Spawning -> Running -> {Completed | TimedOut | Failed}`.
    /// On timeout the process is killed with no grace period and no outcome
    /// is produced. On normal exit both streams are drained to completion
    /// before `end_time` is taken.
    ///
    /// # Errors
    ///
    /// - [`ExecutionError::SpawnFailure`] if the child could not be spawned
    /// - [`ExecutionError::Timeout`] if the bound elapsed first
    /// - [`ExecutionError::RuntimeFailure`] for any other wait/read failure
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub async fn execute(&self, command: &str) -> Result<ExecutionOutcome, ExecutionError> {
        let mut state = ExecutionState::Idle;
        advance(&mut state, ExecutionState::Spawning);

        let (program, args) = self.shell.build_invocation(command);
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Kill the whole process group on termination, not just the shell
        #[cfg(unix)]
        cmd.process_group(0);

        let start_time = SystemTime::now();
        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::error!(error = %e, "Failed to spawn shell process");

                advance(&mut state, ExecutionState::Failed);
                return Err(ExecutionError::SpawnFailure(e.to_string()));
            }
        };
        advance(&mut state, ExecutionState::Running);

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| runtime_failure("io", "child stdout was not piped"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| runtime_failure("io", "child stderr was not piped"))?;
        let stdout_drain = spawn_drain(stdout);
        let stderr_drain = spawn_drain(stderr);

        let wait = tokio::time::timeout(self.timeout, child.wait()).await;
        match wait {
            Err(_elapsed) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(timeout = ?self.timeout, "Execution timed out, killing process");

                advance(&mut state, ExecutionState::TimedOut);
                let _ = child.start_kill();
                let _ = child.wait().await;
                stdout_drain.abort();
                stderr_drain.abort();
                Err(ExecutionError::Timeout {
                    timeout: self.timeout,
                })
            }
            Ok(Err(e)) => {
                advance(&mut state, ExecutionState::Failed);
                stdout_drain.abort();
                stderr_drain.abort();
                Err(runtime_failure("io", &e.to_string()))
            }
            Ok(Ok(_status)) => {
                // Process exited within the bound; streams are closed, so
                // the drains run to completion here
                let stdout = join_drain(stdout_drain).await?;
                let stderr = join_drain(stderr_drain).await?;
                let end_time = SystemTime::now();
                advance(&mut state, ExecutionState::Completed);

                Ok(ExecutionOutcome {
                    start_time,
                    end_time,
                    output: combine_output(&stdout, &stderr),
                })
            }
        }
    }
}

fn advance(state: &mut ExecutionState, next: ExecutionState) {
    debug_assert!(
        state.can_transition_to(next),
        "illegal execution state transition: {:?} -> {:?}",
        state,
        next
    );

    #[cfg(feature = "tracing")]
    tracing::debug!(from = ?state, to = ?next, "execution state transition");

    *state = next;
}

fn spawn_drain<R>(mut reader: R) -> JoinHandle<std::io::Result<Vec<u8>>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;
        Ok(buf)
    })
}

async fn join_drain(handle: JoinHandle<std::io::Result<Vec<u8>>>) -> Result<String, ExecutionError> {
    match handle.await {
        Ok(Ok(bytes)) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Ok(Err(e)) => Err(runtime_failure("io", &e.to_string())),
        Err(e) => Err(runtime_failure("join", &e.to_string())),
    }
}

fn runtime_failure(kind: &str, message: &str) -> ExecutionError {
    ExecutionError::RuntimeFailure {
        kind: kind.to_string(),
        message: message.to_string(),
    }
}

/// Combines the drained streams into the recorded output text: trimmed
/// stdout, then a `[STDERR]` section when stderr is non-empty, the whole
/// thing trimmed, with a fixed placeholder when nothing was written.
fn combine_output(stdout: &str, stderr: &str) -> String {
    let mut combined = stdout.trim().to_string();
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        combined.push_str(STDERR_MARKER);
        combined.push_str(stderr);
    }

    let combined = combined.trim();
    if combined.is_empty() {
        EMPTY_OUTPUT_PLACEHOLDER.to_string()
    } else {
        combined.to_string()
    }
}
