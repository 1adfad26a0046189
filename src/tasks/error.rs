use std::time::Duration;

use thiserror::Error;

/// Reasons a command is rejected by the
/// [`CommandValidator`](crate::tasks::validator::CommandValidator).
///
/// Validation happens before any process is spawned, so none of these
/// variants ever produce a history record. A routing layer should map them
/// to a client-input rejection (HTTP 400).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("command cannot be empty")]
    EmptyCommand,

    #[error("command contains shell control characters: '{0}'")]
    ControlCharacterDetected(String),

    #[error("command contains a denylisted program: '{0}'")]
    DenylistedCommand(String),

    #[error("command contains a path traversal sequence")]
    PathTraversalDetected,
}

/// Failures raised during or after process spawn.
///
/// None of these append a history record; a failed run leaves the task
/// exactly as it was before the attempt.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The process ran past the configured bound and was forcibly killed.
    #[error("command execution timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// The child process could not be spawned at all.
    #[error("failed to spawn shell process: {0}")]
    SpawnFailure(String),

    /// Any other failure while waiting on the process or draining its
    /// output streams.
    #[error("{kind} failure during execution: {message}")]
    RuntimeFailure { kind: String, message: String },
}

/// Failure propagated unchanged from the persistence collaborator.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("store backend error: {0}")]
pub struct StoreError(pub String);

/// Top-level error for task operations.
///
/// A routing layer maps these onto responses: `Validation` and
/// `InvalidConfiguration` are client errors (400), `NotFound` is 404, and
/// `Execution`/`Store` are internal failures (500).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("task not found with id: {0}")]
    NotFound(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
