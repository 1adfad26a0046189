//! # shelltask
//!
//! A Rust library for registering named shell tasks, validating their
//! commands against injection patterns, and executing them on demand with
//! output capture and an append-only execution history.
//!
//! ## Features
//!
//! - **Command Validation**: Denylist gate rejecting shell control
//!   characters, dangerous programs, and path traversal before anything runs
//! - **Timed Execution**: Every run is bounded by a configurable timeout and
//!   forcibly terminated when it elapses
//! - **Output Capture**: Combined stdout/stderr text attached to an
//!   immutable history record per completed run
//! - **Concurrency Safety**: Bounded number of concurrent child processes
//!   and per-task serialization of history appends
//! - **Serialization**: Optional serde support for persisting tasks
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use shelltask::tasks::{
//!     config::ExecutorConfig, model::Task, runner::TaskRunner, store::InMemoryTaskStore,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(InMemoryTaskStore::new());
//!     let runner = TaskRunner::new(store, ExecutorConfig::default())?;
//!
//!     // Register a task; the command is validated before it is stored
//!     let task = runner.save(Task::new("greet", "alice", "echo hello")).await?;
//!     let id = task.id.clone().unwrap();
//!
//!     // Execute it and read the captured output from the new history entry
//!     let task = runner.execute(&id).await?;
//!     assert_eq!(task.executions[0].output, "hello");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Validation
//!
//! The validator is a denylist, not a sandbox. It rejects:
//! - Shell control characters (`&&`, `;`, `|`, backticks, `$`, redirections)
//! - A fixed set of dangerous program names (`rm`, `sudo`, `curl`, ...)
//! - Path traversal sequences (`../`)
//!
//! Commands are matched as substrings, so legitimate commands containing a
//! denylisted fragment are rejected too. Over-blocking is the accepted
//! failure mode.
//!
//! ## Optional Features
//!
//! - `serde`: Enable serialization support for tasks and errors
//! - `tracing`: Enable structured logging integration

pub mod tasks;
