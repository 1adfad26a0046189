use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::tasks::config::ExecutorConfig;
use crate::tasks::error::{ExecutionError, TaskError};
use crate::tasks::executor::TaskExecutor;
use crate::tasks::model::Task;
use crate::tasks::recorder::ExecutionRecorder;
use crate::tasks::store::TaskStore;
use crate::tasks::validator::CommandValidator;

/// Task management and execution over a [`TaskStore`].
///
/// Owns the full pipeline: the validator gate on save and execute, the
/// executor, and the recorder. A semaphore bounds how many child processes
/// run at once so a burst of execute calls cannot exhaust OS process or
/// file-descriptor limits; excess callers wait for a slot.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use shelltask::tasks::{
///     config::ExecutorConfig, model::Task, runner::TaskRunner, store::InMemoryTaskStore,
/// };
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let runner = TaskRunner::new(
///         Arc::new(InMemoryTaskStore::new()),
///         ExecutorConfig::default().timeout_ms(10_000),
///     )?;
///
///     let task = runner.save(Task::new("greet", "alice", "echo hello")).await?;
///     let task = runner.execute(task.id.as_deref().unwrap()).await?;
///     assert_eq!(task.executions.len(), 1);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct TaskRunner<S> {
    store: Arc<S>,
    executor: TaskExecutor,
    recorder: ExecutionRecorder<S>,
    execution_permits: Arc<Semaphore>,
}

impl<S: TaskStore> TaskRunner<S> {
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidConfiguration`] when the config fails
    /// validation.
    pub fn new(store: Arc<S>, config: ExecutorConfig) -> Result<Self, TaskError> {
        config.validate()?;
        Ok(TaskRunner {
            executor: TaskExecutor::new(&config),
            recorder: ExecutionRecorder::new(store.clone()),
            execution_permits: Arc::new(Semaphore::new(config.max_concurrent)),
            store,
        })
    }

    /// # Errors
    ///
    /// [`TaskError::Store`] on persistence failure.
    pub async fn find_all(&self) -> Result<Vec<Task>, TaskError> {
        Ok(self.store.find_all().await?)
    }

    /// # Errors
    ///
    /// [`TaskError::NotFound`] when no task has this id.
    pub async fn find_by_id(&self, id: &str) -> Result<Task, TaskError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }

    /// Tasks whose name contains `name`, case-insensitively.
    ///
    /// # Errors
    ///
    /// [`TaskError::NotFound`] when nothing matches.
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Task>, TaskError> {
        let tasks = self.store.find_by_name_containing(name).await?;
        if tasks.is_empty() {
            return Err(TaskError::NotFound(format!(
                "no tasks matching name: {name}"
            )));
        }
        Ok(tasks)
    }

    /// Creates or updates a task. The command must pass the validator gate
    /// before anything is persisted.
    ///
    /// # Errors
    ///
    /// [`TaskError::Validation`] when the command is rejected,
    /// [`TaskError::Store`] on persistence failure.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, task), fields(task_name = %task.name)))]
    pub async fn save(&self, task: Task) -> Result<Task, TaskError> {
        CommandValidator::validate(&task.command)?;
        Ok(self.store.save(task).await?)
    }

    /// # Errors
    ///
    /// [`TaskError::NotFound`] when no task has this id.
    pub async fn delete(&self, id: &str) -> Result<(), TaskError> {
        if !self.store.exists_by_id(id).await? {
            return Err(TaskError::NotFound(id.to_string()));
        }
        self.store.delete_by_id(id).await?;
        self.recorder.forget(id).await;
        Ok(())
    }

    /// Executes the task's command and appends the outcome to its history,
    /// returning the updated task.
    ///
    /// The stored command is validated again before it runs, as a defense
    /// against a command having been corrupted or mutated directly in
    /// storage since it was saved. A failed execution appends nothing and
    /// leaves the task exactly as it was.
    ///
    /// # Errors
    ///
    /// [`TaskError::NotFound`] for an unknown id, [`TaskError::Validation`]
    /// when the stored command no longer passes the gate,
    /// [`TaskError::Execution`] when the run fails or times out, and
    /// [`TaskError::Store`] on persistence failure.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub async fn execute(&self, id: &str) -> Result<Task, TaskError> {
        let task = self.find_by_id(id).await?;
        CommandValidator::validate(&task.command)?;

        // acquire only fails if the semaphore is closed, which never happens
        let _permit = self
            .execution_permits
            .acquire()
            .await
            .map_err(|e| ExecutionError::RuntimeFailure {
                kind: "semaphore".to_string(),
                message: e.to_string(),
            })?;

        let outcome = match self.executor.execute(&task.command).await {
            Ok(outcome) => outcome,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::error!(task_id = id, error = %e, "Execution failed, no record appended");

                return Err(e.into());
            }
        };

        self.recorder.record(id, outcome).await
    }
}
