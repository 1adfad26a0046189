use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::tasks::error::TaskError;
use crate::tasks::executor::ExecutionOutcome;
use crate::tasks::model::{ExecutionRecord, Task};
use crate::tasks::store::TaskStore;

/// Appends execution outcomes to a task's history and persists the task.
///
/// The read-append-save sequence is a read-modify-write on the shared task
/// document, so it is serialized per task id: concurrent recordings for the
/// same task queue up behind one mutex and none of the appends is lost.
/// Recording does not re-validate the command; that happened upstream.
#[derive(Debug)]
pub struct ExecutionRecorder<S> {
    store: Arc<S>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: TaskStore> ExecutionRecorder<S> {
    pub fn new(store: Arc<S>) -> Self {
        ExecutionRecorder {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Appends `outcome` to the history of the task with `task_id` and
    /// saves it, returning the task as seen by the store.
    ///
    /// The task is re-read from the store inside the per-id critical
    /// section; recording from a stale caller-side snapshot would reopen
    /// the lost-update window this lock exists to close.
    ///
    /// # Errors
    ///
    /// [`TaskError::NotFound`] if the task vanished since the caller looked
    /// it up, [`TaskError::Store`] on persistence failure.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, outcome)))]
    pub async fn record(
        &self,
        task_id: &str,
        outcome: ExecutionOutcome,
    ) -> Result<Task, TaskError> {
        let lock = self.lock_for(task_id).await;
        let _guard = lock.lock().await;

        let mut task = self
            .store
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| TaskError::NotFound(task_id.to_string()))?;
        task.executions.push(ExecutionRecord::from(outcome));
        let saved = self.store.save(task).await?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            task_id,
            executions = saved.executions.len(),
            "Execution recorded"
        );

        Ok(saved)
    }

    /// Drops the lock entry for a deleted task so the map does not grow
    /// with ids that no longer exist.
    pub(crate) async fn forget(&self, task_id: &str) {
        let mut locks = self.locks.lock().await;
        locks.remove(task_id);
    }

    async fn lock_for(&self, task_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(task_id.to_string()).or_default().clone()
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use super::*;
    use crate::tasks::store::InMemoryTaskStore;

    fn outcome(output: &str) -> ExecutionOutcome {
        let now = SystemTime::now();
        ExecutionOutcome {
            start_time: now,
            end_time: now,
            output: output.to_string(),
        }
    }

    #[tokio::test]
    async fn record_appends_to_tail() {
        let store = Arc::new(InMemoryTaskStore::new());
        let recorder = ExecutionRecorder::new(store.clone());
        let saved = store
            .save(Task::new("greet", "alice", "echo hello"))
            .await
            .unwrap();
        let id = saved.id.unwrap();

        let task = recorder.record(&id, outcome("one")).await.unwrap();
        assert_eq!(task.executions.len(), 1);
        let task = recorder.record(&id, outcome("two")).await.unwrap();
        assert_eq!(task.executions.len(), 2);
        assert_eq!(task.executions[1].output, "two");
    }

    #[tokio::test]
    async fn record_unknown_task_is_not_found() {
        let store = Arc::new(InMemoryTaskStore::new());
        let recorder = ExecutionRecorder::new(store);

        let result = recorder.record("missing-id", outcome("x")).await;
        match result {
            Err(TaskError::NotFound(id)) => assert_eq!(id, "missing-id"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn concurrent_records_are_not_lost() {
        let store = Arc::new(InMemoryTaskStore::new());
        let recorder = Arc::new(ExecutionRecorder::new(store.clone()));
        let saved = store
            .save(Task::new("greet", "alice", "echo hello"))
            .await
            .unwrap();
        let id = saved.id.unwrap();

        let mut handles = Vec::new();
        for i in 0..16 {
            let recorder = recorder.clone();
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                recorder.record(&id, outcome(&format!("run-{i}"))).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let task = store.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(task.executions.len(), 16);
    }
}
