use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::tasks::error::StoreError;
use crate::tasks::model::Task;
use crate::tasks::store::TaskStore;

/// In-memory [`TaskStore`] backed by a `HashMap` behind an async lock.
///
/// Ids are uuid v4 strings assigned on first save.
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    tasks: RwLock<HashMap<String, Task>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskStore for InMemoryTaskStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Task>, StoreError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Task>, StoreError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.values().cloned().collect())
    }

    async fn find_by_name_containing(&self, name: &str) -> Result<Vec<Task>, StoreError> {
        let needle = name.to_lowercase();
        let tasks = self.tasks.read().await;
        Ok(tasks
            .values()
            .filter(|task| task.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.contains_key(id))
    }

    async fn save(&self, mut task: Task) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.write().await;
        let id = match &task.id {
            Some(id) => id.clone(),
            None => {
                let id = Uuid::new_v4().to_string();
                task.id = Some(id.clone());
                id
            }
        };
        tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let mut tasks = self.tasks.write().await;
        tasks.remove(id);
        Ok(())
    }
}
