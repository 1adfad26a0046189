use std::future::Future;

use crate::tasks::error::StoreError;
use crate::tasks::model::Task;

mod memory;

pub use memory::InMemoryTaskStore;

/// Persistence collaborator for [`Task`] documents.
///
/// Methods are declared as `impl Future + Send` so generic consumers can
/// hand the resulting futures to the runtime. Implementations back this
/// with whatever storage they like; [`InMemoryTaskStore`] is the reference
/// implementation and test double.
pub trait TaskStore: Send + Sync {
    fn find_by_id(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Task>, StoreError>> + Send;

    fn find_all(&self) -> impl Future<Output = Result<Vec<Task>, StoreError>> + Send;

    /// Tasks whose name contains `name` as a case-insensitive substring.
    fn find_by_name_containing(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<Task>, StoreError>> + Send;

    fn exists_by_id(&self, id: &str) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Insert-or-update. Assigns a fresh id on first insert; the returned
    /// task always carries its id.
    fn save(&self, task: Task) -> impl Future<Output = Result<Task, StoreError>> + Send;

    fn delete_by_id(&self, id: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}
