use async_trait::async_trait;

use crate::{Entry, EntryId, Pageable, Project, ProjectId, Result};

/// Durable storage for projects.
///
/// Every method is a single atomic operation. Implementations must be
/// thread-safe (Send + Sync).
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Inserts the project when it has no id, otherwise overwrites the
    /// stored record with the same id.
    ///
    /// Returns the stored project, including its assigned id. Updating an
    /// id that is not stored fails with `RecordNotFound`.
    async fn save(&self, project: Project) -> Result<Project>;

    /// Looks a project up by id.
    async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>>;

    /// Checks whether a project with the given id is stored.
    async fn exists_by_id(&self, id: ProjectId) -> Result<bool>;

    /// Removes the project. Removing an unsaved or already removed project
    /// is a no-op.
    async fn delete(&self, project: &Project) -> Result<()>;

    /// Lists persisted projects ordered by id.
    async fn find_all(&self, pageable: Pageable) -> Result<Vec<Project>>;
}

/// Durable storage for time entries.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Inserts the entry when it has no id, otherwise overwrites the stored
    /// record with the same id.
    async fn save(&self, entry: Entry) -> Result<Entry>;

    /// Looks an entry up by id.
    async fn find_by_id(&self, id: EntryId) -> Result<Option<Entry>>;

    /// Looks an entry up by id, only matching when it belongs to the
    /// given project.
    async fn find_by_id_and_project_id(
        &self,
        id: EntryId,
        project_id: ProjectId,
    ) -> Result<Option<Entry>>;

    /// Checks whether an entry with the given id is stored.
    async fn exists_by_id(&self, id: EntryId) -> Result<bool>;

    /// Removes the entry.
    async fn delete(&self, entry: &Entry) -> Result<()>;

    /// Lists the entries of a project ordered by id.
    async fn find_by_project_id(
        &self,
        project_id: ProjectId,
        pageable: Pageable,
    ) -> Result<Vec<Entry>>;
}
