//! Project service providing the project lifecycle and summaries.

use std::sync::Arc;

use common::ProjectId;
use store::{EntryStore, Pageable, Project, ProjectStore};

use crate::entry::EntryService;
use crate::error::{DomainError, log_store_error};
use crate::paging::PageParams;

use super::{CreateProject, ProjectSummary, UpdateProject, check_date_range};

/// Service for managing projects.
///
/// Reads entries through the [`EntryService`] to build summaries.
pub struct ProjectService<P: ProjectStore, E: EntryStore> {
    projects: P,
    entry_service: Arc<EntryService<E, P>>,
}

impl<P: ProjectStore, E: EntryStore> ProjectService<P, E> {
    /// Creates a new project service.
    pub fn new(projects: P, entry_service: Arc<EntryService<E, P>>) -> Self {
        Self {
            projects,
            entry_service,
        }
    }

    /// Returns the entry service used for summaries.
    pub fn entry_service(&self) -> &Arc<EntryService<E, P>> {
        &self.entry_service
    }

    /// Creates a new project.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, cmd: CreateProject) -> Result<Project, DomainError> {
        check_date_range(cmd.start_date, cmd.end_date)?;

        let project = self
            .projects
            .save(Project::new(cmd.name, cmd.start_date, cmd.end_date))
            .await
            .inspect_err(log_store_error)?;

        metrics::counter!("projects_created_total").increment(1);
        tracing::info!(project_id = ?project.id, "project created");
        Ok(project)
    }

    /// Loads a project by id.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: ProjectId) -> Result<Project, DomainError> {
        self.projects
            .find_by_id(id)
            .await
            .inspect_err(log_store_error)?
            .ok_or_else(|| {
                tracing::warn!(project_id = %id, "project not found");
                DomainError::ProjectNotFound(id)
            })
    }

    /// Overwrites name and dates of an existing project, keeping its id.
    ///
    /// The date range is checked before the project is looked up.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, cmd: UpdateProject) -> Result<Project, DomainError> {
        check_date_range(cmd.start_date, cmd.end_date)?;

        let stored = self.get(cmd.id).await?;
        let project = self
            .projects
            .save(Project {
                name: cmd.name,
                start_date: cmd.start_date,
                end_date: cmd.end_date,
                ..stored
            })
            .await
            .inspect_err(log_store_error)?;

        metrics::counter!("projects_updated_total").increment(1);
        Ok(project)
    }

    /// Lists one page of persisted projects.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, params: PageParams) -> Result<Vec<Project>, DomainError> {
        let request = params.validate()?;

        Ok(self
            .projects
            .find_all(request.into())
            .await
            .inspect_err(log_store_error)?)
    }

    /// Deletes a project. Its entries are left in place.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: ProjectId) -> Result<(), DomainError> {
        let project = self.get(id).await?;

        self.projects
            .delete(&project)
            .await
            .inspect_err(log_store_error)?;

        metrics::counter!("projects_deleted_total").increment(1);
        Ok(())
    }

    /// Aggregates every entry of a project.
    ///
    /// Reads the full, unpaged entry list into memory.
    #[tracing::instrument(skip(self))]
    pub async fn get_summary(&self, id: ProjectId) -> Result<ProjectSummary, DomainError> {
        let exists = self
            .projects
            .exists_by_id(id)
            .await
            .inspect_err(log_store_error)?;
        if !exists {
            tracing::warn!(project_id = %id, "project not found");
            return Err(DomainError::ProjectNotFound(id));
        }

        let entries = self.entry_service.list(id, Pageable::Unpaged).await?;
        metrics::histogram!("project_summary_entries").record(entries.len() as f64);

        Ok(ProjectSummary::from_entries(&entries))
    }
}
