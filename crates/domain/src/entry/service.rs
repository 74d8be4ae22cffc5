//! Entry service enforcing that entries stay inside their project's dates.

use chrono::NaiveDate;
use common::{EntryId, ProjectId};
use store::{Entry, EntryStore, Pageable, Project, ProjectStore};

use crate::error::{DomainError, log_store_error};
use crate::paging::PageParams;

use super::CreateEntry;

/// Service for managing time entries.
///
/// Holds a read handle to the project store to validate entry dates against
/// the owning project.
pub struct EntryService<E: EntryStore, P: ProjectStore> {
    entries: E,
    projects: P,
}

impl<E: EntryStore, P: ProjectStore> EntryService<E, P> {
    /// Creates a new entry service.
    pub fn new(entries: E, projects: P) -> Self {
        Self { entries, projects }
    }

    /// Records time against an existing project, on a date inside the
    /// project's range.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, cmd: CreateEntry) -> Result<Entry, DomainError> {
        let project = self
            .projects
            .find_by_id(cmd.project_id)
            .await
            .inspect_err(log_store_error)?
            .ok_or_else(|| {
                tracing::warn!(project_id = %cmd.project_id, "project not found");
                DomainError::ProjectNotFound(cmd.project_id)
            })?;

        check_entry_date(&project, cmd.project_id, cmd.date)?;

        let entry = self
            .entries
            .save(Entry::new(
                cmd.project_id,
                cmd.date,
                cmd.time_spent,
                cmd.description,
            ))
            .await
            .inspect_err(log_store_error)?;

        metrics::counter!("entries_created_total").increment(1);
        tracing::info!(entry_id = ?entry.id, project_id = %entry.project_id, "entry created");
        Ok(entry)
    }

    /// Lists one page of a project's entries.
    ///
    /// Does not check that the project exists: an unknown project yields
    /// an empty page.
    #[tracing::instrument(skip(self))]
    pub async fn search(
        &self,
        project_id: ProjectId,
        params: PageParams,
    ) -> Result<Vec<Entry>, DomainError> {
        let request = params.validate()?;
        self.list(project_id, request.into()).await
    }

    /// Lists a project's entries with the given paging, including
    /// [`Pageable::Unpaged`] for every entry.
    pub async fn list(
        &self,
        project_id: ProjectId,
        pageable: Pageable,
    ) -> Result<Vec<Entry>, DomainError> {
        Ok(self
            .entries
            .find_by_project_id(project_id, pageable)
            .await
            .inspect_err(log_store_error)?)
    }

    /// Deletes an entry through its owning project.
    ///
    /// An entry id that belongs to a different project is reported as not
    /// found.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: EntryId, project_id: ProjectId) -> Result<(), DomainError> {
        let entry = self
            .entries
            .find_by_id_and_project_id(id, project_id)
            .await
            .inspect_err(log_store_error)?
            .ok_or_else(|| {
                tracing::warn!(entry_id = %id, %project_id, "project entry not found");
                DomainError::EntryNotFound { id, project_id }
            })?;

        self.entries
            .delete(&entry)
            .await
            .inspect_err(log_store_error)?;

        metrics::counter!("entries_deleted_total").increment(1);
        Ok(())
    }
}

/// Fails when `date` is before the project start or after its end.
/// Both boundary dates are accepted.
fn check_entry_date(
    project: &Project,
    project_id: ProjectId,
    date: NaiveDate,
) -> Result<(), DomainError> {
    let before_start = project.start_date > date;
    let after_end = project.end_date.is_some_and(|end| end < date);

    if before_start || after_end {
        tracing::warn!(
            %date,
            %project_id,
            start_date = %project.start_date,
            end_date = ?project.end_date,
            "entry date outside project date range"
        );
        return Err(DomainError::DateOutOfRange { date, project_id });
    }
    Ok(())
}
