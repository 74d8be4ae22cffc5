//! Project commands.

use chrono::NaiveDate;
use common::ProjectId;

/// Command to create a new project.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl CreateProject {
    /// Creates a new CreateProject command.
    pub fn new(name: impl Into<String>, start_date: NaiveDate, end_date: Option<NaiveDate>) -> Self {
        Self {
            name: name.into(),
            start_date,
            end_date,
        }
    }
}

/// Command to overwrite every field of an existing project.
#[derive(Debug, Clone)]
pub struct UpdateProject {
    /// The project to update.
    pub id: ProjectId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl UpdateProject {
    /// Creates a new UpdateProject command.
    pub fn new(
        id: ProjectId,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            start_date,
            end_date,
        }
    }
}
