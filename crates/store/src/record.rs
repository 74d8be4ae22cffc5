use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{EntryId, ProjectId};

/// A named unit of work with a start date and an optional end date.
///
/// `id` is `None` until the record has been saved; the store assigns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Option<ProjectId>,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl Project {
    /// Creates an unsaved project.
    pub fn new(name: impl Into<String>, start_date: NaiveDate, end_date: Option<NaiveDate>) -> Self {
        Self {
            id: None,
            name: name.into(),
            start_date,
            end_date,
        }
    }

    /// Returns a copy of this project carrying the given id.
    pub fn with_id(mut self, id: ProjectId) -> Self {
        self.id = Some(id);
        self
    }
}

/// A dated record of time spent against a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Option<EntryId>,
    pub date: NaiveDate,
    pub time_spent: Decimal,
    pub description: Option<String>,
    pub project_id: ProjectId,
}

impl Entry {
    /// Creates an unsaved entry for a project.
    pub fn new(
        project_id: ProjectId,
        date: NaiveDate,
        time_spent: Decimal,
        description: Option<String>,
    ) -> Self {
        Self {
            id: None,
            date,
            time_spent,
            description,
            project_id,
        }
    }

    /// Returns a copy of this entry carrying the given id.
    pub fn with_id(mut self, id: EntryId) -> Self {
        self.id = Some(id);
        self
    }
}
