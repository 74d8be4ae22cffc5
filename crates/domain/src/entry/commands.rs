//! Entry commands.

use chrono::NaiveDate;
use common::ProjectId;
use rust_decimal::Decimal;

/// Command to record time against a project.
#[derive(Debug, Clone)]
pub struct CreateEntry {
    /// The owning project.
    pub project_id: ProjectId,
    pub date: NaiveDate,
    pub time_spent: Decimal,
    pub description: Option<String>,
}

impl CreateEntry {
    /// Creates a new CreateEntry command.
    pub fn new(
        project_id: ProjectId,
        date: NaiveDate,
        time_spent: Decimal,
        description: Option<String>,
    ) -> Self {
        Self {
            project_id,
            date,
            time_spent,
            description,
        }
    }
}
