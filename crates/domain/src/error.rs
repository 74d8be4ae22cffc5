//! Domain error types.

use chrono::NaiveDate;
use common::{EntryId, ProjectId};
use store::StoreError;
use thiserror::Error;

/// Errors that can occur during domain operations.
///
/// Every variant except [`DomainError::Store`] is caused by the request.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No project is stored under the id.
    #[error("Project with given id was not found")]
    ProjectNotFound(ProjectId),

    /// No entry with the id belongs to the project.
    #[error("Project entry was not found")]
    EntryNotFound { id: EntryId, project_id: ProjectId },

    /// A project's end date precedes its start date.
    #[error("Project cannot have end date before start date")]
    InvalidDateRange {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },

    /// An entry date falls outside its project's date range.
    #[error("Project entry date needs to be between project start and end dates")]
    DateOutOfRange {
        date: NaiveDate,
        project_id: ProjectId,
    },

    /// A mandatory pagination parameter was not supplied.
    #[error("Missing required parameter: {0}")]
    MissingParam(&'static str),

    /// The requested page size is above the maximum.
    #[error("Param 'size' value is greater than maximum")]
    SizeExceeded { size: i64, max: i64 },

    /// One or more request fields violate their constraints, in rule order.
    #[error("Request validation failed")]
    FieldValidation(Vec<String>),

    /// An error occurred in a record store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Error taxonomy shared with the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    InvalidDateRange,
    DateOutOfRange,
    MissingParam,
    SizeExceeded,
    FieldValidation,
    Unexpected,
}

impl ErrorKind {
    /// Returns the kind as a snake_case label, used for metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidDateRange => "invalid_date_range",
            ErrorKind::DateOutOfRange => "date_out_of_range",
            ErrorKind::MissingParam => "missing_param",
            ErrorKind::SizeExceeded => "size_exceeded",
            ErrorKind::FieldValidation => "field_validation",
            ErrorKind::Unexpected => "unexpected",
        }
    }

    /// Whether the failure was caused by the client request.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ErrorKind::Unexpected)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DomainError {
    /// Returns the taxonomy kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::ProjectNotFound(_) | DomainError::EntryNotFound { .. } => {
                ErrorKind::NotFound
            }
            DomainError::InvalidDateRange { .. } => ErrorKind::InvalidDateRange,
            DomainError::DateOutOfRange { .. } => ErrorKind::DateOutOfRange,
            DomainError::MissingParam(_) => ErrorKind::MissingParam,
            DomainError::SizeExceeded { .. } => ErrorKind::SizeExceeded,
            DomainError::FieldValidation(_) => ErrorKind::FieldValidation,
            DomainError::Store(_) => ErrorKind::Unexpected,
        }
    }

    /// Per-violation messages; empty for everything but field validation.
    pub fn details(&self) -> &[String] {
        match self {
            DomainError::FieldValidation(messages) => messages,
            _ => &[],
        }
    }
}

/// Logs a failed store call before it is converted into a [`DomainError`].
pub(crate) fn log_store_error(err: &StoreError) {
    tracing::error!(error = %err, "store operation failed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_taxonomy() {
        let date = NaiveDate::from_ymd_opt(2020, 8, 19).unwrap();

        assert_eq!(
            DomainError::ProjectNotFound(ProjectId::new(1)).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            DomainError::EntryNotFound {
                id: EntryId::new(1),
                project_id: ProjectId::new(2),
            }
            .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            DomainError::DateOutOfRange {
                date,
                project_id: ProjectId::new(1),
            }
            .kind(),
            ErrorKind::DateOutOfRange
        );
        assert_eq!(
            DomainError::Store(StoreError::RecordNotFound {
                table: "project",
                id: 1,
            })
            .kind(),
            ErrorKind::Unexpected
        );
    }

    #[test]
    fn only_unexpected_is_a_server_fault() {
        assert!(ErrorKind::SizeExceeded.is_client_error());
        assert!(ErrorKind::FieldValidation.is_client_error());
        assert!(!ErrorKind::Unexpected.is_client_error());
    }

    #[test]
    fn missing_param_names_the_parameter() {
        let err = DomainError::MissingParam("size");
        assert_eq!(err.to_string(), "Missing required parameter: size");
    }

    #[test]
    fn field_validation_exposes_details() {
        let err = DomainError::FieldValidation(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "Request validation failed");
        assert_eq!(err.details(), ["a".to_string(), "b".to_string()]);
        assert!(DomainError::MissingParam("page").details().is_empty());
    }
}
