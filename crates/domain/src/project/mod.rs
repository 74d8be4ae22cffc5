//! Project lifecycle and summary aggregation.

mod commands;
mod service;
mod summary;

pub use commands::{CreateProject, UpdateProject};
pub use service::ProjectService;
pub use summary::ProjectSummary;

use chrono::NaiveDate;

use crate::error::DomainError;

/// Rejects an end date that precedes the start date. Open-ended projects
/// and single-day projects are valid.
pub fn check_date_range(start_date: NaiveDate, end_date: Option<NaiveDate>) -> Result<(), DomainError> {
    match end_date {
        Some(end_date) if end_date < start_date => {
            tracing::warn!(%start_date, %end_date, "project end date before start date");
            Err(DomainError::InvalidDateRange {
                start_date,
                end_date,
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 8, d).unwrap()
    }

    #[test]
    fn open_ended_range_is_valid() {
        assert!(check_date_range(date(19), None).is_ok());
    }

    #[test]
    fn same_day_range_is_valid() {
        assert!(check_date_range(date(19), Some(date(19))).is_ok());
    }

    #[test]
    fn end_before_start_is_rejected() {
        let err = check_date_range(date(19), Some(date(18))).unwrap_err();
        assert!(matches!(err, DomainError::InvalidDateRange { .. }));
    }
}
