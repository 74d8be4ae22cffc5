//! Domain layer for the time-tracking service.
//!
//! This crate provides:
//! - ProjectService for the project lifecycle and project summaries
//! - EntryService for time entries, validated against their project's dates
//! - The error taxonomy shared with the transport layer
//! - Page parameter and field validation

pub mod entry;
pub mod error;
pub mod paging;
pub mod project;
pub mod validation;

pub use entry::{CreateEntry, EntryService};
pub use error::{DomainError, ErrorKind};
pub use paging::{MAX_PAGE_SIZE, PageParams};
pub use project::{CreateProject, ProjectService, ProjectSummary, UpdateProject};
pub use store::{Entry, Project};
pub use validation::FieldViolations;
