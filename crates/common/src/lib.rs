//! Shared types for the time-tracking service.

mod types;

pub use types::{EntryId, ProjectId};
