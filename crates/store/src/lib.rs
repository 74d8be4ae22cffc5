pub mod error;
pub mod memory;
pub mod page;
pub mod postgres;
pub mod record;
pub mod store;

pub use common::{EntryId, ProjectId};
pub use error::{Result, StoreError};
pub use memory::{InMemoryEntryStore, InMemoryProjectStore};
pub use page::{PageRequest, Pageable};
pub use postgres::{PostgresEntryStore, PostgresProjectStore, run_migrations};
pub use record::{Entry, Project};
pub use store::{EntryStore, ProjectStore};
