//! Time entry lifecycle.

mod commands;
mod service;

pub use commands::CreateEntry;
pub use service::EntryService;
