//! HTTP route handlers.

pub mod entries;
pub mod health;
pub mod metrics;
pub mod projects;
