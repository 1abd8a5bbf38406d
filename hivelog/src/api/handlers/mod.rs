//! HTTP request handlers for all API endpoints.
//!
//! Handlers deserialize the request, call the repositories in [`crate::db::handlers`] over a
//! pooled connection or a transaction, and serialize the result. Failures are returned as
//! [`crate::errors::Error`], which renders as `{"error": message}` with a matching status.
//!
//! # Handler Modules
//!
//! - [`apiaries`]: Apiary CRUD; deletion unassigns hives and is idempotent
//! - [`hives`]: Hive CRUD with apiary-by-name resolution
//! - [`inspections`]: Transactional inspection submission and joined reads
//! - [`hive_actions`]: Follow-up task CRUD with hive/completion filters
//! - [`stats`]: Dashboard aggregates
//! - [`fallback`]: JSON 404 and 405 responses

pub mod apiaries;
pub mod fallback;
pub mod hive_actions;
pub mod hives;
pub mod inspections;
pub mod stats;
