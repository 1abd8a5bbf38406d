//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with SQLite.
//! It follows the Repository pattern to provide clean abstractions over database operations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - queries)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - database records)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   SQLite    │
//! └─────────────┘
//! ```
//!
//! # Transactions
//!
//! Repositories borrow a connection, so the same code runs against a pooled connection or an
//! open transaction. Multi-statement writes (apiary deletion, inspection submission) are given
//! a transaction by their callers:
//!
//! ```ignore
//! let mut tx = pool.begin().await?;
//! let inspection = Inspections::new(&mut tx).submit(&submission, Utc::now()).await?;
//! tx.commit().await?;
//! ```
//!
//! # Migrations
//!
//! Migrations live in the `migrations/` directory and are embedded by [`crate::migrator`].
//! Foreign keys are enforced on every connection.

pub mod errors;
pub mod handlers;
pub mod models;
