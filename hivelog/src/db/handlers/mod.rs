//! Repository implementations for database access.
//!
//! Each repository wraps a borrowed [`sqlx::SqliteConnection`], which may be a pooled
//! connection or a transaction, and returns models from [`crate::db::models`].
//!
//! # Available Repositories
//!
//! - [`Apiaries`]: Apiary records; deletion unassigns hives first
//! - [`Hives`]: Hive records keyed strictly by id
//! - [`Inspections`]: Inspection submission and joined inspection reads
//! - [`HiveActions`]: Follow-up tasks, including the batch operations used by submission
//! - [`analytics`]: Aggregate queries for the dashboard
//!
//! # Common Pattern
//!
//! ```ignore
//! use hivelog::db::handlers::{Hives, Repository};
//!
//! async fn example(pool: &sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut tx = pool.begin().await?;
//!     let mut repo = Hives::new(&mut tx);
//!     let hives = repo.list(&()).await?;
//!     tx.commit().await?;
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod apiaries;
pub mod hive_actions;
pub mod hives;
pub mod inspections;
pub mod repository;

pub use apiaries::Apiaries;
pub use hive_actions::HiveActions;
pub use hives::Hives;
pub use inspections::Inspections;
pub use repository::Repository;
