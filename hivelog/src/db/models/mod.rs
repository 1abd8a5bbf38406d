//! Database record models matching table schemas.
//!
//! Database models are distinct from the API models in [`crate::api::models`] so storage and
//! wire representations can evolve independently. API models convert into the `*DBRequest`
//! types and from the `*DBResponse` types.

pub mod analytics;
pub mod apiaries;
pub mod hive_actions;
pub mod hives;
pub mod inspections;
