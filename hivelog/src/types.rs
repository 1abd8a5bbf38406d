//! Common type definitions.
//!
//! All entity IDs are SQLite `INTEGER PRIMARY KEY` values, wrapped in type
//! aliases so signatures say which table an id belongs to:
//!
//! - [`ApiaryId`]: Apiary identifier
//! - [`HiveId`]: Hive identifier
//! - [`InspectionId`]: Hive inspection identifier
//! - [`HiveActionId`]: Hive action identifier
//! - [`BeekeeperId`]: Owner of an apiary

// Type aliases for IDs
pub type ApiaryId = i64;
pub type HiveId = i64;
pub type InspectionId = i64;
pub type HiveActionId = i64;
pub type BeekeeperId = i64;

/// Owner recorded on every apiary until beekeeper accounts exist.
pub const DEFAULT_BEEKEEPER_ID: BeekeeperId = 1;

/// Hive type assigned when a hive is created without one.
pub const DEFAULT_HIVE_TYPE: &str = "Langstroth";
