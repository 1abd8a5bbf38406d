//! Database models for hives.

use crate::types::{ApiaryId, HiveId};
use sqlx::FromRow;

/// Database request for creating a new hive. The apiary has already been resolved to an id.
#[derive(Debug, Clone)]
pub struct HiveCreateDBRequest {
    pub apiary_id: Option<ApiaryId>,
    pub name: String,
    pub hive_type: String,
}

/// Database request for updating a hive. `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct HiveUpdateDBRequest {
    pub name: Option<String>,
    /// `Some(None)` unassigns the hive from its apiary
    pub apiary_id: Option<Option<ApiaryId>>,
    pub hive_type: Option<String>,
}

/// Database response for a hive
#[derive(Debug, Clone, FromRow)]
pub struct HiveDBResponse {
    pub id: HiveId,
    pub apiary_id: Option<ApiaryId>,
    pub name: String,
    pub hive_type: String,
}
