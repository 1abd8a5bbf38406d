//! Database models for hive actions.

use crate::types::{HiveActionId, HiveId, InspectionId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a hive action
#[derive(Debug, Clone)]
pub struct HiveActionCreateDBRequest {
    pub hive_id: HiveId,
    pub inspection_id: Option<InspectionId>,
    pub action_text: String,
    /// Actions created already completed get `completed_at` stamped on insert
    pub completed: bool,
}

/// Database request for updating a hive action
#[derive(Debug, Clone)]
pub struct HiveActionUpdateDBRequest {
    pub completed: bool,
}

/// Database response for a hive action
#[derive(Debug, Clone, FromRow)]
pub struct HiveActionDBResponse {
    pub id: HiveActionId,
    pub hive_id: HiveId,
    pub inspection_id: Option<InspectionId>,
    pub action_text: String,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
