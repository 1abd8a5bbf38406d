//! API request/response models for hive actions.

use crate::db::handlers::hive_actions::HiveActionFilter;
use crate::db::models::hive_actions::{HiveActionCreateDBRequest, HiveActionDBResponse};
use crate::types::{HiveActionId, HiveId, InspectionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for listing hive actions. An empty value (`?hive_id=`) means "not supplied".
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListHiveActionsQuery {
    /// Only actions for this hive
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub hive_id: Option<HiveId>,
    /// Only completed (`true`) or outstanding (`false`) actions
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub completed: Option<bool>,
}

impl From<ListHiveActionsQuery> for HiveActionFilter {
    fn from(query: ListHiveActionsQuery) -> Self {
        Self {
            hive_id: query.hive_id,
            completed: query.completed,
        }
    }
}

/// Request body for creating a hive action. New actions always start outstanding.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HiveActionCreate {
    pub hive_id: HiveId,
    #[schema(example = "Add a super")]
    pub action_text: String,
    /// Inspection that raised the action, if any
    pub inspection_id: Option<InspectionId>,
}

impl From<HiveActionCreate> for HiveActionCreateDBRequest {
    fn from(create: HiveActionCreate) -> Self {
        Self {
            hive_id: create.hive_id,
            inspection_id: create.inspection_id,
            action_text: create.action_text,
            completed: false,
        }
    }
}

/// Request body for updating a hive action
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HiveActionUpdate {
    /// Completing stamps `completed_at`; reopening clears it
    pub completed: bool,
}

/// A hive action as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HiveActionResponse {
    pub id: HiveActionId,
    pub hive_id: HiveId,
    pub inspection_id: Option<InspectionId>,
    pub action_text: String,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<HiveActionDBResponse> for HiveActionResponse {
    fn from(db: HiveActionDBResponse) -> Self {
        Self {
            id: db.id,
            hive_id: db.hive_id,
            inspection_id: db.inspection_id,
            action_text: db.action_text,
            completed: db.completed,
            completed_at: db.completed_at,
            created_at: db.created_at,
        }
    }
}
