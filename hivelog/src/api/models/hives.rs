//! API request/response models for hives.
//!
//! Hive payloads may name their apiary (`currentApiary`) instead of giving its id. Handlers
//! resolve the name before anything reaches the database layer.

use crate::db::models::hives::HiveDBResponse;
use crate::types::{ApiaryId, HiveId};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use utoipa::ToSchema;

/// Request body for creating a hive
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct HiveCreate {
    /// Defaults to an empty string
    #[schema(example = "Queen Bee")]
    pub name: Option<String>,
    /// Name of the apiary to place the hive in. No matching apiary leaves the hive unassigned.
    #[serde(rename = "currentApiary", alias = "apiaryName")]
    #[schema(example = "Home Yard")]
    pub current_apiary: Option<String>,
    /// Hive type, defaults to "Langstroth"
    #[serde(rename = "type", alias = "hive_type")]
    #[schema(example = "Warre")]
    pub hive_type: Option<String>,
}

/// Request body for updating a hive. Omitted fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct HiveUpdate {
    pub name: Option<String>,
    /// Apiary id (omitted = no change, null = unassign)
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub apiary_id: Option<Option<ApiaryId>>,
    /// Apiary name, resolved to an id. Takes precedence over `apiary_id`.
    #[serde(rename = "currentApiary", alias = "apiaryName", skip_serializing_if = "Option::is_none")]
    pub current_apiary: Option<String>,
    #[serde(alias = "type")]
    #[schema(example = "Top Bar")]
    pub hive_type: Option<String>,
}

/// A hive as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HiveResponse {
    pub id: HiveId,
    /// Null when the hive is not assigned to an apiary
    pub apiary_id: Option<ApiaryId>,
    pub name: String,
    pub hive_type: String,
}

impl From<HiveDBResponse> for HiveResponse {
    fn from(db: HiveDBResponse) -> Self {
        Self {
            id: db.id,
            apiary_id: db.apiary_id,
            name: db.name,
            hive_type: db.hive_type,
        }
    }
}
