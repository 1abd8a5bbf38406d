//! API request/response models for apiaries.

use super::non_empty;
use crate::db::models::apiaries::{ApiaryCreateDBRequest, ApiaryDBResponse, ApiaryUpdateDBRequest};
use crate::types::ApiaryId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for creating an apiary. Missing or empty fields are stored as null.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ApiaryCreate {
    /// Display name, not required to be unique
    #[schema(example = "Home Yard")]
    pub name: Option<String>,
    #[schema(example = "AB1 2CD")]
    pub postcode: Option<String>,
}

/// Request body for updating an apiary. Both fields are replaced; omitting one clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ApiaryUpdate {
    #[schema(example = "Back Garden")]
    pub name: Option<String>,
    pub postcode: Option<String>,
}

/// An apiary as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiaryResponse {
    pub id: ApiaryId,
    pub name: Option<String>,
    pub postcode: Option<String>,
}

impl From<ApiaryCreate> for ApiaryCreateDBRequest {
    fn from(create: ApiaryCreate) -> Self {
        Self {
            name: non_empty(create.name),
            postcode: non_empty(create.postcode),
        }
    }
}

impl From<ApiaryUpdate> for ApiaryUpdateDBRequest {
    fn from(update: ApiaryUpdate) -> Self {
        Self {
            name: non_empty(update.name),
            postcode: non_empty(update.postcode),
        }
    }
}

impl From<ApiaryDBResponse> for ApiaryResponse {
    fn from(db: ApiaryDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            postcode: db.postcode,
        }
    }
}
