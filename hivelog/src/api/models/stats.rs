//! API response models for dashboard statistics.

use crate::db::models::analytics::{ApiaryHiveCount, HiveDistribution};
use crate::types::ApiaryId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Hive count for one apiary
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiaryHiveCountResponse {
    pub apiary_id: ApiaryId,
    pub apiary_name: Option<String>,
    pub hive_count: i64,
}

/// How hives are spread across apiaries
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HiveDistributionResponse {
    pub apiaries: Vec<ApiaryHiveCountResponse>,
    /// Hives not assigned to any apiary
    pub unassigned: i64,
}

impl From<ApiaryHiveCount> for ApiaryHiveCountResponse {
    fn from(db: ApiaryHiveCount) -> Self {
        Self {
            apiary_id: db.apiary_id,
            apiary_name: db.apiary_name,
            hive_count: db.hive_count,
        }
    }
}

impl From<HiveDistribution> for HiveDistributionResponse {
    fn from(db: HiveDistribution) -> Self {
        Self {
            apiaries: db.apiaries.into_iter().map(Into::into).collect(),
            unassigned: db.unassigned,
        }
    }
}
