//! Database models for aggregate queries.

use crate::types::ApiaryId;
use sqlx::FromRow;

/// Number of hives assigned to one apiary
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ApiaryHiveCount {
    pub apiary_id: ApiaryId,
    pub apiary_name: Option<String>,
    pub hive_count: i64,
}

/// Hive counts across every apiary, plus the hives not assigned to any
#[derive(Debug, Clone, PartialEq)]
pub struct HiveDistribution {
    pub apiaries: Vec<ApiaryHiveCount>,
    pub unassigned: i64,
}
