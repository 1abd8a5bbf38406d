//! Database models for apiaries.

use crate::types::{ApiaryId, BeekeeperId};
use sqlx::FromRow;

/// Database request for creating a new apiary
#[derive(Debug, Clone, Default)]
pub struct ApiaryCreateDBRequest {
    pub name: Option<String>,
    pub postcode: Option<String>,
}

/// Database request for updating an apiary. Both fields are replaced, so `None` clears the column.
#[derive(Debug, Clone, Default)]
pub struct ApiaryUpdateDBRequest {
    pub name: Option<String>,
    pub postcode: Option<String>,
}

/// Database response for an apiary
#[derive(Debug, Clone, FromRow)]
pub struct ApiaryDBResponse {
    pub id: ApiaryId,
    pub name: Option<String>,
    pub postcode: Option<String>,
    pub beekeeper_id: BeekeeperId,
}
