//! API request and response data models.
//!
//! These structures define the public JSON contract. They are distinct from the database
//! models in [`crate::db::models`] and convert to and from them with `From` impls. Every model
//! derives `utoipa::ToSchema` for the generated OpenAPI document.
//!
//! - [`apiaries`]: Apiary create/update payloads and responses
//! - [`hives`]: Hive payloads, including apiary-by-name placement
//! - [`inspections`]: The inspection submission payload and joined inspection responses
//! - [`hive_actions`]: Hive action payloads and list filters
//! - [`stats`]: Dashboard aggregates

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod apiaries;
pub mod hive_actions;
pub mod hives;
pub mod inspections;
pub mod stats;

/// Confirmation body returned by delete endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Hive deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Treat an empty string the same as a missing value
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
