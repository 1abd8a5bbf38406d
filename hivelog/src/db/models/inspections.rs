//! Database models for hive inspections and their child observation records.
//!
//! An inspection row owns at most one row in each of `queen_status`,
//! `brood_presence` and `colony_strength`. The `*Data` structs hold the
//! observation columns and are shared between inserts and reads.

use crate::types::{HiveActionId, HiveId, InspectionId};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, types::Json};

/// Database request for creating an inspection row
#[derive(Debug, Clone)]
pub struct InspectionCreateDBRequest {
    pub hive_id: HiveId,
    pub inspection_date: NaiveDate,
    pub general_behavior: Option<String>,
    pub flight_activity: Option<String>,
    pub population_growth: Option<String>,
    pub forager_activity: Option<String>,
    pub supering_needed: Option<bool>,
    pub feeding_required: Option<bool>,
    pub notes: Option<String>,
    pub next_inspection_needs: Option<String>,
    pub status: Option<String>,
    pub is_deleted: bool,
    pub completed_actions: Option<serde_json::Value>,
}

/// Database response for an inspection row
#[derive(Debug, Clone, FromRow)]
pub struct InspectionDBResponse {
    pub id: InspectionId,
    pub hive_id: HiveId,
    pub inspection_date: NaiveDate,
    pub general_behavior: Option<String>,
    pub flight_activity: Option<String>,
    pub population_growth: Option<String>,
    pub forager_activity: Option<String>,
    pub supering_needed: Option<bool>,
    pub feeding_required: Option<bool>,
    pub notes: Option<String>,
    pub next_inspection_needs: Option<String>,
    pub status: Option<String>,
    pub is_deleted: bool,
    pub completed_actions: Option<Json<serde_json::Value>>,
    pub created_at: DateTime<Utc>,
}

/// Queen observations
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct QueenStatusData {
    pub queen_seen: Option<bool>,
    pub queen_marked: Option<bool>,
    pub queen_mark_color: Option<String>,
    pub queen_clipped: Option<bool>,
    pub egg_laying: Option<String>,
    pub queen_cells: Option<String>,
}

/// Brood observations
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct BroodPresenceData {
    pub eggs_present: Option<bool>,
    pub larvae_present: Option<bool>,
    pub larvae_stage: Option<String>,
    pub sealed_brood: Option<bool>,
    pub brood_pattern: Option<String>,
    pub drone_brood: Option<i64>,
}

/// Colony strength observations
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct ColonyStrengthData {
    pub bee_coverage: Option<String>,
    pub brood_frames: Option<i64>,
    pub drone_population: Option<String>,
    pub queenright_status: Option<String>,
}

/// A stored `queen_status` row
#[derive(Debug, Clone, FromRow)]
pub struct QueenStatusDBResponse {
    pub id: i64,
    pub inspection_id: InspectionId,
    #[sqlx(flatten)]
    pub data: QueenStatusData,
}

/// A stored `brood_presence` row
#[derive(Debug, Clone, FromRow)]
pub struct BroodPresenceDBResponse {
    pub id: i64,
    pub inspection_id: InspectionId,
    #[sqlx(flatten)]
    pub data: BroodPresenceData,
}

/// A stored `colony_strength` row
#[derive(Debug, Clone, FromRow)]
pub struct ColonyStrengthDBResponse {
    pub id: i64,
    pub inspection_id: InspectionId,
    #[sqlx(flatten)]
    pub data: ColonyStrengthData,
}

/// An inspection together with whichever child rows exist for it
#[derive(Debug, Clone)]
pub struct InspectionWithDetailsDBResponse {
    pub inspection: InspectionDBResponse,
    pub queen_status: Option<QueenStatusDBResponse>,
    pub brood_presence: Option<BroodPresenceDBResponse>,
    pub colony_strength: Option<ColonyStrengthDBResponse>,
}

/// An action raised during an inspection, before blank entries are dropped
#[derive(Debug, Clone)]
pub struct InspectionActionDBRequest {
    pub text: String,
    pub checked: bool,
}

/// Everything written by one inspection submission
#[derive(Debug, Clone)]
pub struct InspectionSubmissionDBRequest {
    pub inspection: InspectionCreateDBRequest,
    pub queen_status: Option<QueenStatusData>,
    pub brood_presence: Option<BroodPresenceData>,
    pub colony_strength: Option<ColonyStrengthData>,
    /// Previously raised actions this inspection resolved
    pub completed_action_ids: Vec<HiveActionId>,
    /// New follow-up actions raised by this inspection
    pub actions: Vec<InspectionActionDBRequest>,
}
