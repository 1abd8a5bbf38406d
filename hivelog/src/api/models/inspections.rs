//! API request/response models for hive inspections.
//!
//! A submission is one flat inspection plus optional nested observation objects, the actions
//! raised during the inspection and the ids of earlier actions it resolved. Numeric fields
//! typed into the dashboard may arrive as strings, so ids and counts accept either form.

use crate::db::handlers::inspections::InspectionFilter;
use crate::db::models::inspections::{
    BroodPresenceDBResponse, BroodPresenceData, ColonyStrengthDBResponse, ColonyStrengthData, InspectionActionDBRequest,
    InspectionCreateDBRequest, InspectionDBResponse, InspectionSubmissionDBRequest, InspectionWithDetailsDBResponse,
    QueenStatusDBResponse, QueenStatusData,
};
use crate::types::{HiveActionId, HiveId, InspectionId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_with::{DisplayFromStr, NoneAsEmptyString, PickFirst, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for listing inspections
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListInspectionsQuery {
    /// Only inspections of this hive
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub hive_id: Option<HiveId>,
    /// Return at most this many inspections, newest first
    #[param(minimum = 1)]
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub limit: Option<i64>,
}

impl From<ListInspectionsQuery> for InspectionFilter {
    fn from(query: ListInspectionsQuery) -> Self {
        Self {
            hive_id: query.hive_id,
            limit: query.limit.map(|limit| limit.max(1)),
        }
    }
}

/// Queen observations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QueenStatus {
    pub queen_seen: Option<bool>,
    pub queen_marked: Option<bool>,
    #[schema(example = "Blue")]
    pub queen_mark_color: Option<String>,
    pub queen_clipped: Option<bool>,
    pub egg_laying: Option<String>,
    pub queen_cells: Option<String>,
}

/// Brood observations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BroodPresence {
    pub eggs_present: Option<bool>,
    pub larvae_present: Option<bool>,
    pub larvae_stage: Option<String>,
    pub sealed_brood: Option<bool>,
    pub brood_pattern: Option<String>,
    /// Count of drone brood cells; unparseable input is stored as null
    /// Zero is stored as null
    #[serde(default, deserialize_with = "lenient_nonzero_count")]
    #[schema(value_type = Option<i64>)]
    pub drone_brood: Option<i64>,
}

/// Colony strength observations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ColonyStrength {
    pub bee_coverage: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    #[schema(value_type = Option<i64>)]
    pub brood_frames: Option<i64>,
    pub drone_population: Option<String>,
    #[schema(example = "Queenright")]
    pub queenright_status: Option<String>,
}

/// A follow-up action raised during the inspection. Blank entries are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct InspectionAction {
    #[serde(default)]
    #[schema(example = "Check feeder")]
    pub text: String,
    /// Already done; the action is stored completed
    #[serde(default)]
    pub checked: bool,
}

/// Request body for submitting an inspection
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct InspectionCreate {
    /// Required; the hive must exist
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<i64>)]
    pub hive_id: Option<HiveId>,
    /// Defaults to today
    #[schema(value_type = Option<String>, format = "date", example = "2025-05-01")]
    pub inspection_date: Option<NaiveDate>,
    pub general_behavior: Option<String>,
    pub flight_activity: Option<String>,
    pub population_growth: Option<String>,
    pub forager_activity: Option<String>,
    pub supering_needed: Option<bool>,
    pub feeding_required: Option<bool>,
    pub notes: Option<String>,
    pub next_inspection_needs: Option<String>,
    pub status: Option<String>,
    pub is_deleted: Option<bool>,
    /// Free-form record of actions completed during the inspection
    pub completed_actions: Option<Value>,
    #[serde(rename = "queenStatusData")]
    pub queen_status_data: Option<QueenStatus>,
    #[serde(rename = "broodPresenceData")]
    pub brood_presence_data: Option<BroodPresence>,
    #[serde(rename = "colonyStrengthData")]
    pub colony_strength_data: Option<ColonyStrength>,
    /// New follow-up actions
    #[serde(default)]
    pub actions: Vec<InspectionAction>,
    /// Earlier actions resolved by this inspection
    #[serde(default)]
    #[serde_as(as = "Vec<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Vec<i64>)]
    pub completed_action_ids: Vec<HiveActionId>,
}

impl InspectionCreate {
    /// Build the database submission once the hive id has been checked
    pub fn into_submission(self, hive_id: HiveId, today: NaiveDate) -> InspectionSubmissionDBRequest {
        InspectionSubmissionDBRequest {
            inspection: InspectionCreateDBRequest {
                hive_id,
                inspection_date: self.inspection_date.unwrap_or(today),
                general_behavior: self.general_behavior,
                flight_activity: self.flight_activity,
                population_growth: self.population_growth,
                forager_activity: self.forager_activity,
                supering_needed: self.supering_needed,
                feeding_required: self.feeding_required,
                notes: self.notes,
                next_inspection_needs: self.next_inspection_needs,
                status: self.status,
                is_deleted: self.is_deleted.unwrap_or(false),
                completed_actions: self.completed_actions,
            },
            queen_status: self.queen_status_data.map(Into::into),
            brood_presence: self.brood_presence_data.map(Into::into),
            colony_strength: self.colony_strength_data.map(Into::into),
            completed_action_ids: self.completed_action_ids,
            actions: self
                .actions
                .into_iter()
                .map(|action| InspectionActionDBRequest {
                    text: action.text,
                    checked: action.checked,
                })
                .collect(),
        }
    }
}

/// An inspection row as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InspectionResponse {
    pub id: InspectionId,
    pub hive_id: HiveId,
    #[schema(value_type = String, format = "date")]
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
    pub completed_actions: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// A stored queen status row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QueenStatusResponse {
    pub id: i64,
    pub inspection_id: InspectionId,
    #[serde(flatten)]
    pub status: QueenStatus,
}

/// A stored brood presence row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BroodPresenceResponse {
    pub id: i64,
    pub inspection_id: InspectionId,
    #[serde(flatten)]
    pub presence: BroodPresence,
}

/// A stored colony strength row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ColonyStrengthResponse {
    pub id: i64,
    pub inspection_id: InspectionId,
    #[serde(flatten)]
    pub strength: ColonyStrength,
}

/// An inspection with its observation records embedded
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InspectionDetailsResponse {
    #[serde(flatten)]
    pub inspection: InspectionResponse,
    pub queen_status: Option<QueenStatusResponse>,
    pub brood_presence: Option<BroodPresenceResponse>,
    pub colony_strength: Option<ColonyStrengthResponse>,
}

/// Accepts a number or a string starting with an integer (`"12 frames"` reads as 12).
/// Anything else becomes null.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => leading_integer(&s),
        _ => None,
    })
}

/// As [`lenient_count`], but a count of zero is also null
fn lenient_nonzero_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_count(deserializer)?.filter(|count| *count != 0))
}

/// The optionally signed integer at the start of `s`, ignoring leading whitespace
fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits_len = s[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
    s[..sign_len + digits_len].parse().ok()
}

impl From<QueenStatus> for QueenStatusData {
    fn from(api: QueenStatus) -> Self {
        Self {
            queen_seen: api.queen_seen,
            queen_marked: api.queen_marked,
            queen_mark_color: api.queen_mark_color,
            queen_clipped: api.queen_clipped,
            egg_laying: api.egg_laying,
            queen_cells: api.queen_cells,
        }
    }
}

impl From<QueenStatusData> for QueenStatus {
    fn from(db: QueenStatusData) -> Self {
        Self {
            queen_seen: db.queen_seen,
            queen_marked: db.queen_marked,
            queen_mark_color: db.queen_mark_color,
            queen_clipped: db.queen_clipped,
            egg_laying: db.egg_laying,
            queen_cells: db.queen_cells,
        }
    }
}

impl From<BroodPresence> for BroodPresenceData {
    fn from(api: BroodPresence) -> Self {
        Self {
            eggs_present: api.eggs_present,
            larvae_present: api.larvae_present,
            larvae_stage: api.larvae_stage,
            sealed_brood: api.sealed_brood,
            brood_pattern: api.brood_pattern,
            drone_brood: api.drone_brood,
        }
    }
}

impl From<BroodPresenceData> for BroodPresence {
    fn from(db: BroodPresenceData) -> Self {
        Self {
            eggs_present: db.eggs_present,
            larvae_present: db.larvae_present,
            larvae_stage: db.larvae_stage,
            sealed_brood: db.sealed_brood,
            brood_pattern: db.brood_pattern,
            drone_brood: db.drone_brood,
        }
    }
}

impl From<ColonyStrength> for ColonyStrengthData {
    fn from(api: ColonyStrength) -> Self {
        Self {
            bee_coverage: api.bee_coverage,
            brood_frames: api.brood_frames,
            drone_population: api.drone_population,
            queenright_status: api.queenright_status,
        }
    }
}

impl From<ColonyStrengthData> for ColonyStrength {
    fn from(db: ColonyStrengthData) -> Self {
        Self {
            bee_coverage: db.bee_coverage,
            brood_frames: db.brood_frames,
            drone_population: db.drone_population,
            queenright_status: db.queenright_status,
        }
    }
}

impl From<InspectionDBResponse> for InspectionResponse {
    fn from(db: InspectionDBResponse) -> Self {
        Self {
            id: db.id,
            hive_id: db.hive_id,
            inspection_date: db.inspection_date,
            general_behavior: db.general_behavior,
            flight_activity: db.flight_activity,
            population_growth: db.population_growth,
            forager_activity: db.forager_activity,
            supering_needed: db.supering_needed,
            feeding_required: db.feeding_required,
            notes: db.notes,
            next_inspection_needs: db.next_inspection_needs,
            status: db.status,
            is_deleted: db.is_deleted,
            completed_actions: db.completed_actions.map(|json| json.0),
            created_at: db.created_at,
        }
    }
}

impl From<InspectionWithDetailsDBResponse> for InspectionDetailsResponse {
    fn from(db: InspectionWithDetailsDBResponse) -> Self {
        Self {
            inspection: db.inspection.into(),
            queen_status: db.queen_status.map(|row: QueenStatusDBResponse| QueenStatusResponse {
                id: row.id,
                inspection_id: row.inspection_id,
                status: row.data.into(),
            }),
            brood_presence: db.brood_presence.map(|row: BroodPresenceDBResponse| BroodPresenceResponse {
                id: row.id,
                inspection_id: row.inspection_id,
                presence: row.data.into(),
            }),
            colony_strength: db.colony_strength.map(|row: ColonyStrengthDBResponse| ColonyStrengthResponse {
                id: row.id,
                inspection_id: row.inspection_id,
                strength: row.data.into(),
            }),
        }
    }
}
