//! Database repository for hive inspections.
//!
//! Inspections are written once and never updated, so this repository does not implement
//! [`Repository`](super::Repository). Reads always return the inspection joined with its
//! queen status, brood presence and colony strength rows, and skip soft-deleted inspections.

use std::collections::HashMap;

use crate::db::{
    errors::{DbError, Result},
    handlers::hive_actions::HiveActions,
    models::{
        hive_actions::HiveActionCreateDBRequest,
        inspections::{
            BroodPresenceDBResponse, BroodPresenceData, ColonyStrengthDBResponse, ColonyStrengthData, InspectionCreateDBRequest,
            InspectionDBResponse, InspectionSubmissionDBRequest, InspectionWithDetailsDBResponse, QueenStatusDBResponse, QueenStatusData,
        },
    },
};
use crate::types::{HiveId, InspectionId};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection, sqlite::SqliteRow, types::Json};
use tracing::instrument;

const INSPECTION_COLUMNS: &str = "id, hive_id, inspection_date, general_behavior, flight_activity, population_growth, \
     forager_activity, supering_needed, feeding_required, notes, next_inspection_needs, status, is_deleted, \
     completed_actions, created_at";

/// Filter for listing inspections
#[derive(Debug, Clone, Default)]
pub struct InspectionFilter {
    pub hive_id: Option<HiveId>,
    /// Maximum number of inspections to return, newest first
    pub limit: Option<i64>,
}

pub struct Inspections<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Inspections<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    /// Insert the parent inspection row.
    #[instrument(skip(self, request), fields(hive_id = request.hive_id), err)]
    pub async fn create(&mut self, request: &InspectionCreateDBRequest, now: DateTime<Utc>) -> Result<InspectionDBResponse> {
        let inspection = sqlx::query_as::<_, InspectionDBResponse>(&format!(
            r#"
            INSERT INTO hive_inspections (
                hive_id, inspection_date, general_behavior, flight_activity, population_growth,
                forager_activity, supering_needed, feeding_required, notes, next_inspection_needs,
                status, is_deleted, completed_actions, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {INSPECTION_COLUMNS}
            "#
        ))
        .bind(request.hive_id)
        .bind(request.inspection_date)
        .bind(&request.general_behavior)
        .bind(&request.flight_activity)
        .bind(&request.population_growth)
        .bind(&request.forager_activity)
        .bind(request.supering_needed)
        .bind(request.feeding_required)
        .bind(&request.notes)
        .bind(&request.next_inspection_needs)
        .bind(&request.status)
        .bind(request.is_deleted)
        .bind(request.completed_actions.clone().map(Json))
        .bind(now)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or_else(|| DbError::Other(anyhow::anyhow!("Inspection insert returned no row")))?;

        Ok(inspection)
    }

    #[instrument(skip(self, data), err)]
    pub async fn create_queen_status(&mut self, inspection_id: InspectionId, data: &QueenStatusData) -> Result<QueenStatusDBResponse> {
        let row = sqlx::query_as::<_, QueenStatusDBResponse>(
            r#"
            INSERT INTO queen_status (inspection_id, queen_seen, queen_marked, queen_mark_color, queen_clipped, egg_laying, queen_cells)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(inspection_id)
        .bind(data.queen_seen)
        .bind(data.queen_marked)
        .bind(&data.queen_mark_color)
        .bind(data.queen_clipped)
        .bind(&data.egg_laying)
        .bind(&data.queen_cells)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(row)
    }

    #[instrument(skip(self, data), err)]
    pub async fn create_brood_presence(&mut self, inspection_id: InspectionId, data: &BroodPresenceData) -> Result<BroodPresenceDBResponse> {
        let row = sqlx::query_as::<_, BroodPresenceDBResponse>(
            r#"
            INSERT INTO brood_presence (inspection_id, eggs_present, larvae_present, larvae_stage, sealed_brood, brood_pattern, drone_brood)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(inspection_id)
        .bind(data.eggs_present)
        .bind(data.larvae_present)
        .bind(&data.larvae_stage)
        .bind(data.sealed_brood)
        .bind(&data.brood_pattern)
        .bind(data.drone_brood)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(row)
    }

    #[instrument(skip(self, data), err)]
    pub async fn create_colony_strength(&mut self, inspection_id: InspectionId, data: &ColonyStrengthData) -> Result<ColonyStrengthDBResponse> {
        let row = sqlx::query_as::<_, ColonyStrengthDBResponse>(
            r#"
            INSERT INTO colony_strength (inspection_id, bee_coverage, brood_frames, drone_population, queenright_status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(inspection_id)
        .bind(&data.bee_coverage)
        .bind(data.brood_frames)
        .bind(&data.drone_population)
        .bind(&data.queenright_status)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(row)
    }

    /// Write a whole inspection submission: the inspection, its child observations, completion
    /// of resolved actions and insertion of newly raised ones.
    ///
    /// Statements run in order on the wrapped connection and stop at the first error. Pass a
    /// transaction and drop it on error to discard the partial submission.
    #[instrument(skip(self, submission), fields(hive_id = submission.inspection.hive_id), err)]
    pub async fn submit(&mut self, submission: &InspectionSubmissionDBRequest, now: DateTime<Utc>) -> Result<InspectionDBResponse> {
        let inspection = self.create(&submission.inspection, now).await?;

        if let Some(colony_strength) = &submission.colony_strength {
            self.create_colony_strength(inspection.id, colony_strength).await?;
        }
        if let Some(brood_presence) = &submission.brood_presence {
            self.create_brood_presence(inspection.id, brood_presence).await?;
        }
        if let Some(queen_status) = &submission.queen_status {
            self.create_queen_status(inspection.id, queen_status).await?;
        }

        let mut actions = HiveActions::new(&mut *self.db);
        if !submission.completed_action_ids.is_empty() {
            let completed = actions.complete_many(&submission.completed_action_ids, now).await?;
            tracing::debug!(completed, "Completed hive actions resolved by inspection");
        }

        let new_actions: Vec<HiveActionCreateDBRequest> = submission
            .actions
            .iter()
            .filter(|action| !action.text.trim().is_empty())
            .map(|action| HiveActionCreateDBRequest {
                hive_id: inspection.hive_id,
                inspection_id: Some(inspection.id),
                action_text: action.text.trim().to_string(),
                completed: action.checked,
            })
            .collect();
        if !new_actions.is_empty() {
            actions.create_many(&new_actions, now).await?;
        }

        Ok(inspection)
    }

    /// Fetch one inspection with its child rows. Soft-deleted inspections are treated as absent.
    #[instrument(skip(self), err)]
    pub async fn get_by_id(&mut self, id: InspectionId) -> Result<Option<InspectionWithDetailsDBResponse>> {
        let inspection = sqlx::query_as::<_, InspectionDBResponse>(&format!(
            "SELECT {INSPECTION_COLUMNS} FROM hive_inspections WHERE id = $1 AND is_deleted = FALSE"
        ))
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        match inspection {
            Some(inspection) => Ok(self.attach_details(vec![inspection]).await?.pop()),
            None => Ok(None),
        }
    }

    /// List inspections newest first, each joined with its child rows.
    #[instrument(skip(self, filter), fields(hive_id = ?filter.hive_id, limit = ?filter.limit), err)]
    pub async fn list(&mut self, filter: &InspectionFilter) -> Result<Vec<InspectionWithDetailsDBResponse>> {
        let mut query = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {INSPECTION_COLUMNS} FROM hive_inspections WHERE is_deleted = FALSE"
        ));

        if let Some(hive_id) = filter.hive_id {
            query.push(" AND hive_id = ");
            query.push_bind(hive_id);
        }
        query.push(" ORDER BY inspection_date DESC, id DESC");
        if let Some(limit) = filter.limit {
            query.push(" LIMIT ");
            query.push_bind(limit);
        }

        let inspections = query.build_query_as::<InspectionDBResponse>().fetch_all(&mut *self.db).await?;
        tracing::debug!("Retrieved {} inspections", inspections.len());

        self.attach_details(inspections).await
    }

    /// Bulk-load child rows for the given inspections, preserving their order
    async fn attach_details(&mut self, inspections: Vec<InspectionDBResponse>) -> Result<Vec<InspectionWithDetailsDBResponse>> {
        if inspections.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<InspectionId> = inspections.iter().map(|i| i.id).collect();
        let mut queen_status: HashMap<InspectionId, QueenStatusDBResponse> =
            fetch_children::<QueenStatusDBResponse>(&mut *self.db, "queen_status", &ids)
                .await?
                .into_iter()
                .map(|row| (row.inspection_id, row))
                .collect();
        let mut brood_presence: HashMap<InspectionId, BroodPresenceDBResponse> =
            fetch_children::<BroodPresenceDBResponse>(&mut *self.db, "brood_presence", &ids)
                .await?
                .into_iter()
                .map(|row| (row.inspection_id, row))
                .collect();
        let mut colony_strength: HashMap<InspectionId, ColonyStrengthDBResponse> =
            fetch_children::<ColonyStrengthDBResponse>(&mut *self.db, "colony_strength", &ids)
                .await?
                .into_iter()
                .map(|row| (row.inspection_id, row))
                .collect();

        Ok(inspections
            .into_iter()
            .map(|inspection| InspectionWithDetailsDBResponse {
                queen_status: queen_status.remove(&inspection.id),
                brood_presence: brood_presence.remove(&inspection.id),
                colony_strength: colony_strength.remove(&inspection.id),
                inspection,
            })
            .collect())
    }
}

async fn fetch_children<T>(db: &mut SqliteConnection, table: &str, inspection_ids: &[InspectionId]) -> Result<Vec<T>>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT * FROM {table} WHERE inspection_id IN ("));
    let mut separated = query.separated(", ");
    for id in inspection_ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let rows = query.build_query_as::<T>().fetch_all(db).await?;
    Ok(rows)
}
