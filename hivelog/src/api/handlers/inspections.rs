use crate::api::models::inspections::{InspectionCreate, InspectionDetailsResponse, InspectionResponse, ListInspectionsQuery};
use crate::db::handlers::{Hives, Inspections, Repository};
use crate::errors::{ApiJson, Error, Result};
use crate::types::InspectionId;
use crate::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use sqlx::Acquire;

#[utoipa::path(
    get,
    path = "/hive_inspections",
    tag = "inspections",
    summary = "List inspections",
    description = "Newest first, each with its queen status, brood presence and colony strength records embedded.",
    params(ListInspectionsQuery),
    responses(
        (status = 200, description = "Inspections", body = Vec<InspectionDetailsResponse>),
        (status = 500, description = "Store failure")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_inspections(
    State(state): State<AppState>,
    Query(query): Query<ListInspectionsQuery>,
) -> Result<Json<Vec<InspectionDetailsResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let inspections = Inspections::new(&mut conn).list(&query.into()).await?;

    Ok(Json(inspections.into_iter().map(InspectionDetailsResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/hive_inspections/{id}",
    tag = "inspections",
    summary = "Get inspection",
    params(("id" = i64, Path, description = "Inspection ID")),
    responses(
        (status = 200, description = "Inspection with its observation records", body = InspectionDetailsResponse),
        (status = 404, description = "Inspection not found"),
        (status = 500, description = "Store failure")
    )
)]
#[tracing::instrument(skip_all, fields(inspection_id = id))]
pub async fn get_inspection(State(state): State<AppState>, Path(id): Path<InspectionId>) -> Result<Json<InspectionDetailsResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let inspection = Inspections::new(&mut conn)
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::not_found("Inspection", id))?;

    Ok(Json(inspection.into()))
}

/// Submit an inspection. Every write happens in one transaction, so a failure at any step
/// leaves the store as it was.
#[utoipa::path(
    post,
    path = "/hive_inspections",
    tag = "inspections",
    summary = "Submit inspection",
    description = "Writes the inspection and any queen status, brood presence and colony strength records, \
                   completes `completed_action_ids` and records the non-blank `actions`. All or nothing.",
    request_body = InspectionCreate,
    responses(
        (status = 201, description = "Inspection created", body = InspectionResponse),
        (status = 400, description = "hive_id missing or body malformed"),
        (status = 404, description = "Hive not found"),
        (status = 500, description = "Store failure; nothing was written")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_inspection(
    State(state): State<AppState>,
    ApiJson(create): ApiJson<InspectionCreate>,
) -> Result<(StatusCode, Json<InspectionResponse>)> {
    let hive_id = create.hive_id.ok_or_else(|| Error::BadRequest {
        message: "hive_id is required".to_string(),
    })?;

    let now = Utc::now();
    let submission = create.into_submission(hive_id, now.date_naive());

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    {
        let mut hives = Hives::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        if hives.get_by_id(hive_id).await?.is_none() {
            return Err(Error::not_found("Hive", hive_id));
        }
    }

    let inspection = {
        let mut repo = Inspections::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        repo.submit(&submission, now).await?
    };
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    tracing::info!(inspection_id = inspection.id, hive_id, "Inspection submitted");
    Ok((StatusCode::CREATED, Json(inspection.into())))
}
