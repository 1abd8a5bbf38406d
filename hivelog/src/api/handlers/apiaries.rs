use crate::api::models::{
    MessageResponse,
    apiaries::{ApiaryCreate, ApiaryResponse, ApiaryUpdate},
};
use crate::db::{
    errors::DbError,
    handlers::{Apiaries, Repository},
};
use crate::errors::{ApiJson, Error, Result};
use crate::{AppState, types::ApiaryId};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sqlx::Acquire;

#[utoipa::path(
    get,
    path = "/apiaries",
    tag = "apiaries",
    summary = "List apiaries",
    responses(
        (status = 200, description = "All apiaries", body = Vec<ApiaryResponse>),
        (status = 500, description = "Store failure")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_apiaries(State(state): State<AppState>) -> Result<Json<Vec<ApiaryResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let apiaries = Apiaries::new(&mut conn).list(&()).await?;

    Ok(Json(apiaries.into_iter().map(ApiaryResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/apiaries",
    tag = "apiaries",
    summary = "Create apiary",
    request_body = ApiaryCreate,
    responses(
        (status = 201, description = "Apiary created", body = ApiaryResponse),
        (status = 400, description = "Malformed body"),
        (status = 500, description = "Store failure")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_apiary(State(state): State<AppState>, ApiJson(create): ApiJson<ApiaryCreate>) -> Result<(StatusCode, Json<ApiaryResponse>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let apiary = Apiaries::new(&mut conn).create(&create.into()).await?;

    Ok((StatusCode::CREATED, Json(apiary.into())))
}

#[utoipa::path(
    put,
    path = "/apiaries/{id}",
    tag = "apiaries",
    summary = "Update apiary",
    request_body = ApiaryUpdate,
    params(("id" = i64, Path, description = "Apiary ID")),
    responses(
        (status = 200, description = "Apiary updated", body = ApiaryResponse),
        (status = 404, description = "Apiary not found"),
        (status = 500, description = "Store failure")
    )
)]
#[tracing::instrument(skip_all, fields(apiary_id = id))]
pub async fn update_apiary(
    State(state): State<AppState>,
    Path(id): Path<ApiaryId>,
    ApiJson(update): ApiJson<ApiaryUpdate>,
) -> Result<Json<ApiaryResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let apiary = Apiaries::new(&mut conn).update(id, &update.into()).await.map_err(|e| match e {
        DbError::NotFound => Error::not_found("Apiary", id),
        other => other.into(),
    })?;

    Ok(Json(apiary.into()))
}

/// Deleting an apiary that does not exist still succeeds.
#[utoipa::path(
    delete,
    path = "/apiaries/{id}",
    tag = "apiaries",
    summary = "Delete apiary",
    description = "Unassigns the apiary's hives, then deletes the apiary. Idempotent.",
    params(("id" = i64, Path, description = "Apiary ID")),
    responses(
        (status = 200, description = "Apiary deleted", body = MessageResponse),
        (status = 500, description = "Store failure")
    )
)]
#[tracing::instrument(skip_all, fields(apiary_id = id))]
pub async fn delete_apiary(State(state): State<AppState>, Path(id): Path<ApiaryId>) -> Result<Json<MessageResponse>> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let deleted = {
        let mut repo = Apiaries::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        repo.delete(id).await?
    };
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    if !deleted {
        tracing::debug!("Apiary {} was already absent", id);
    }
    Ok(Json(MessageResponse::new("Apiary deleted successfully")))
}
