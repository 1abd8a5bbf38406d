use crate::api::models::stats::HiveDistributionResponse;
use crate::db::handlers::analytics;
use crate::errors::Result;
use crate::AppState;
use axum::{Json, extract::State};

#[utoipa::path(
    get,
    path = "/stats/hive_distribution",
    tag = "stats",
    summary = "Hive distribution",
    description = "Number of hives in each apiary, plus the number not assigned to any apiary.",
    responses(
        (status = 200, description = "Hive counts", body = HiveDistributionResponse),
        (status = 500, description = "Store failure")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn hive_distribution(State(state): State<AppState>) -> Result<Json<HiveDistributionResponse>> {
    let distribution = analytics::hive_distribution(&state.db).await?;

    Ok(Json(distribution.into()))
}
