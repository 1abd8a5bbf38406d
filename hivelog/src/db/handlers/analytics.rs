//! Database queries for dashboard aggregates.

use sqlx::SqlitePool;
use tracing::instrument;

use crate::db::{
    errors::Result,
    models::analytics::{ApiaryHiveCount, HiveDistribution},
};

/// Count hives per apiary. Apiaries without hives are included with a zero count.
#[instrument(skip(db), err)]
pub async fn hive_distribution(db: &SqlitePool) -> Result<HiveDistribution> {
    let apiaries = sqlx::query_as::<_, ApiaryHiveCount>(
        r#"
        SELECT a.id AS apiary_id, a.name AS apiary_name, COUNT(h.id) AS hive_count
        FROM apiaries a
        LEFT JOIN hives h ON h.apiary_id = a.id
        GROUP BY a.id, a.name
        ORDER BY a.id
        "#,
    )
    .fetch_all(db)
    .await?;

    let unassigned: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hives WHERE apiary_id IS NULL")
        .fetch_one(db)
        .await?;

    Ok(HiveDistribution { apiaries, unassigned })
}
