//! Database repository for hives.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::hives::{HiveCreateDBRequest, HiveDBResponse, HiveUpdateDBRequest},
};
use crate::types::HiveId;
use sqlx::SqliteConnection;
use tracing::instrument;

pub struct Hives<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Hives<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    /// Delete a hive. Inspections and hive actions that reference it are left in place.
    #[instrument(skip(self), err)]
    pub async fn delete(&mut self, id: HiveId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM hives WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Hives<'c> {
    type CreateRequest = HiveCreateDBRequest;
    type UpdateRequest = HiveUpdateDBRequest;
    type Response = HiveDBResponse;
    type Id = HiveId;
    type Filter = ();

    #[instrument(skip(self, request), fields(name = %request.name, apiary_id = ?request.apiary_id), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let hive = sqlx::query_as::<_, HiveDBResponse>(
            r#"
            INSERT INTO hives (apiary_id, name, hive_type)
            VALUES ($1, $2, $3)
            RETURNING id, apiary_id, name, hive_type
            "#,
        )
        .bind(request.apiary_id)
        .bind(&request.name)
        .bind(&request.hive_type)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(hive)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let hive = sqlx::query_as::<_, HiveDBResponse>("SELECT id, apiary_id, name, hive_type FROM hives WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(hive)
    }

    #[instrument(skip(self, _filter), err)]
    async fn list(&mut self, _filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let hives = sqlx::query_as::<_, HiveDBResponse>("SELECT id, apiary_id, name, hive_type FROM hives ORDER BY id")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(hives)
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        // Atomic update with conditional field updates; $4 says whether apiary_id was supplied at all
        let hive = sqlx::query_as::<_, HiveDBResponse>(
            r#"
            UPDATE hives SET
                name = COALESCE($2, name),
                hive_type = COALESCE($3, hive_type),
                apiary_id = CASE WHEN $4 THEN $5 ELSE apiary_id END
            WHERE id = $1
            RETURNING id, apiary_id, name, hive_type
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.hive_type)
        .bind(request.apiary_id.is_some())
        .bind(request.apiary_id.flatten())
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(hive)
    }
}
