//! Database repository for apiaries.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::apiaries::{ApiaryCreateDBRequest, ApiaryDBResponse, ApiaryUpdateDBRequest},
};
use crate::types::{ApiaryId, DEFAULT_BEEKEEPER_ID};
use sqlx::SqliteConnection;
use tracing::instrument;

pub struct Apiaries<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Apiaries<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    /// Unassign every hive in the apiary, then remove the apiary itself.
    ///
    /// Returns whether an apiary row was deleted. Hives are never deleted here. Callers that
    /// need both statements to land together should pass a transaction.
    #[instrument(skip(self), err)]
    pub async fn delete(&mut self, id: ApiaryId) -> Result<bool> {
        let unassigned = sqlx::query("UPDATE hives SET apiary_id = NULL WHERE apiary_id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;
        tracing::debug!(hives = unassigned.rows_affected(), "Unassigned hives from apiary");

        let result = sqlx::query("DELETE FROM apiaries WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Resolve an apiary name to its id. Exact, case-sensitive match; the lowest id wins when
    /// names collide.
    #[instrument(skip(self), err)]
    pub async fn find_id_by_name(&mut self, name: &str) -> Result<Option<ApiaryId>> {
        let id = sqlx::query_scalar::<_, ApiaryId>("SELECT id FROM apiaries WHERE name = $1 ORDER BY id LIMIT 1")
            .bind(name)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(id)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Apiaries<'c> {
    type CreateRequest = ApiaryCreateDBRequest;
    type UpdateRequest = ApiaryUpdateDBRequest;
    type Response = ApiaryDBResponse;
    type Id = ApiaryId;
    type Filter = ();

    #[instrument(skip(self, request), fields(name = ?request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let apiary = sqlx::query_as::<_, ApiaryDBResponse>(
            r#"
            INSERT INTO apiaries (name, postcode, beekeeper_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, postcode, beekeeper_id
            "#,
        )
        .bind(&request.name)
        .bind(&request.postcode)
        .bind(DEFAULT_BEEKEEPER_ID)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(apiary)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let apiary = sqlx::query_as::<_, ApiaryDBResponse>("SELECT id, name, postcode, beekeeper_id FROM apiaries WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(apiary)
    }

    #[instrument(skip(self, _filter), err)]
    async fn list(&mut self, _filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let apiaries = sqlx::query_as::<_, ApiaryDBResponse>("SELECT id, name, postcode, beekeeper_id FROM apiaries ORDER BY id")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(apiaries)
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let apiary = sqlx::query_as::<_, ApiaryDBResponse>(
            r#"
            UPDATE apiaries SET
                name = $2,
                postcode = $3
            WHERE id = $1
            RETURNING id, name, postcode, beekeeper_id
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.postcode)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(apiary)
    }
}
