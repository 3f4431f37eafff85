// src/db/deal_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::{like_pattern, map_write_error}, error::AppError},
    models::deal::{CreateDealPayload, Deal, DealListQuery, DealStage, UpdateDealPayload},
};

#[derive(Clone, Default)]
pub struct DealRepository;

impl DealRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, query: &DealListQuery) -> Result<Vec<Deal>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let deals = sqlx::query_as::<_, Deal>(
            r#"
            SELECT d.*, c.name AS company_name
            FROM deals d
            LEFT JOIN companies c ON c.id = d.company_id
            WHERE ($1::text IS NULL OR d.title ILIKE $1)
              AND ($2::uuid IS NULL OR d.company_id = $2)
              AND ($3::deal_stage IS NULL OR d.stage = $3)
            ORDER BY d.deadline ASC NULLS LAST, d.created_at DESC
            "#,
        )
        .bind(like_pattern(query.search.as_deref()))
        .bind(query.company_id)
        .bind(query.stage)
        .fetch_all(executor)
        .await?;

        Ok(deals)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Deal>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let deal = sqlx::query_as::<_, Deal>(
            r#"
            SELECT d.*, c.name AS company_name
            FROM deals d
            LEFT JOIN companies c ON c.id = d.company_id
            WHERE d.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(deal)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        input: &CreateDealPayload,
        company_id: Option<Uuid>,
    ) -> Result<Deal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Deal>(
            r#"
            WITH inserted AS (
                INSERT INTO deals (title, value, probability, stage, deadline, company_id, notes)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
            )
            SELECT i.*, c.name AS company_name
            FROM inserted i
            LEFT JOIN companies c ON c.id = i.company_id
            "#,
        )
        .bind(input.title.trim())
        .bind(input.value)
        .bind(input.probability)
        .bind(input.stage.unwrap_or(DealStage::Lead))
        .bind(input.deadline)
        .bind(company_id)
        .bind(input.notes.as_deref())
        .fetch_one(executor)
        .await
        .map_err(|e| map_write_error(e, || "Negócio duplicado.".to_string()))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &UpdateDealPayload,
        company_change: Option<Option<Uuid>>,
    ) -> Result<Option<Deal>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Deal>(
            r#"
            WITH updated AS (
                UPDATE deals SET
                    title = COALESCE($2, title),
                    value = COALESCE($3, value),
                    probability = COALESCE($4, probability),
                    stage = COALESCE($5, stage),
                    deadline = COALESCE($6, deadline),
                    notes = COALESCE($7, notes),
                    company_id = CASE WHEN $8 THEN $9 ELSE company_id END,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT u.*, c.name AS company_name
            FROM updated u
            LEFT JOIN companies c ON c.id = u.company_id
            "#,
        )
        .bind(id)
        .bind(input.title.as_deref().map(str::trim))
        .bind(input.value)
        .bind(input.probability)
        .bind(input.stage)
        .bind(input.deadline)
        .bind(input.notes.as_deref())
        .bind(company_change.is_some())
        .bind(company_change.flatten())
        .fetch_optional(executor)
        .await
        .map_err(|e| map_write_error(e, || "Negócio duplicado.".to_string()))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM deals WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
