// src/db/quote_repo.rs

use sqlx::{types::Json, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::{like_pattern, map_write_error}, error::AppError},
    models::quote::{
        CreateQuotePayload, Quote, QuoteAnalysis, QuoteListQuery, QuoteStatus, UpdateQuotePayload,
    },
};

#[derive(Clone, Default)]
pub struct QuoteRepository;

impl QuoteRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, query: &QuoteListQuery) -> Result<Vec<Quote>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let quotes = sqlx::query_as::<_, Quote>(
            r#"
            SELECT * FROM quotes
            WHERE ($1::text IS NULL OR quote_number ILIKE $1 OR client ILIKE $1)
              AND ($2::quote_status IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(like_pattern(query.search.as_deref()))
        .bind(query.status)
        .fetch_all(executor)
        .await?;

        Ok(quotes)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Quote>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let quote = sqlx::query_as::<_, Quote>("SELECT * FROM quotes WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(quote)
    }

    pub async fn create<'e, E>(&self, executor: E, input: &CreateQuotePayload) -> Result<Quote, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Quote>(
            r#"
            INSERT INTO quotes (quote_number, client, amount, valid_until, status, ai_analysis)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(input.quote_number.trim())
        .bind(input.client.trim())
        .bind(input.amount)
        .bind(input.valid_until)
        .bind(input.status.unwrap_or(QuoteStatus::Open))
        .bind(input.ai_analysis.as_ref().map(Json))
        .fetch_one(executor)
        .await
        .map_err(|e| {
            map_write_error(e, || format!("O orçamento '{}' já existe.", input.quote_number.trim()))
        })
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &UpdateQuotePayload,
    ) -> Result<Option<Quote>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Quote>(
            r#"
            UPDATE quotes SET
                quote_number = COALESCE($2, quote_number),
                client = COALESCE($3, client),
                amount = COALESCE($4, amount),
                valid_until = COALESCE($5, valid_until),
                status = COALESCE($6, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.quote_number.as_deref().map(str::trim))
        .bind(input.client.as_deref().map(str::trim))
        .bind(input.amount)
        .bind(input.valid_until)
        .bind(input.status)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            map_write_error(e, || {
                format!(
                    "O orçamento '{}' já existe.",
                    input.quote_number.as_deref().unwrap_or_default()
                )
            })
        })
    }

    /// Grava (ou limpa, com `None`) a análise do orçamento.
    pub async fn set_analysis<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        analysis: Option<&QuoteAnalysis>,
    ) -> Result<Option<Quote>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let quote = sqlx::query_as::<_, Quote>(
            r#"
            UPDATE quotes SET ai_analysis = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(analysis.map(Json))
        .fetch_optional(executor)
        .await?;

        Ok(quote)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM quotes WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
