// src/db/article_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::{like_pattern, map_write_error}, error::AppError},
    models::article::{Article, ArticleListQuery, CreateArticlePayload, UpdateArticlePayload},
};

#[derive(Clone, Default)]
pub struct ArticleRepository;

impl ArticleRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, query: &ArticleListQuery) -> Result<Vec<Article>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let articles = sqlx::query_as::<_, Article>(
            r#"
            SELECT * FROM articles
            WHERE ($1::text IS NULL OR sku ILIKE $1 OR name ILIKE $1)
              AND ($2::bool IS NULL OR is_active = $2)
            ORDER BY name ASC
            "#,
        )
        .bind(like_pattern(query.search.as_deref()))
        .bind(query.active)
        .fetch_all(executor)
        .await?;

        Ok(articles)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Article>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let article = sqlx::query_as::<_, Article>("SELECT * FROM articles WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(article)
    }

    pub async fn create<'e, E>(&self, executor: E, input: &CreateArticlePayload) -> Result<Article, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO articles (sku, name, description, unit, unit_price, vat_rate, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(input.sku.trim())
        .bind(input.name.trim())
        .bind(input.description.as_deref())
        .bind(input.unit.as_deref())
        .bind(input.unit_price)
        .bind(input.vat_rate)
        .bind(input.is_active)
        .fetch_one(executor)
        .await
        .map_err(|e| map_write_error(e, || format!("O SKU '{}' já existe.", input.sku.trim())))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &UpdateArticlePayload,
    ) -> Result<Option<Article>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles SET
                sku = COALESCE($2, sku),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                unit = COALESCE($5, unit),
                unit_price = COALESCE($6, unit_price),
                vat_rate = COALESCE($7, vat_rate),
                is_active = COALESCE($8, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.sku.as_deref().map(str::trim))
        .bind(input.name.as_deref().map(str::trim))
        .bind(input.description.as_deref())
        .bind(input.unit.as_deref())
        .bind(input.unit_price)
        .bind(input.vat_rate)
        .bind(input.is_active)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            map_write_error(e, || {
                format!("O SKU '{}' já existe.", input.sku.as_deref().unwrap_or_default())
            })
        })
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
