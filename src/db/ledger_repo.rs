// src/db/ledger_repo.rs

use chrono::Utc;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::{like_pattern, map_write_error}, error::AppError},
    models::ledger::{CreateLedgerPayload, LedgerEntry, LedgerKind, LedgerListQuery, UpdateLedgerPayload},
};

// Um repositório para as duas tabelas (incomes/expenses).
// O nome da tabela vem de `LedgerKind::table()`, nunca do usuário.
#[derive(Clone, Copy)]
pub struct LedgerRepository {
    kind: LedgerKind,
}

impl LedgerRepository {
    pub fn new(kind: LedgerKind) -> Self {
        Self { kind }
    }

    pub async fn list<'e, E>(&self, executor: E, query: &LedgerListQuery) -> Result<Vec<LedgerEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT l.*, c.name AS company_name
            FROM {table} l
            LEFT JOIN companies c ON c.id = l.company_id
            WHERE ($1::text IS NULL OR l.title ILIKE $1 OR l.category ILIKE $1)
              AND ($2::uuid IS NULL OR l.company_id = $2)
              AND ($3::date IS NULL OR l.entry_date >= $3)
              AND ($4::date IS NULL OR l.entry_date <= $4)
            ORDER BY l.entry_date DESC, l.created_at DESC
            "#,
            table = self.kind.table()
        );

        let entries = sqlx::query_as::<_, LedgerEntry>(&sql)
            .bind(like_pattern(query.search.as_deref()))
            .bind(query.company_id)
            .bind(query.from)
            .bind(query.to)
            .fetch_all(executor)
            .await?;

        Ok(entries)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<LedgerEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT l.*, c.name AS company_name
            FROM {table} l
            LEFT JOIN companies c ON c.id = l.company_id
            WHERE l.id = $1
            "#,
            table = self.kind.table()
        );

        let entry = sqlx::query_as::<_, LedgerEntry>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(entry)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        input: &CreateLedgerPayload,
        company_id: Option<Uuid>,
    ) -> Result<LedgerEntry, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            WITH inserted AS (
                INSERT INTO {table} (
                    title, description, amount, entry_date, category, payment_method, company_id
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
            )
            SELECT i.*, c.name AS company_name
            FROM inserted i
            LEFT JOIN companies c ON c.id = i.company_id
            "#,
            table = self.kind.table()
        );

        sqlx::query_as::<_, LedgerEntry>(&sql)
            .bind(input.title.trim())
            .bind(input.description.as_deref())
            .bind(input.amount)
            .bind(input.entry_date.unwrap_or_else(|| Utc::now().date_naive()))
            .bind(input.category.as_deref())
            .bind(input.payment_method.as_deref())
            .bind(company_id)
            .fetch_one(executor)
            .await
            .map_err(|e| map_write_error(e, || format!("{} duplicada.", self.kind.label())))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &UpdateLedgerPayload,
        company_change: Option<Option<Uuid>>,
    ) -> Result<Option<LedgerEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            WITH updated AS (
                UPDATE {table} SET
                    title = COALESCE($2, title),
                    description = COALESCE($3, description),
                    amount = COALESCE($4, amount),
                    entry_date = COALESCE($5, entry_date),
                    category = COALESCE($6, category),
                    payment_method = COALESCE($7, payment_method),
                    company_id = CASE WHEN $8 THEN $9 ELSE company_id END,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT u.*, c.name AS company_name
            FROM updated u
            LEFT JOIN companies c ON c.id = u.company_id
            "#,
            table = self.kind.table()
        );

        sqlx::query_as::<_, LedgerEntry>(&sql)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(input.description.as_deref())
            .bind(input.amount)
            .bind(input.entry_date)
            .bind(input.category.as_deref())
            .bind(input.payment_method.as_deref())
            .bind(company_change.is_some())
            .bind(company_change.flatten())
            .fetch_optional(executor)
            .await
            .map_err(|e| map_write_error(e, || format!("{} duplicada.", self.kind.label())))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.kind.table());

        let result = sqlx::query(&sql).bind(id).execute(executor).await?;

        Ok(result.rows_affected() > 0)
    }
}
