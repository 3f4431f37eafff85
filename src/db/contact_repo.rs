// src/db/contact_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::{like_pattern, map_write_error}, error::AppError},
    models::contact::{Contact, ContactListQuery, CreateContactPayload, UpdateContactPayload},
};

#[derive(Clone, Default)]
pub struct ContactRepository;

impl ContactRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, query: &ContactListQuery) -> Result<Vec<Contact>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let contacts = sqlx::query_as::<_, Contact>(
            r#"
            SELECT ct.*, c.name AS company_name
            FROM contacts ct
            LEFT JOIN companies c ON c.id = ct.company_id
            WHERE ($1::text IS NULL
                   OR ct.first_name ILIKE $1
                   OR ct.last_name ILIKE $1
                   OR ct.email ILIKE $1)
              AND ($2::uuid IS NULL OR ct.company_id = $2)
            ORDER BY ct.last_name ASC NULLS LAST, ct.first_name ASC
            "#,
        )
        .bind(like_pattern(query.search.as_deref()))
        .bind(query.company_id)
        .fetch_all(executor)
        .await?;

        Ok(contacts)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Contact>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            SELECT ct.*, c.name AS company_name
            FROM contacts ct
            LEFT JOIN companies c ON c.id = ct.company_id
            WHERE ct.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(contact)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        input: &CreateContactPayload,
        company_id: Option<Uuid>,
    ) -> Result<Contact, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Contact>(
            r#"
            WITH inserted AS (
                INSERT INTO contacts (first_name, last_name, email, phone, position, company_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
            )
            SELECT i.*, c.name AS company_name
            FROM inserted i
            LEFT JOIN companies c ON c.id = i.company_id
            "#,
        )
        .bind(input.first_name.trim())
        .bind(input.last_name.as_deref())
        .bind(input.email.as_deref())
        .bind(input.phone.as_deref())
        .bind(input.position.as_deref())
        .bind(company_id)
        .fetch_one(executor)
        .await
        .map_err(|e| map_write_error(e, || "Contato duplicado.".to_string()))
    }

    /// `company_change`: `None` mantém a empresa atual, `Some(x)` grava `x` (inclusive NULL).
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &UpdateContactPayload,
        company_change: Option<Option<Uuid>>,
    ) -> Result<Option<Contact>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Contact>(
            r#"
            WITH updated AS (
                UPDATE contacts SET
                    first_name = COALESCE($2, first_name),
                    last_name = COALESCE($3, last_name),
                    email = COALESCE($4, email),
                    phone = COALESCE($5, phone),
                    position = COALESCE($6, position),
                    company_id = CASE WHEN $7 THEN $8 ELSE company_id END,
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
        .bind(input.first_name.as_deref().map(str::trim))
        .bind(input.last_name.as_deref())
        .bind(input.email.as_deref())
        .bind(input.phone.as_deref())
        .bind(input.position.as_deref())
        .bind(company_change.is_some())
        .bind(company_change.flatten())
        .fetch_optional(executor)
        .await
        .map_err(|e| map_write_error(e, || "Contato duplicado.".to_string()))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
