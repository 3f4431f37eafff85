// src/db/appointment_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::{like_pattern, map_write_error}, error::AppError},
    models::appointment::{
        Appointment, AppointmentListQuery, CreateAppointmentPayload, UpdateAppointmentPayload,
    },
};

#[derive(Clone, Default)]
pub struct AppointmentRepository;

impl AppointmentRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        query: &AppointmentListQuery,
    ) -> Result<Vec<Appointment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appointments = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT a.*, c.name AS company_name
            FROM appointments a
            LEFT JOIN companies c ON c.id = a.company_id
            WHERE ($1::uuid IS NULL OR a.company_id = $1)
              AND ($2::uuid IS NULL OR a.contact_id = $2)
              AND ($3::timestamptz IS NULL OR a.ends_at >= $3)
              AND ($4::timestamptz IS NULL OR a.starts_at < $4)
              AND ($5::text IS NULL OR a.title ILIKE $5 OR a.location ILIKE $5)
            ORDER BY a.starts_at ASC
            "#,
        )
        .bind(query.company_id)
        .bind(query.contact_id)
        .bind(query.from)
        .bind(query.to)
        .bind(like_pattern(query.search.as_deref()))
        .fetch_all(executor)
        .await?;

        Ok(appointments)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Appointment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT a.*, c.name AS company_name
            FROM appointments a
            LEFT JOIN companies c ON c.id = a.company_id
            WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(appointment)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        input: &CreateAppointmentPayload,
        company_id: Option<Uuid>,
    ) -> Result<Appointment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Appointment>(
            r#"
            WITH inserted AS (
                INSERT INTO appointments (
                    title, description, starts_at, ends_at, location, contact_id, company_id
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
            )
            SELECT i.*, c.name AS company_name
            FROM inserted i
            LEFT JOIN companies c ON c.id = i.company_id
            "#,
        )
        .bind(input.title.trim())
        .bind(input.description.as_deref())
        .bind(input.starts_at)
        .bind(input.ends_at)
        .bind(input.location.as_deref())
        .bind(input.contact_id)
        .bind(company_id)
        .fetch_one(executor)
        .await
        .map_err(|e| map_write_error(e, || "Compromisso duplicado.".to_string()))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &UpdateAppointmentPayload,
        company_change: Option<Option<Uuid>>,
    ) -> Result<Option<Appointment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // Se só uma das pontas mudar, o CHECK (ends_at >= starts_at) da tabela barra a inversão
        sqlx::query_as::<_, Appointment>(
            r#"
            WITH updated AS (
                UPDATE appointments SET
                    title = COALESCE($2, title),
                    description = COALESCE($3, description),
                    starts_at = COALESCE($4, starts_at),
                    ends_at = COALESCE($5, ends_at),
                    location = COALESCE($6, location),
                    contact_id = COALESCE($7, contact_id),
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
        .bind(input.description.as_deref())
        .bind(input.starts_at)
        .bind(input.ends_at)
        .bind(input.location.as_deref())
        .bind(input.contact_id)
        .bind(company_change.is_some())
        .bind(company_change.flatten())
        .fetch_optional(executor)
        .await
        .map_err(|e| map_write_error(e, || "Compromisso duplicado.".to_string()))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
