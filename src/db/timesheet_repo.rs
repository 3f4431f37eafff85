// src/db/timesheet_repo.rs

use chrono::Utc;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::{like_pattern, map_write_error}, error::AppError},
    models::timesheet::{
        CreateTimesheetPayload, Timesheet, TimesheetListQuery, UpdateTimesheetPayload,
    },
};

#[derive(Clone, Default)]
pub struct TimesheetRepository;

impl TimesheetRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, query: &TimesheetListQuery) -> Result<Vec<Timesheet>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entries = sqlx::query_as::<_, Timesheet>(
            r#"
            SELECT t.*, p.name AS project_name
            FROM timesheets t
            JOIN projects p ON p.id = t.project_id
            WHERE ($1::uuid IS NULL OR t.project_id = $1)
              AND ($2::date IS NULL OR t.work_date >= $2)
              AND ($3::date IS NULL OR t.work_date <= $3)
              AND ($4::text IS NULL OR t.description ILIKE $4)
            ORDER BY t.work_date DESC, t.created_at DESC
            "#,
        )
        .bind(query.project_id)
        .bind(query.from)
        .bind(query.to)
        .bind(like_pattern(query.search.as_deref()))
        .fetch_all(executor)
        .await?;

        Ok(entries)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Timesheet>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entry = sqlx::query_as::<_, Timesheet>(
            r#"
            SELECT t.*, p.name AS project_name
            FROM timesheets t
            JOIN projects p ON p.id = t.project_id
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(entry)
    }

    pub async fn create<'e, E>(&self, executor: E, input: &CreateTimesheetPayload) -> Result<Timesheet, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // project_id inexistente cai na FK e vira 400 em map_write_error
        sqlx::query_as::<_, Timesheet>(
            r#"
            WITH inserted AS (
                INSERT INTO timesheets (project_id, description, work_date, hours, billable, hourly_rate)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
            )
            SELECT i.*, p.name AS project_name
            FROM inserted i
            JOIN projects p ON p.id = i.project_id
            "#,
        )
        .bind(input.project_id)
        .bind(input.description.as_deref())
        .bind(input.work_date.unwrap_or_else(|| Utc::now().date_naive()))
        .bind(input.hours)
        .bind(input.billable)
        .bind(input.hourly_rate)
        .fetch_one(executor)
        .await
        .map_err(|e| map_write_error(e, || "Apontamento duplicado.".to_string()))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &UpdateTimesheetPayload,
    ) -> Result<Option<Timesheet>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Timesheet>(
            r#"
            WITH updated AS (
                UPDATE timesheets SET
                    project_id = COALESCE($2, project_id),
                    description = COALESCE($3, description),
                    work_date = COALESCE($4, work_date),
                    hours = COALESCE($5, hours),
                    billable = COALESCE($6, billable),
                    hourly_rate = COALESCE($7, hourly_rate),
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT u.*, p.name AS project_name
            FROM updated u
            JOIN projects p ON p.id = u.project_id
            "#,
        )
        .bind(id)
        .bind(input.project_id)
        .bind(input.description.as_deref())
        .bind(input.work_date)
        .bind(input.hours)
        .bind(input.billable)
        .bind(input.hourly_rate)
        .fetch_optional(executor)
        .await
        .map_err(|e| map_write_error(e, || "Apontamento duplicado.".to_string()))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM timesheets WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
