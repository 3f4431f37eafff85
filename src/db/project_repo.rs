// src/db/project_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::{like_pattern, map_write_error}, error::AppError},
    models::project::{
        CreateProjectPayload, Project, ProjectListQuery, ProjectStatus, UpdateProjectPayload,
    },
};

#[derive(Clone, Default)]
pub struct ProjectRepository;

impl ProjectRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, query: &ProjectListQuery) -> Result<Vec<Project>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT p.*, c.name AS company_name
            FROM projects p
            LEFT JOIN companies c ON c.id = p.company_id
            WHERE ($1::text IS NULL OR p.name ILIKE $1)
              AND ($2::uuid IS NULL OR p.company_id = $2)
              AND ($3::project_status IS NULL OR p.status = $3)
            ORDER BY p.deadline ASC NULLS LAST, p.name ASC
            "#,
        )
        .bind(like_pattern(query.search.as_deref()))
        .bind(query.company_id)
        .bind(query.status)
        .fetch_all(executor)
        .await?;

        Ok(projects)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Project>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT p.*, c.name AS company_name
            FROM projects p
            LEFT JOIN companies c ON c.id = p.company_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(project)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        input: &CreateProjectPayload,
        company_id: Option<Uuid>,
    ) -> Result<Project, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Project>(
            r#"
            WITH inserted AS (
                INSERT INTO projects (
                    name, description, status, progress, deadline, budget, budget_used, company_id
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING *
            )
            SELECT i.*, c.name AS company_name
            FROM inserted i
            LEFT JOIN companies c ON c.id = i.company_id
            "#,
        )
        .bind(input.name.trim())
        .bind(input.description.as_deref())
        .bind(input.status.unwrap_or(ProjectStatus::Active))
        .bind(input.progress)
        .bind(input.deadline)
        .bind(input.budget)
        .bind(input.budget_used)
        .bind(company_id)
        .fetch_one(executor)
        .await
        .map_err(|e| map_write_error(e, || "Projeto duplicado.".to_string()))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &UpdateProjectPayload,
        company_change: Option<Option<Uuid>>,
    ) -> Result<Option<Project>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Project>(
            r#"
            WITH updated AS (
                UPDATE projects SET
                    name = COALESCE($2, name),
                    description = COALESCE($3, description),
                    status = COALESCE($4, status),
                    progress = COALESCE($5, progress),
                    deadline = COALESCE($6, deadline),
                    budget = COALESCE($7, budget),
                    budget_used = COALESCE($8, budget_used),
                    company_id = CASE WHEN $9 THEN $10 ELSE company_id END,
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
        .bind(input.name.as_deref().map(str::trim))
        .bind(input.description.as_deref())
        .bind(input.status)
        .bind(input.progress)
        .bind(input.deadline)
        .bind(input.budget)
        .bind(input.budget_used)
        .bind(company_change.is_some())
        .bind(company_change.flatten())
        .fetch_optional(executor)
        .await
        .map_err(|e| map_write_error(e, || "Projeto duplicado.".to_string()))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
