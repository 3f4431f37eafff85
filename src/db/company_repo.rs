// src/db/company_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{like_pattern, map_write_error},
        error::AppError,
    },
    models::company::{Company, CompanyListQuery, CreateCompanyPayload, UpdateCompanyPayload},
};

// Repositório sem estado: cada método recebe o executor (pool ou transação)
#[derive(Clone, Default)]
pub struct CompanyRepository;

impl CompanyRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, query: &CompanyListQuery) -> Result<Vec<Company>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let companies = sqlx::query_as::<_, Company>(
            r#"
            SELECT * FROM companies
            WHERE ($1::text IS NULL
                   OR name ILIKE $1
                   OR sector ILIKE $1
                   OR location ILIKE $1)
            ORDER BY name ASC
            "#,
        )
        .bind(like_pattern(query.search.as_deref()))
        .fetch_all(executor)
        .await?;

        Ok(companies)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Company>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(company)
    }

    /// Busca case-insensitive pelo nome exato (usa o índice LOWER(name)).
    pub async fn find_by_name<'e, E>(&self, executor: E, name: &str) -> Result<Option<Company>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let company = sqlx::query_as::<_, Company>(
            "SELECT * FROM companies WHERE LOWER(name) = LOWER($1) LIMIT 1",
        )
        .bind(name.trim())
        .fetch_optional(executor)
        .await?;

        Ok(company)
    }

    pub async fn exists<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM companies WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await?;

        Ok(exists)
    }

    pub async fn create<'e, E>(&self, executor: E, input: &CreateCompanyPayload) -> Result<Company, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (name, sector, location, email, phone, website, tax_number)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(input.name.trim())
        .bind(input.sector.as_deref())
        .bind(input.location.as_deref())
        .bind(input.email.as_deref())
        .bind(input.phone.as_deref())
        .bind(input.website.as_deref())
        .bind(input.tax_number.as_deref())
        .fetch_one(executor)
        .await
        .map_err(|e| map_write_error(e, || format!("A empresa '{}' já existe.", input.name.trim())))
    }

    /// Cria só com o nome (usado na resolução automática de empresa).
    pub async fn create_by_name<'e, E>(&self, executor: E, name: &str) -> Result<Company, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // ON CONFLICT cobre duas requisições criando a mesma empresa ao mesmo tempo
        let company = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (name)
            VALUES ($1)
            ON CONFLICT ((LOWER(name))) DO UPDATE SET updated_at = companies.updated_at
            RETURNING *
            "#,
        )
        .bind(name.trim())
        .fetch_one(executor)
        .await?;

        Ok(company)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &UpdateCompanyPayload,
    ) -> Result<Option<Company>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies SET
                name = COALESCE($2, name),
                sector = COALESCE($3, sector),
                location = COALESCE($4, location),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                website = COALESCE($7, website),
                tax_number = COALESCE($8, tax_number),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.name.as_deref().map(str::trim))
        .bind(input.sector.as_deref())
        .bind(input.location.as_deref())
        .bind(input.email.as_deref())
        .bind(input.phone.as_deref())
        .bind(input.website.as_deref())
        .bind(input.tax_number.as_deref())
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            map_write_error(e, || {
                format!("A empresa '{}' já existe.", input.name.as_deref().unwrap_or_default())
            })
        })
    }

    /// Retorna `false` se nada foi apagado.
    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
