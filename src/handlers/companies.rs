// src/handlers/companies.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        extract::{ValidatedJson, ValidatedPath, ValidatedQuery},
    },
    config::AppState,
    models::company::{Company, CompanyListQuery, CreateCompanyPayload, UpdateCompanyPayload},
};

// GET /api/companies
#[utoipa::path(
    get,
    path = "/api/companies",
    tag = "Companies",
    params(CompanyListQuery),
    responses(
        (status = 200, description = "Lista de empresas", body = Vec<Company>),
        (status = 503, description = "Banco de dados não configurado")
    )
)]
pub async fn list_companies(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<CompanyListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let companies = app_state.company_repo
        .list(app_state.pool()?, &query)
        .await?;

    Ok(Json(companies))
}

// GET /api/companies/{id}
#[utoipa::path(
    get,
    path = "/api/companies/{id}",
    tag = "Companies",
    params(("id" = Uuid, Path, description = "ID da empresa")),
    responses(
        (status = 200, description = "Empresa encontrada", body = Company),
        (status = 404, description = "Empresa não encontrada")
    )
)]
pub async fn get_company(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let company = app_state.company_repo
        .find_by_id(app_state.pool()?, id)
        .await?
        .ok_or(AppError::NotFound("Empresa"))?;

    Ok(Json(company))
}

// POST /api/companies
#[utoipa::path(
    post,
    path = "/api/companies",
    tag = "Companies",
    request_body = CreateCompanyPayload,
    responses(
        (status = 201, description = "Empresa criada", body = Company),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Já existe uma empresa com esse nome")
    )
)]
pub async fn create_company(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCompanyPayload>,
) -> Result<impl IntoResponse, AppError> {
    let company = app_state.company_repo
        .create(app_state.pool()?, &payload)
        .await?;

    tracing::info!("🏢 Empresa '{}' cadastrada.", company.name);
    Ok((StatusCode::CREATED, Json(company)))
}

// PATCH/PUT /api/companies/{id}
#[utoipa::path(
    patch,
    path = "/api/companies/{id}",
    tag = "Companies",
    request_body = UpdateCompanyPayload,
    params(("id" = Uuid, Path, description = "ID da empresa")),
    responses(
        (status = 200, description = "Empresa atualizada", body = Company),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Empresa não encontrada")
    )
)]
pub async fn update_company(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateCompanyPayload>,
) -> Result<impl IntoResponse, AppError> {
    let company = app_state.company_repo
        .update(app_state.pool()?, id, &payload)
        .await?
        .ok_or(AppError::NotFound("Empresa"))?;

    Ok(Json(company))
}

// DELETE /api/companies/{id}
#[utoipa::path(
    delete,
    path = "/api/companies/{id}",
    tag = "Companies",
    params(("id" = Uuid, Path, description = "ID da empresa")),
    responses(
        (status = 204, description = "Empresa removida; vínculos ficam sem empresa"),
        (status = 404, description = "Empresa não encontrada")
    )
)]
pub async fn delete_company(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.company_repo.delete(app_state.pool()?, id).await? {
        return Err(AppError::NotFound("Empresa"));
    }

    Ok(StatusCode::NO_CONTENT)
}
