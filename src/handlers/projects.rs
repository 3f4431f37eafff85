// src/handlers/projects.rs

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
    models::{
        company::CompanyRef,
        project::{Project, ProjectListQuery, CreateProjectPayload, UpdateProjectPayload},
    },
};

// GET /api/projects
#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "Projects",
    params(ProjectListQuery),
    responses(
        (status = 200, description = "Lista de projetos", body = Vec<Project>),
        (status = 503, description = "Banco de dados não configurado")
    )
)]
pub async fn list_projects(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ProjectListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let projects = app_state.project_repo.list(app_state.pool()?, &query).await?;
    Ok(Json(projects))
}

// GET /api/projects/{id}
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    tag = "Projects",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Projeto encontrado(a)", body = Project),
        (status = 404, description = "Projeto não encontrado(a)")
    )
)]
pub async fn get_project(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let project = app_state.project_repo
        .find_by_id(app_state.pool()?, id)
        .await?
        .ok_or(AppError::NotFound("Projeto"))?;

    Ok(Json(project))
}

// POST /api/projects
#[utoipa::path(
    post,
    path = "/api/projects",
    tag = "Projects",
    request_body = CreateProjectPayload,
    responses(
        (status = 201, description = "Projeto criado(a)", body = Project),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_project(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProjectPayload>,
) -> Result<impl IntoResponse, AppError> {
    let mut tx = app_state.pool()?.begin().await?;

    let company_id = app_state
        .company_service
        .resolve(
            &mut *tx,
            CompanyRef::parse(payload.company.as_deref(), payload.company_id),
        )
        .await?;

    let project = app_state.project_repo.create(&mut *tx, &payload, company_id).await?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(project)))
}

// PATCH/PUT /api/projects/{id}
#[utoipa::path(
    patch,
    path = "/api/projects/{id}",
    tag = "Projects",
    request_body = UpdateProjectPayload,
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Projeto atualizado(a)", body = Project),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Projeto não encontrado(a)")
    )
)]
pub async fn update_project(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateProjectPayload>,
) -> Result<impl IntoResponse, AppError> {
    let mut tx = app_state.pool()?.begin().await?;

    let company_change = app_state
        .company_service
        .resolve_change(&mut *tx, payload.company.as_deref(), payload.company_id)
        .await?;

    let project = app_state.project_repo
        .update(&mut *tx, id, &payload, company_change)
        .await?
        .ok_or(AppError::NotFound("Projeto"))?;
    tx.commit().await?;

    Ok(Json(project))
}

// DELETE /api/projects/{id}
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    tag = "Projects",
    params(("id" = Uuid, Path)),
    responses(
        (status = 204, description = "Projeto removido(a)"),
        (status = 404, description = "Projeto não encontrado(a)")
    )
)]
pub async fn delete_project(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.project_repo.delete(app_state.pool()?, id).await? {
        return Err(AppError::NotFound("Projeto"));
    }

    Ok(StatusCode::NO_CONTENT)
}
