// src/handlers/timesheets.rs

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
    models::timesheet::{CreateTimesheetPayload, Timesheet, TimesheetListQuery, UpdateTimesheetPayload},
};

#[utoipa::path(
    get,
    path = "/api/timesheets",
    tag = "Timesheets",
    params(TimesheetListQuery),
    responses((status = 200, description = "Apontamentos de horas", body = Vec<Timesheet>))
)]
pub async fn list_timesheets(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<TimesheetListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.timesheet_repo.list(app_state.pool()?, &query).await?;
    Ok(Json(entries))
}

#[utoipa::path(
    get,
    path = "/api/timesheets/{id}",
    tag = "Timesheets",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Apontamento", body = Timesheet),
        (status = 404, description = "Apontamento não encontrado")
    )
)]
pub async fn get_timesheet(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let entry = app_state.timesheet_repo
        .find_by_id(app_state.pool()?, id)
        .await?
        .ok_or(AppError::NotFound("Apontamento"))?;

    Ok(Json(entry))
}

#[utoipa::path(
    post,
    path = "/api/timesheets",
    tag = "Timesheets",
    request_body = CreateTimesheetPayload,
    responses(
        (status = 201, description = "Apontamento criado", body = Timesheet),
        (status = 400, description = "Dados inválidos ou projeto inexistente")
    )
)]
pub async fn create_timesheet(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateTimesheetPayload>,
) -> Result<impl IntoResponse, AppError> {
    let entry = app_state.timesheet_repo.create(app_state.pool()?, &payload).await?;

    tracing::debug!("⏱️ {}h lançadas no projeto {}.", entry.hours, entry.project_id);
    Ok((StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    patch,
    path = "/api/timesheets/{id}",
    tag = "Timesheets",
    request_body = UpdateTimesheetPayload,
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Apontamento atualizado", body = Timesheet),
        (status = 404, description = "Apontamento não encontrado")
    )
)]
pub async fn update_timesheet(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateTimesheetPayload>,
) -> Result<impl IntoResponse, AppError> {
    let entry = app_state.timesheet_repo
        .update(app_state.pool()?, id, &payload)
        .await?
        .ok_or(AppError::NotFound("Apontamento"))?;

    Ok(Json(entry))
}

#[utoipa::path(
    delete,
    path = "/api/timesheets/{id}",
    tag = "Timesheets",
    params(("id" = Uuid, Path)),
    responses(
        (status = 204, description = "Apontamento removido"),
        (status = 404, description = "Apontamento não encontrado")
    )
)]
pub async fn delete_timesheet(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.timesheet_repo.delete(app_state.pool()?, id).await? {
        return Err(AppError::NotFound("Apontamento"));
    }

    Ok(StatusCode::NO_CONTENT)
}
