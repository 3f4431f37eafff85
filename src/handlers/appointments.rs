// src/handlers/appointments.rs

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
        appointment::{Appointment, AppointmentListQuery, CreateAppointmentPayload, UpdateAppointmentPayload},
    },
};

// GET /api/appointments
// Ordenado por início; `from`/`to` recortam a janela da agenda
#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = "Appointments",
    params(AppointmentListQuery),
    responses(
        (status = 200, description = "Lista de compromissos", body = Vec<Appointment>),
        (status = 503, description = "Banco de dados não configurado")
    )
)]
pub async fn list_appointments(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<AppointmentListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let appointments = app_state.appointment_repo.list(app_state.pool()?, &query).await?;
    Ok(Json(appointments))
}

// GET /api/appointments/{id}
#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    tag = "Appointments",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Compromisso encontrado(a)", body = Appointment),
        (status = 404, description = "Compromisso não encontrado(a)")
    )
)]
pub async fn get_appointment(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = app_state.appointment_repo
        .find_by_id(app_state.pool()?, id)
        .await?
        .ok_or(AppError::NotFound("Compromisso"))?;

    Ok(Json(appointment))
}

// POST /api/appointments
#[utoipa::path(
    post,
    path = "/api/appointments",
    tag = "Appointments",
    request_body = CreateAppointmentPayload,
    responses(
        (status = 201, description = "Compromisso criado(a)", body = Appointment),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_appointment(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let mut tx = app_state.pool()?.begin().await?;

    let company_id = app_state
        .company_service
        .resolve(
            &mut *tx,
            CompanyRef::parse(payload.company.as_deref(), payload.company_id),
        )
        .await?;

    let appointment = app_state.appointment_repo.create(&mut *tx, &payload, company_id).await?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

// PATCH/PUT /api/appointments/{id}
#[utoipa::path(
    patch,
    path = "/api/appointments/{id}",
    tag = "Appointments",
    request_body = UpdateAppointmentPayload,
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Compromisso atualizado(a)", body = Appointment),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Compromisso não encontrado(a)")
    )
)]
pub async fn update_appointment(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateAppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let mut tx = app_state.pool()?.begin().await?;

    let company_change = app_state
        .company_service
        .resolve_change(&mut *tx, payload.company.as_deref(), payload.company_id)
        .await?;

    let appointment = app_state.appointment_repo
        .update(&mut *tx, id, &payload, company_change)
        .await?
        .ok_or(AppError::NotFound("Compromisso"))?;
    tx.commit().await?;

    Ok(Json(appointment))
}

// DELETE /api/appointments/{id}
#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    tag = "Appointments",
    params(("id" = Uuid, Path)),
    responses(
        (status = 204, description = "Compromisso removido(a)"),
        (status = 404, description = "Compromisso não encontrado(a)")
    )
)]
pub async fn delete_appointment(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.appointment_repo.delete(app_state.pool()?, id).await? {
        return Err(AppError::NotFound("Compromisso"));
    }

    Ok(StatusCode::NO_CONTENT)
}
