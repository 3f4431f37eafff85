// src/handlers/ledger.rs

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
        ledger::{CreateLedgerPayload, LedgerEntry, LedgerKind, LedgerListQuery, UpdateLedgerPayload},
    },
};

// Receitas (/api/income) e despesas (/api/expenses) compartilham a mesma lógica;
// as rotas públicas abaixo só fixam o `LedgerKind`.

async fn list_entries(
    app_state: &AppState,
    kind: LedgerKind,
    query: &LedgerListQuery,
) -> Result<Vec<LedgerEntry>, AppError> {
    app_state.ledger_repo(kind).list(app_state.pool()?, query).await
}

async fn get_entry(app_state: &AppState, kind: LedgerKind, id: Uuid) -> Result<LedgerEntry, AppError> {
    app_state.ledger_repo(kind)
        .find_by_id(app_state.pool()?, id)
        .await?
        .ok_or(AppError::NotFound(kind.label()))
}

async fn create_entry(
    app_state: &AppState,
    kind: LedgerKind,
    payload: &CreateLedgerPayload,
) -> Result<LedgerEntry, AppError> {
    let mut tx = app_state.pool()?.begin().await?;

    let company_id = app_state
        .company_service
        .resolve(
            &mut *tx,
            CompanyRef::parse(payload.company.as_deref(), payload.company_id),
        )
        .await?;

    let entry = app_state.ledger_repo(kind)
        .create(&mut *tx, payload, company_id)
        .await?;
    tx.commit().await?;

    tracing::info!("📒 {} '{}' lançada: {}.", kind.label(), entry.title, entry.amount);
    Ok(entry)
}

async fn update_entry(
    app_state: &AppState,
    kind: LedgerKind,
    id: Uuid,
    payload: &UpdateLedgerPayload,
) -> Result<LedgerEntry, AppError> {
    let mut tx = app_state.pool()?.begin().await?;

    let company_change = app_state
        .company_service
        .resolve_change(&mut *tx, payload.company.as_deref(), payload.company_id)
        .await?;

    let entry = app_state.ledger_repo(kind)
        .update(&mut *tx, id, payload, company_change)
        .await?
        .ok_or(AppError::NotFound(kind.label()))?;
    tx.commit().await?;

    Ok(entry)
}

async fn delete_entry(app_state: &AppState, kind: LedgerKind, id: Uuid) -> Result<StatusCode, AppError> {
    if !app_state.ledger_repo(kind).delete(app_state.pool()?, id).await? {
        return Err(AppError::NotFound(kind.label()));
    }
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  RECEITAS
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/income",
    tag = "Finance",
    params(LedgerListQuery),
    responses((status = 200, description = "Receitas avulsas", body = Vec<LedgerEntry>))
)]
pub async fn list_income(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<LedgerListQuery>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(list_entries(&app_state, LedgerKind::Income, &query).await?))
}

#[utoipa::path(
    get,
    path = "/api/income/{id}",
    tag = "Finance",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Receita", body = LedgerEntry),
        (status = 404, description = "Receita não encontrada")
    )
)]
pub async fn get_income(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(get_entry(&app_state, LedgerKind::Income, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/income",
    tag = "Finance",
    request_body = CreateLedgerPayload,
    responses(
        (status = 201, description = "Receita lançada", body = LedgerEntry),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_income(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateLedgerPayload>,
) -> Result<impl IntoResponse, AppError> {
    let entry = create_entry(&app_state, LedgerKind::Income, &payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    patch,
    path = "/api/income/{id}",
    tag = "Finance",
    request_body = UpdateLedgerPayload,
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Receita atualizada", body = LedgerEntry),
        (status = 404, description = "Receita não encontrada")
    )
)]
pub async fn update_income(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateLedgerPayload>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(update_entry(&app_state, LedgerKind::Income, id, &payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/income/{id}",
    tag = "Finance",
    params(("id" = Uuid, Path)),
    responses(
        (status = 204, description = "Receita removida"),
        (status = 404, description = "Receita não encontrada")
    )
)]
pub async fn delete_income(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    delete_entry(&app_state, LedgerKind::Income, id).await
}

// =============================================================================
//  DESPESAS
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/expenses",
    tag = "Finance",
    params(LedgerListQuery),
    responses((status = 200, description = "Despesas", body = Vec<LedgerEntry>))
)]
pub async fn list_expenses(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<LedgerListQuery>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(list_entries(&app_state, LedgerKind::Expense, &query).await?))
}

#[utoipa::path(
    get,
    path = "/api/expenses/{id}",
    tag = "Finance",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Despesa", body = LedgerEntry),
        (status = 404, description = "Despesa não encontrada")
    )
)]
pub async fn get_expense(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(get_entry(&app_state, LedgerKind::Expense, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/expenses",
    tag = "Finance",
    request_body = CreateLedgerPayload,
    responses(
        (status = 201, description = "Despesa lançada", body = LedgerEntry),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_expense(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateLedgerPayload>,
) -> Result<impl IntoResponse, AppError> {
    let entry = create_entry(&app_state, LedgerKind::Expense, &payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    patch,
    path = "/api/expenses/{id}",
    tag = "Finance",
    request_body = UpdateLedgerPayload,
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Despesa atualizada", body = LedgerEntry),
        (status = 404, description = "Despesa não encontrada")
    )
)]
pub async fn update_expense(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateLedgerPayload>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(update_entry(&app_state, LedgerKind::Expense, id, &payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/expenses/{id}",
    tag = "Finance",
    params(("id" = Uuid, Path)),
    responses(
        (status = 204, description = "Despesa removida"),
        (status = 404, description = "Despesa não encontrada")
    )
)]
pub async fn delete_expense(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    delete_entry(&app_state, LedgerKind::Expense, id).await
}
