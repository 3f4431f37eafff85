// src/handlers/invoices.rs

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
    models::invoice::{
        CreateInvoicePayload, Invoice, InvoiceListQuery, RecordPaymentPayload, UpdateInvoicePayload,
    },
};

// =============================================================================
//  ÁREA 1: CRUD
// =============================================================================

// GET /api/invoices
#[utoipa::path(
    get,
    path = "/api/invoices",
    tag = "Invoices",
    params(InvoiceListQuery),
    responses(
        (status = 200, description = "Lista de faturas (mais recentes primeiro)", body = Vec<Invoice>),
        (status = 503, description = "Banco de dados não configurado")
    )
)]
pub async fn list_invoices(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<InvoiceListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let invoices = app_state.invoice_repo.list(app_state.pool()?, &query).await?;
    Ok(Json(invoices))
}

// GET /api/invoices/{id}
#[utoipa::path(
    get,
    path = "/api/invoices/{id}",
    tag = "Invoices",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Fatura com itens e histórico", body = Invoice),
        (status = 404, description = "Fatura não encontrada")
    )
)]
pub async fn get_invoice(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state.invoice_repo
        .find_by_id(app_state.pool()?, id)
        .await?
        .ok_or(AppError::NotFound("Fatura"))?;

    Ok(Json(invoice))
}

// POST /api/invoices
#[utoipa::path(
    post,
    path = "/api/invoices",
    tag = "Invoices",
    request_body = CreateInvoicePayload,
    responses(
        (status = 201, description = "Fatura criada; totais calculados no servidor", body = Invoice),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Número de fatura já usado")
    )
)]
pub async fn create_invoice(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateInvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state
        .invoice_service
        .create(app_state.pool()?, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(invoice)))
}

// PATCH/PUT /api/invoices/{id}
#[utoipa::path(
    patch,
    path = "/api/invoices/{id}",
    tag = "Invoices",
    request_body = UpdateInvoicePayload,
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Fatura atualizada", body = Invoice),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Fatura não encontrada")
    )
)]
pub async fn update_invoice(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateInvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state
        .invoice_service
        .update(app_state.pool()?, id, &payload)
        .await?;

    Ok(Json(invoice))
}

// DELETE /api/invoices/{id}
#[utoipa::path(
    delete,
    path = "/api/invoices/{id}",
    tag = "Invoices",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 204, description = "Rascunho removido"),
        (status = 404, description = "Fatura não encontrada"),
        (status = 409, description = "Só rascunhos podem ser apagados")
    )
)]
pub async fn delete_invoice(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.invoice_service.delete(app_state.pool()?, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ÁREA 2: COBRANÇA
// =============================================================================

// POST /api/invoices/{id}/payment
#[utoipa::path(
    post,
    path = "/api/invoices/{id}/payment",
    tag = "Invoices",
    request_body = RecordPaymentPayload,
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Pagamento registrado", body = Invoice),
        (status = 404, description = "Fatura não encontrada"),
        (status = 409, description = "Fatura já paga, cancelada ou estornada")
    )
)]
pub async fn record_payment(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<RecordPaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state
        .invoice_service
        .record_payment(app_state.pool()?, id, &payload)
        .await?;

    Ok(Json(invoice))
}

// POST /api/invoices/{id}/reminders
#[utoipa::path(
    post,
    path = "/api/invoices/{id}/reminders",
    tag = "Invoices",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Lembrete registrado; fatura marcada como vencida", body = Invoice),
        (status = 404, description = "Fatura não encontrada"),
        (status = 409, description = "Fatura não está em aberto")
    )
)]
pub async fn send_reminder(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state
        .invoice_service
        .send_reminder(app_state.pool()?, id)
        .await?;

    Ok(Json(invoice))
}
