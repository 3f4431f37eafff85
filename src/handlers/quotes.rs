// src/handlers/quotes.rs

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
    models::quote::{CreateQuotePayload, Quote, QuoteAnalysis, QuoteListQuery, UpdateQuotePayload},
};

// =============================================================================
//  CRUD DE ORÇAMENTOS
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/quotes",
    tag = "Quotes",
    params(QuoteListQuery),
    responses((status = 200, description = "Lista de orçamentos", body = Vec<Quote>))
)]
pub async fn list_quotes(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<QuoteListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let quotes = app_state.quote_repo.list(app_state.pool()?, &query).await?;
    Ok(Json(quotes))
}

#[utoipa::path(
    get,
    path = "/api/quotes/{id}",
    tag = "Quotes",
    params(("id" = Uuid, Path, description = "ID do orçamento")),
    responses(
        (status = 200, description = "Orçamento", body = Quote),
        (status = 404, description = "Orçamento não encontrado")
    )
)]
pub async fn get_quote(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let quote = app_state.quote_repo
        .find_by_id(app_state.pool()?, id)
        .await?
        .ok_or(AppError::NotFound("Orçamento"))?;

    Ok(Json(quote))
}

#[utoipa::path(
    post,
    path = "/api/quotes",
    tag = "Quotes",
    request_body = CreateQuotePayload,
    responses(
        (status = 201, description = "Orçamento criado", body = Quote),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Número de orçamento já usado")
    )
)]
pub async fn create_quote(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateQuotePayload>,
) -> Result<impl IntoResponse, AppError> {
    let quote = app_state.quote_repo.create(app_state.pool()?, &payload).await?;
    Ok((StatusCode::CREATED, Json(quote)))
}

#[utoipa::path(
    patch,
    path = "/api/quotes/{id}",
    tag = "Quotes",
    request_body = UpdateQuotePayload,
    params(("id" = Uuid, Path, description = "ID do orçamento")),
    responses(
        (status = 200, description = "Orçamento atualizado", body = Quote),
        (status = 404, description = "Orçamento não encontrado")
    )
)]
pub async fn update_quote(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateQuotePayload>,
) -> Result<impl IntoResponse, AppError> {
    let quote = app_state.quote_repo
        .update(app_state.pool()?, id, &payload)
        .await?
        .ok_or(AppError::NotFound("Orçamento"))?;

    Ok(Json(quote))
}

#[utoipa::path(
    delete,
    path = "/api/quotes/{id}",
    tag = "Quotes",
    params(("id" = Uuid, Path, description = "ID do orçamento")),
    responses(
        (status = 204, description = "Orçamento removido"),
        (status = 404, description = "Orçamento não encontrado")
    )
)]
pub async fn delete_quote(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.quote_repo.delete(app_state.pool()?, id).await? {
        return Err(AppError::NotFound("Orçamento"));
    }

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ANÁLISE (gerada por cliente externo, só armazenamos)
// =============================================================================

#[utoipa::path(
    put,
    path = "/api/quotes/{id}/analysis",
    tag = "Quotes",
    request_body = QuoteAnalysis,
    params(("id" = Uuid, Path, description = "ID do orçamento")),
    responses(
        (status = 200, description = "Análise gravada", body = Quote),
        (status = 400, description = "Análise inválida"),
        (status = 404, description = "Orçamento não encontrado")
    )
)]
pub async fn put_quote_analysis(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(analysis): ValidatedJson<QuoteAnalysis>,
) -> Result<impl IntoResponse, AppError> {
    let quote = app_state.quote_repo
        .set_analysis(app_state.pool()?, id, Some(&analysis))
        .await?
        .ok_or(AppError::NotFound("Orçamento"))?;

    tracing::info!(
        "🤖 Análise gravada no orçamento {} (confiança {:.2}).",
        quote.quote_number,
        analysis.confidence
    );
    Ok(Json(quote))
}

#[utoipa::path(
    delete,
    path = "/api/quotes/{id}/analysis",
    tag = "Quotes",
    params(("id" = Uuid, Path, description = "ID do orçamento")),
    responses(
        (status = 200, description = "Análise removida", body = Quote),
        (status = 404, description = "Orçamento não encontrado")
    )
)]
pub async fn delete_quote_analysis(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let quote = app_state.quote_repo
        .set_analysis(app_state.pool()?, id, None)
        .await?
        .ok_or(AppError::NotFound("Orçamento"))?;

    Ok(Json(quote))
}
