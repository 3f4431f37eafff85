// src/handlers/deals.rs

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
        deal::{Deal, DealListQuery, DealStage, CreateDealPayload, UpdateDealPayload},
    },
};

// GET /api/deals
#[utoipa::path(
    get,
    path = "/api/deals",
    tag = "Deals",
    params(DealListQuery),
    responses(
        (status = 200, description = "Lista de negócios", body = Vec<Deal>),
        (status = 503, description = "Banco de dados não configurado")
    )
)]
pub async fn list_deals(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<DealListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let deals = app_state.deal_repo.list(app_state.pool()?, &query).await?;
    Ok(Json(deals))
}

// GET /api/deals/{id}
#[utoipa::path(
    get,
    path = "/api/deals/{id}",
    tag = "Deals",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Negócio encontrado(a)", body = Deal),
        (status = 404, description = "Negócio não encontrado(a)")
    )
)]
pub async fn get_deal(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let deal = app_state.deal_repo
        .find_by_id(app_state.pool()?, id)
        .await?
        .ok_or(AppError::NotFound("Negócio"))?;

    Ok(Json(deal))
}

// POST /api/deals
#[utoipa::path(
    post,
    path = "/api/deals",
    tag = "Deals",
    request_body = CreateDealPayload,
    responses(
        (status = 201, description = "Negócio criado(a)", body = Deal),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_deal(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateDealPayload>,
) -> Result<impl IntoResponse, AppError> {
    let mut tx = app_state.pool()?.begin().await?;

    let company_id = app_state
        .company_service
        .resolve(
            &mut *tx,
            CompanyRef::parse(payload.company.as_deref(), payload.company_id),
        )
        .await?;

    let deal = app_state.deal_repo.create(&mut *tx, &payload, company_id).await?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(deal)))
}

// PATCH/PUT /api/deals/{id}
#[utoipa::path(
    patch,
    path = "/api/deals/{id}",
    tag = "Deals",
    request_body = UpdateDealPayload,
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Negócio atualizado(a)", body = Deal),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Negócio não encontrado(a)")
    )
)]
pub async fn update_deal(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateDealPayload>,
) -> Result<impl IntoResponse, AppError> {
    let mut tx = app_state.pool()?.begin().await?;

    let company_change = app_state
        .company_service
        .resolve_change(&mut *tx, payload.company.as_deref(), payload.company_id)
        .await?;

    let deal = app_state.deal_repo
        .update(&mut *tx, id, &payload, company_change)
        .await?
        .ok_or(AppError::NotFound("Negócio"))?;
    tx.commit().await?;

    if payload.stage == Some(DealStage::Won) {
        tracing::info!("🎉 Negócio '{}' ganho ({}).", deal.title, deal.value);
    }

    Ok(Json(deal))
}

// DELETE /api/deals/{id}
#[utoipa::path(
    delete,
    path = "/api/deals/{id}",
    tag = "Deals",
    params(("id" = Uuid, Path)),
    responses(
        (status = 204, description = "Negócio removido(a)"),
        (status = 404, description = "Negócio não encontrado(a)")
    )
)]
pub async fn delete_deal(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.deal_repo.delete(app_state.pool()?, id).await? {
        return Err(AppError::NotFound("Negócio"));
    }

    Ok(StatusCode::NO_CONTENT)
}
