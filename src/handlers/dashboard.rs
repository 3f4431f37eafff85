// src/handlers/dashboard.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    // Importamos os models para referenciar no Swagger
    models::dashboard::{DashboardSummary, RevenueChartEntry},
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Cards do topo: funil, faturas em aberto, caixa do mês", body = DashboardSummary),
        (status = 503, description = "Banco de dados não configurado")
    )
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state
        .dashboard_service
        .get_summary(app_state.pool()?)
        .await?;

    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/dashboard/revenue-chart
#[utoipa::path(
    get,
    path = "/api/dashboard/revenue-chart",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Receitas e despesas dos últimos 7 dias (dias sem movimento vêm zerados)", body = Vec<RevenueChartEntry>),
        (status = 503, description = "Banco de dados não configurado")
    )
)]
pub async fn get_revenue_chart(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let chart = app_state
        .dashboard_service
        .get_revenue_chart(app_state.pool()?)
        .await?;

    Ok((StatusCode::OK, Json(chart)))
}
