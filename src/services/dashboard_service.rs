// src/services/dashboard_service.rs

use chrono::{Duration, Utc};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::{fill_revenue_chart, DashboardSummary, RevenueChartEntry, REVENUE_CHART_DAYS},
};

#[derive(Clone, Default)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new() -> Self {
        Self { repo: DashboardRepository::new() }
    }

    pub async fn get_summary(&self, pool: &PgPool) -> Result<DashboardSummary, AppError> {
        self.repo.get_summary(pool, Utc::now().date_naive()).await
    }

    pub async fn get_revenue_chart(&self, pool: &PgPool) -> Result<Vec<RevenueChartEntry>, AppError> {
        let today = Utc::now().date_naive();
        let from = today - Duration::days(REVENUE_CHART_DAYS - 1);

        let rows = self.repo.get_daily_amounts(pool, from, today).await?;

        Ok(fill_revenue_chart(today, &rows))
    }
}
