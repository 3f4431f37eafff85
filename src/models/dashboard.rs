// src/models/dashboard.rs

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// 1. Cards do topo
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub open_pipeline_value: Decimal, // Negócios ainda não ganhos/perdidos
    pub won_deals_value: Decimal,
    pub outstanding_invoices: Decimal, // Enviadas/abertas/vencidas
    pub overdue_invoices: i64,
    pub revenue_this_month: Decimal, // Faturas pagas + receitas avulsas
    pub expenses_this_month: Decimal,
    pub active_projects: i64,
    pub upcoming_appointments: i64, // Próximos 7 dias
}

// 2. Linha crua do SQL (só dias com movimento)
#[derive(Debug, FromRow)]
pub struct DailyAmountRow {
    pub day: NaiveDate,
    pub revenue: Decimal,
    pub expenses: Decimal,
}

// 3. Gráfico de receita (7 dias)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenueChartEntry {
    #[schema(value_type = String, format = Date, example = "2026-10-19")]
    pub date: NaiveDate,
    pub revenue: Decimal,
    pub expenses: Decimal,
}

pub const REVENUE_CHART_DAYS: i64 = 7;

/// Sete dias consecutivos terminando em `today`; dias sem movimento ficam zerados.
pub fn fill_revenue_chart(today: NaiveDate, rows: &[DailyAmountRow]) -> Vec<RevenueChartEntry> {
    (0..REVENUE_CHART_DAYS)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let (revenue, expenses) = rows
                .iter()
                .filter(|row| row.day == date)
                .fold((Decimal::ZERO, Decimal::ZERO), |(r, e), row| {
                    (r + row.revenue, e + row.expenses)
                });

            RevenueChartEntry { date, revenue, expenses }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn chart_always_has_seven_days_ending_today() {
        let chart = fill_revenue_chart(day(19), &[]);

        assert_eq!(chart.len(), 7);
        assert_eq!(chart.first().unwrap().date, day(13));
        assert_eq!(chart.last().unwrap().date, day(19));
        assert!(chart.iter().all(|e| e.revenue.is_zero() && e.expenses.is_zero()));
    }

    #[test]
    fn rows_land_on_their_day_and_old_rows_are_dropped() {
        let rows = vec![
            DailyAmountRow { day: day(18), revenue: Decimal::from(500), expenses: Decimal::ZERO },
            DailyAmountRow { day: day(18), revenue: Decimal::from(250), expenses: Decimal::from(40) },
            DailyAmountRow { day: day(2), revenue: Decimal::from(999), expenses: Decimal::ZERO },
        ];

        let chart = fill_revenue_chart(day(19), &rows);

        assert_eq!(chart[5].date, day(18));
        assert_eq!(chart[5].revenue, Decimal::from(750));
        assert_eq!(chart[5].expenses, Decimal::from(40));
        let total: Decimal = chart.iter().map(|e| e.revenue).sum();
        assert_eq!(total, Decimal::from(750));
    }

    #[test]
    fn chart_crosses_month_boundaries() {
        let chart = fill_revenue_chart(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), &[]);
        assert_eq!(chart[0].date, NaiveDate::from_ymd_opt(2026, 2, 24).unwrap());
    }
}
