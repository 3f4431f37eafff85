// src/db/dashboard_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::error::AppError,
    models::dashboard::{DailyAmountRow, DashboardSummary},
};

#[derive(Clone, Default)]
pub struct DashboardRepository;

impl DashboardRepository {
    pub fn new() -> Self {
        Self
    }

    // 1. Resumo Geral
    pub async fn get_summary<'e, E>(&self, executor: E, today: NaiveDate) -> Result<DashboardSummary, AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        // Transação só para ler tudo do mesmo snapshot
        let mut tx = executor.begin().await?;

        // A. Pipeline de vendas
        let (open_pipeline_value, won_deals_value): (Decimal, Decimal) = sqlx::query_as(
            r#"
            SELECT
                COALESCE(SUM(value) FILTER (WHERE stage NOT IN ('WON', 'LOST')), 0),
                COALESCE(SUM(value) FILTER (WHERE stage = 'WON'), 0)
            FROM deals
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        // B. Faturas em aberto
        let (outstanding_invoices, overdue_invoices): (Decimal, i64) = sqlx::query_as(
            r#"
            SELECT
                COALESCE(SUM(total) FILTER (WHERE status IN ('SENT', 'OPEN', 'OVERDUE')), 0),
                COUNT(*) FILTER (
                    WHERE status = 'OVERDUE'
                       OR (status IN ('SENT', 'OPEN') AND due_date < $1)
                )
            FROM invoices
            "#,
        )
        .bind(today)
        .fetch_one(&mut *tx)
        .await?;

        // C. Receita do mês (faturas pagas + receitas avulsas)
        let revenue_this_month: Decimal = sqlx::query_scalar(
            r#"
            SELECT
                (SELECT COALESCE(SUM(total), 0) FROM invoices
                  WHERE status = 'PAID'
                    AND payment_date >= date_trunc('month', $1::date)::date
                    AND payment_date <= $1)
              + (SELECT COALESCE(SUM(amount), 0) FROM incomes
                  WHERE entry_date >= date_trunc('month', $1::date)::date
                    AND entry_date <= $1)
            "#,
        )
        .bind(today)
        .fetch_one(&mut *tx)
        .await?;

        // D. Despesas do mês
        let expenses_this_month: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(amount), 0) FROM expenses
            WHERE entry_date >= date_trunc('month', $1::date)::date
              AND entry_date <= $1
            "#,
        )
        .bind(today)
        .fetch_one(&mut *tx)
        .await?;

        // E. Projetos e agenda
        let (active_projects, upcoming_appointments): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM projects WHERE status = 'ACTIVE'),
                (SELECT COUNT(*) FROM appointments
                  WHERE starts_at >= NOW() AND starts_at < NOW() + INTERVAL '7 days')
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(DashboardSummary {
            open_pipeline_value,
            won_deals_value,
            outstanding_invoices,
            overdue_invoices,
            revenue_this_month,
            expenses_this_month,
            active_projects,
            upcoming_appointments,
        })
    }

    // 2. Movimento diário entre `from` e `to` (só dias com lançamentos)
    pub async fn get_daily_amounts<'e, E>(
        &self,
        executor: E,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyAmountRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, DailyAmountRow>(
            r#"
            SELECT day, SUM(revenue)::numeric AS revenue, SUM(expenses)::numeric AS expenses
            FROM (
                SELECT payment_date AS day, total AS revenue, 0::numeric AS expenses
                FROM invoices
                WHERE status = 'PAID' AND payment_date BETWEEN $1 AND $2
                UNION ALL
                SELECT entry_date, amount, 0 FROM incomes
                WHERE entry_date BETWEEN $1 AND $2
                UNION ALL
                SELECT entry_date, 0, amount FROM expenses
                WHERE entry_date BETWEEN $1 AND $2
            ) movements
            GROUP BY day
            ORDER BY day ASC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURES: &str = r#"
        INSERT INTO deals (title, value, stage) VALUES
            ('Lead', 1000, 'LEAD'),
            ('Negociação', 500, 'NEGOTIATION'),
            ('Ganho', 2000, 'WON'),
            ('Perdido', 700, 'LOST');

        INSERT INTO invoices (invoice_number, client, total, status, issue_date, due_date, payment_date) VALUES
            ('INV-2026-0001', 'A', 100, 'SENT', '2026-09-20', '2026-10-01', NULL),
            ('INV-2026-0002', 'B', 200, 'OPEN', '2026-10-01', '2026-11-01', NULL),
            ('INV-2026-0003', 'C', 50, 'OVERDUE', '2026-08-01', NULL, NULL),
            ('INV-2026-0004', 'D', 300, 'PAID', '2026-09-25', NULL, '2026-10-05'),
            ('INV-2026-0005', 'E', 999, 'PAID', '2026-09-01', NULL, '2026-09-30'),
            ('INV-2026-0006', 'F', 400, 'DRAFT', '2026-10-10', NULL, NULL);

        INSERT INTO incomes (title, amount, entry_date) VALUES
            ('Consultoria', 120, '2026-10-10'),
            ('Futuro', 80, '2026-10-25');

        INSERT INTO expenses (title, amount, entry_date) VALUES
            ('Material', 60, '2026-10-02'),
            ('Mês passado', 40, '2026-09-15');

        INSERT INTO projects (name, status) VALUES
            ('Obra 1', 'ACTIVE'),
            ('Obra 2', 'ACTIVE'),
            ('Obra 3', 'COMPLETED');

        INSERT INTO appointments (title, starts_at, ends_at) VALUES
            ('Amanhã', NOW() + INTERVAL '1 day', NOW() + INTERVAL '1 day 1 hour'),
            ('Daqui a 10 dias', NOW() + INTERVAL '10 days', NOW() + INTERVAL '10 days 1 hour'),
            ('Ontem', NOW() - INTERVAL '1 day', NOW() - INTERVAL '23 hours');
    "#;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[sqlx::test]
    async fn summary_aggregates_every_area(pool: sqlx::PgPool) {
        sqlx::raw_sql(FIXTURES).execute(&pool).await.unwrap();

        let summary = DashboardRepository::new().get_summary(&pool, today()).await.unwrap();

        assert_eq!(summary.open_pipeline_value, Decimal::from(1500));
        assert_eq!(summary.won_deals_value, Decimal::from(2000));
        assert_eq!(summary.outstanding_invoices, Decimal::from(350));
        // OVERDUE explícita + SENT com vencimento passado
        assert_eq!(summary.overdue_invoices, 2);
        assert_eq!(summary.revenue_this_month, Decimal::from(420));
        assert_eq!(summary.expenses_this_month, Decimal::from(60));
        assert_eq!(summary.active_projects, 2);
        assert_eq!(summary.upcoming_appointments, 1);
    }

    #[sqlx::test]
    async fn summary_of_empty_database_is_zeroed(pool: sqlx::PgPool) {
        let summary = DashboardRepository::new().get_summary(&pool, today()).await.unwrap();

        assert_eq!(summary.open_pipeline_value, Decimal::ZERO);
        assert_eq!(summary.outstanding_invoices, Decimal::ZERO);
        assert_eq!(summary.overdue_invoices, 0);
        assert_eq!(summary.revenue_this_month, Decimal::ZERO);
        assert_eq!(summary.upcoming_appointments, 0);
    }

    #[sqlx::test]
    async fn daily_amounts_only_list_days_with_movement(pool: sqlx::PgPool) {
        sqlx::raw_sql(FIXTURES).execute(&pool).await.unwrap();

        let from = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        let rows = DashboardRepository::new()
            .get_daily_amounts(&pool, from, today())
            .await
            .unwrap();

        let days: Vec<_> = rows.iter().map(|r| (r.day.to_string(), r.revenue, r.expenses)).collect();
        assert_eq!(
            days,
            vec![
                ("2026-10-02".to_string(), Decimal::ZERO, Decimal::from(60)),
                ("2026-10-05".to_string(), Decimal::from(300), Decimal::ZERO),
                ("2026-10-10".to_string(), Decimal::from(120), Decimal::ZERO),
            ]
        );
    }
}
