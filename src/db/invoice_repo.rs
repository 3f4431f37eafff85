// src/db/invoice_repo.rs

use chrono::NaiveDate;
use sqlx::{types::Json, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::{like_pattern, map_write_error}, error::AppError},
    models::invoice::{
        Invoice, InvoiceItem, InvoiceListQuery, InvoiceStatus, InvoiceTotals, TimelineEvent,
    },
};

// Linha pronta para inserir (número e totais já resolvidos pelo serviço)
pub struct NewInvoice<'a> {
    pub invoice_number: &'a str,
    pub client: &'a str,
    pub company_id: Option<Uuid>,
    pub items: &'a [InvoiceItem],
    pub totals: InvoiceTotals,
    pub status: InvoiceStatus,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<&'a str>,
    pub created_event: TimelineEvent,
}

// Alterações parciais; `None` mantém o valor gravado
#[derive(Default)]
pub struct InvoiceChanges<'a> {
    pub client: Option<&'a str>,
    pub company_change: Option<Option<Uuid>>,
    pub items: Option<&'a [InvoiceItem]>,
    pub totals: Option<InvoiceTotals>,
    pub status: Option<InvoiceStatus>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub payment_date: Option<NaiveDate>,
    pub payment_method: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub reminder_increment: i32,
    pub events: Vec<TimelineEvent>,
}

#[derive(Clone, Default)]
pub struct InvoiceRepository;

impl InvoiceRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, query: &InvoiceListQuery) -> Result<Vec<Invoice>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT * FROM invoices
            WHERE ($1::text IS NULL OR invoice_number ILIKE $1 OR client ILIKE $1)
              AND ($2::uuid IS NULL OR company_id = $2)
              AND ($3::invoice_status IS NULL OR status = $3)
            ORDER BY issue_date DESC, invoice_number DESC
            "#,
        )
        .bind(like_pattern(query.search.as_deref()))
        .bind(query.company_id)
        .bind(query.status)
        .fetch_all(executor)
        .await?;

        Ok(invoices)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Invoice>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let invoice = sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(invoice)
    }

    /// Mesmo que `find_by_id`, mas trava a linha até o fim da transação.
    pub async fn find_for_update<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Invoice>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let invoice = sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(invoice)
    }

    /// Serializa a numeração automática do prefixo até o fim da transação.
    pub async fn lock_number_sequence<'e, E>(&self, executor: E, prefix: &str) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(prefix)
            .execute(executor)
            .await?;

        Ok(())
    }

    /// Maior número já usado com o prefixo (ex: "INV-2026-").
    /// Só entram sufixos numéricos; números digitados à mão ("INV-2026-TEST") ficam fora.
    pub async fn last_number_with_prefix<'e, E>(
        &self,
        executor: E,
        prefix: &str,
    ) -> Result<Option<String>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let number: Option<String> = sqlx::query_scalar(
            r#"
            SELECT invoice_number FROM invoices
            WHERE starts_with(invoice_number, $1)
              AND substring(invoice_number FROM char_length($1) + 1) ~ '^[0-9]{1,18}$'
            ORDER BY substring(invoice_number FROM char_length($1) + 1)::bigint DESC
            LIMIT 1
            "#,
        )
        .bind(prefix)
        .fetch_optional(executor)
        .await?;

        Ok(number)
    }

    pub async fn create<'e, E>(&self, executor: E, input: NewInvoice<'_>) -> Result<Invoice, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let invoice_number = input.invoice_number;

        sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (
                invoice_number, client, company_id, items,
                amount, vat_amount, total,
                status, issue_date, due_date, notes, timeline
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(invoice_number)
        .bind(input.client)
        .bind(input.company_id)
        .bind(Json(input.items))
        .bind(input.totals.amount)
        .bind(input.totals.vat_amount)
        .bind(input.totals.total)
        .bind(input.status)
        .bind(input.issue_date)
        .bind(input.due_date)
        .bind(input.notes)
        .bind(Json(vec![input.created_event]))
        .fetch_one(executor)
        .await
        .map_err(|e| map_write_error(e, || format!("A fatura '{}' já existe.", invoice_number)))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        changes: InvoiceChanges<'_>,
    ) -> Result<Option<Invoice>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices SET
                client = COALESCE($2, client),
                company_id = CASE WHEN $3 THEN $4 ELSE company_id END,
                items = COALESCE($5, items),
                amount = COALESCE($6, amount),
                vat_amount = COALESCE($7, vat_amount),
                total = COALESCE($8, total),
                status = COALESCE($9, status),
                issue_date = COALESCE($10, issue_date),
                due_date = COALESCE($11, due_date),
                payment_date = COALESCE($12, payment_date),
                payment_method = COALESCE($13, payment_method),
                notes = COALESCE($14, notes),
                reminder_count = reminder_count + $15,
                timeline = timeline || $16,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.client)
        .bind(changes.company_change.is_some())
        .bind(changes.company_change.flatten())
        .bind(changes.items.map(Json))
        .bind(changes.totals.map(|t| t.amount))
        .bind(changes.totals.map(|t| t.vat_amount))
        .bind(changes.totals.map(|t| t.total))
        .bind(changes.status)
        .bind(changes.issue_date)
        .bind(changes.due_date)
        .bind(changes.payment_date)
        .bind(changes.payment_method)
        .bind(changes.notes)
        .bind(changes.reminder_increment)
        .bind(Json(changes.events))
        .fetch_optional(executor)
        .await?;

        Ok(invoice)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
