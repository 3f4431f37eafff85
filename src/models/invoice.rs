// src/models/invoice.rs

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::{validate_not_negative, validate_percentage};

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "invoice_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Open,
    Overdue,
    Paid,
    Credited,
    Cancelled,
}

impl InvoiceStatus {
    /// Só rascunhos podem ser apagados; o resto já saiu para o cliente.
    pub fn is_deletable(self) -> bool {
        matches!(self, InvoiceStatus::Draft)
    }

    /// Faturas que ainda esperam pagamento.
    pub fn is_outstanding(self) -> bool {
        matches!(self, InvoiceStatus::Sent | InvoiceStatus::Open | InvoiceStatus::Overdue)
    }
}

// --- Itens (JSONB) ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Instalação elétrica")]
    pub description: String,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "2")]
    pub quantity: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(alias = "unitPrice")]
    #[schema(example = "150.00")]
    pub price: Decimal,

    // Alíquota em %, por linha (ex: 19 ou 7)
    #[validate(custom(function = "validate_percentage"))]
    #[serde(default, alias = "vat")]
    #[schema(example = "19")]
    pub vat_rate: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub amount: Decimal,
    pub vat_amount: Decimal,
    pub total: Decimal,
}

impl InvoiceTotals {
    /// amount = Σ qtd × preço; IVA = Σ qtd × preço × alíquota / 100.
    pub fn from_items(items: &[InvoiceItem]) -> Self {
        let (amount, vat_amount) = items.iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(amount, vat), item| {
                let net = item.quantity * item.price;
                (amount + net, vat + net * item.vat_rate / Decimal::ONE_HUNDRED)
            },
        );

        let amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let vat_amount = vat_amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        Self {
            amount,
            vat_amount,
            total: amount + vat_amount,
        }
    }
}

// --- Linha do tempo (append-only) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimelineEventKind {
    Created,
    StatusChanged,
    Paid,
    ReminderSent,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub at: DateTime<Utc>,
    pub kind: TimelineEventKind,
    pub note: Option<String>,
}

impl TimelineEvent {
    pub fn now(kind: TimelineEventKind, note: Option<String>) -> Self {
        Self { at: Utc::now(), kind, note }
    }
}

// --- Numeração ---

pub const INVOICE_NUMBER_PREFIX: &str = "INV";

/// Prefixo do ano corrente, ex: "INV-2026-".
pub fn invoice_number_prefix(date: NaiveDate) -> String {
    format!("{}-{}-", INVOICE_NUMBER_PREFIX, date.year())
}

/// Próximo número dado o maior já usado no ano (ex: "INV-2026-0041").
/// Números fora do padrão são ignorados.
pub fn next_invoice_number(date: NaiveDate, last_used: Option<&str>) -> String {
    let prefix = invoice_number_prefix(date);
    let last_seq = last_used
        .and_then(|n| n.strip_prefix(&prefix))
        .and_then(|seq| seq.parse::<u64>().ok())
        .unwrap_or(0);

    format!("{}{:04}", prefix, last_seq + 1)
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,

    #[schema(example = "INV-2026-0001")]
    pub invoice_number: String,

    #[schema(example = "Acme GmbH")]
    pub client: String,

    pub company_id: Option<Uuid>,

    #[sqlx(json)]
    pub items: Vec<InvoiceItem>,

    #[schema(example = "300.00")]
    pub amount: Decimal,
    #[schema(example = "57.00")]
    pub vat_amount: Decimal,
    #[schema(example = "357.00")]
    pub total: Decimal,

    pub status: InvoiceStatus,

    #[schema(value_type = String, format = Date, example = "2026-10-01")]
    pub issue_date: NaiveDate,
    #[schema(value_type = Option<String>, format = Date, example = "2026-10-15")]
    pub due_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub payment_date: Option<NaiveDate>,

    #[schema(example = "Überweisung")]
    pub payment_method: Option<String>,

    #[sqlx(json)]
    pub timeline: Vec<TimelineEvent>,

    pub reminder_count: i32,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoicePayload {
    // Se vier vazio, o número é gerado (INV-<ano>-<seq>)
    #[serde(alias = "number")]
    pub invoice_number: Option<String>,

    #[validate(length(min = 1, message = "O cliente é obrigatório."))]
    #[serde(alias = "clientName")]
    pub client: String,

    #[serde(alias = "companyName")]
    pub company: Option<String>,
    pub company_id: Option<Uuid>,

    #[validate(nested)]
    #[serde(default, alias = "lineItems")]
    pub items: Vec<InvoiceItem>,

    pub status: Option<InvoiceStatus>,

    #[serde(alias = "date", alias = "invoiceDate")]
    #[schema(value_type = Option<String>, format = Date)]
    pub issue_date: Option<NaiveDate>,

    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,

    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvoicePayload {
    #[validate(length(min = 1, message = "O cliente não pode ficar vazio."))]
    #[serde(alias = "clientName")]
    pub client: Option<String>,

    #[serde(alias = "companyName")]
    pub company: Option<String>,
    pub company_id: Option<Uuid>,

    // Quando presente, os totais são recalculados
    #[validate(nested)]
    #[serde(alias = "lineItems")]
    pub items: Option<Vec<InvoiceItem>>,

    pub status: Option<InvoiceStatus>,

    #[serde(alias = "date", alias = "invoiceDate")]
    #[schema(value_type = Option<String>, format = Date)]
    pub issue_date: Option<NaiveDate>,

    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,

    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentPayload {
    // Padrão: hoje
    #[schema(value_type = Option<String>, format = Date)]
    pub payment_date: Option<NaiveDate>,

    #[validate(length(min = 1, message = "A forma de pagamento não pode ficar vazia."))]
    #[schema(example = "Überweisung")]
    pub payment_method: Option<String>,

    pub note: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct InvoiceListQuery {
    /// Busca parcial por número ou cliente
    pub search: Option<String>,
    pub company_id: Option<Uuid>,
    pub status: Option<InvoiceStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i64, price: &str, vat: i64) -> InvoiceItem {
        InvoiceItem {
            description: "linha".to_string(),
            quantity: Decimal::from(quantity),
            price: price.parse().unwrap(),
            vat_rate: Decimal::from(vat),
        }
    }

    #[test]
    fn totals_sum_each_line_with_its_own_rate() {
        let totals = InvoiceTotals::from_items(&[item(2, "150.00", 19), item(1, "100.00", 7)]);

        assert_eq!(totals.amount, Decimal::from(400));
        assert_eq!(totals.vat_amount, "64.00".parse::<Decimal>().unwrap());
        assert_eq!(totals.total, "464.00".parse::<Decimal>().unwrap());
    }

    #[test]
    fn totals_round_to_cents() {
        let totals = InvoiceTotals::from_items(&[item(3, "0.333", 19)]);
        assert_eq!(totals.amount, "1.00".parse::<Decimal>().unwrap());
        assert_eq!(totals.vat_amount, "0.19".parse::<Decimal>().unwrap());
    }

    #[test]
    fn half_cents_round_away_from_zero() {
        let totals = InvoiceTotals::from_items(&[item(1, "0.125", 0)]);
        assert_eq!(totals.amount, "0.13".parse::<Decimal>().unwrap());
    }

    #[test]
    fn no_items_means_zero() {
        let totals = InvoiceTotals::from_items(&[]);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn numbering_continues_the_year_sequence() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(next_invoice_number(date, None), "INV-2026-0001");
        assert_eq!(next_invoice_number(date, Some("INV-2026-0041")), "INV-2026-0042");
        assert_eq!(next_invoice_number(date, Some("INV-2026-9999")), "INV-2026-10000");
    }

    #[test]
    fn numbering_ignores_foreign_formats() {
        let date = NaiveDate::from_ymd_opt(2027, 1, 2).unwrap();
        assert_eq!(next_invoice_number(date, Some("INV-2026-0041")), "INV-2027-0001");
        assert_eq!(next_invoice_number(date, Some("INV-2027-abc")), "INV-2027-0001");
    }

    #[test]
    fn only_drafts_can_be_deleted() {
        assert!(InvoiceStatus::Draft.is_deletable());
        for status in [
            InvoiceStatus::Sent,
            InvoiceStatus::Open,
            InvoiceStatus::Overdue,
            InvoiceStatus::Paid,
            InvoiceStatus::Credited,
            InvoiceStatus::Cancelled,
        ] {
            assert!(!status.is_deletable(), "{:?} não deveria ser apagável", status);
        }
    }

    #[test]
    fn item_accepts_legacy_field_names() {
        let parsed: InvoiceItem =
            serde_json::from_str(r#"{"description":"x","quantity":1,"unitPrice":9.5,"vat":19}"#)
                .unwrap();
        assert_eq!(parsed.price, Decimal::new(95, 1));
        assert_eq!(parsed.vat_rate, Decimal::from(19));
    }

    #[test]
    fn timeline_kinds_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&TimelineEventKind::ReminderSent).unwrap(),
            "\"reminder_sent\""
        );
    }
}
