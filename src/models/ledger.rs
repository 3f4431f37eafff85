// src/models/ledger.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validate_not_negative;

// Receitas e despesas têm exatamente o mesmo formato; só muda a tabela.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerKind {
    Income,
    Expense,
}

impl LedgerKind {
    pub fn table(self) -> &'static str {
        match self {
            LedgerKind::Income => "incomes",
            LedgerKind::Expense => "expenses",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LedgerKind::Income => "Receita",
            LedgerKind::Expense => "Despesa",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: Uuid,

    #[schema(example = "Aluguel do escritório")]
    pub title: String,
    pub description: Option<String>,

    #[schema(example = "1450.00")]
    pub amount: Decimal,

    #[serde(rename = "date")]
    #[schema(value_type = String, format = Date, example = "2026-10-01")]
    pub entry_date: NaiveDate,

    #[schema(example = "Miete")]
    pub category: Option<String>,

    #[schema(example = "Lastschrift")]
    pub payment_method: Option<String>,

    pub company_id: Option<Uuid>,
    pub company_name: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLedgerPayload {
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub title: String,
    pub description: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "1450.00")]
    pub amount: Decimal,

    // Padrão: hoje
    #[serde(rename = "date", alias = "entryDate")]
    #[schema(value_type = Option<String>, format = Date)]
    pub entry_date: Option<NaiveDate>,

    pub category: Option<String>,
    pub payment_method: Option<String>,

    #[serde(alias = "companyName")]
    pub company: Option<String>,
    pub company_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLedgerPayload {
    #[validate(length(min = 1, message = "O título não pode ficar vazio."))]
    pub title: Option<String>,
    pub description: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    pub amount: Option<Decimal>,

    #[serde(rename = "date", alias = "entryDate")]
    #[schema(value_type = Option<String>, format = Date)]
    pub entry_date: Option<NaiveDate>,

    pub category: Option<String>,
    pub payment_method: Option<String>,

    #[serde(alias = "companyName")]
    pub company: Option<String>,
    pub company_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct LedgerListQuery {
    /// Busca parcial por título ou categoria
    pub search: Option<String>,
    pub company_id: Option<Uuid>,
    #[param(value_type = Option<String>, format = Date)]
    pub from: Option<NaiveDate>,
    #[param(value_type = Option<String>, format = Date)]
    pub to: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_kind_has_its_own_table() {
        assert_eq!(LedgerKind::Income.table(), "incomes");
        assert_eq!(LedgerKind::Expense.table(), "expenses");
    }
}
