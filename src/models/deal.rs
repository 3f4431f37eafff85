// src/models/deal.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validate_not_negative;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "deal_stage", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DealStage {
    Lead,
    Qualified,
    Proposal,
    Negotiation,
    Won,
    Lost,
}

impl DealStage {
    /// Negócio ainda em andamento (conta no pipeline aberto).
    pub fn is_open(self) -> bool {
        !matches!(self, DealStage::Won | DealStage::Lost)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: Uuid,

    #[schema(example = "Reforma da sede")]
    pub title: String,

    #[schema(example = "25000.00")]
    pub value: Decimal,

    #[schema(example = 60)]
    pub probability: i32,

    pub stage: DealStage,

    #[schema(value_type = Option<String>, format = Date, example = "2026-12-31")]
    pub deadline: Option<NaiveDate>,

    pub company_id: Option<Uuid>,
    pub company_name: Option<String>,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDealPayload {
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    #[serde(alias = "name")]
    pub title: String,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default, alias = "amount")]
    #[schema(example = "25000.00")]
    pub value: Decimal,

    #[validate(range(min = 0, max = 100, message = "A probabilidade deve estar entre 0 e 100."))]
    #[serde(default)]
    #[schema(example = 60)]
    pub probability: i32,

    pub stage: Option<DealStage>,

    #[serde(alias = "closeDate")]
    #[schema(value_type = Option<String>, format = Date)]
    pub deadline: Option<NaiveDate>,

    #[serde(alias = "companyName")]
    pub company: Option<String>,
    pub company_id: Option<Uuid>,

    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDealPayload {
    #[validate(length(min = 1, message = "O título não pode ficar vazio."))]
    #[serde(alias = "name")]
    pub title: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(alias = "amount")]
    pub value: Option<Decimal>,

    #[validate(range(min = 0, max = 100, message = "A probabilidade deve estar entre 0 e 100."))]
    pub probability: Option<i32>,

    pub stage: Option<DealStage>,

    #[serde(alias = "closeDate")]
    #[schema(value_type = Option<String>, format = Date)]
    pub deadline: Option<NaiveDate>,

    #[serde(alias = "companyName")]
    pub company: Option<String>,
    pub company_id: Option<Uuid>,

    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct DealListQuery {
    /// Busca parcial pelo título
    pub search: Option<String>,
    pub company_id: Option<Uuid>,
    pub stage: Option<DealStage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_won_and_lost_are_closed() {
        assert!(DealStage::Lead.is_open());
        assert!(DealStage::Negotiation.is_open());
        assert!(!DealStage::Won.is_open());
        assert!(!DealStage::Lost.is_open());
    }

    #[test]
    fn stage_labels_match_the_dashboard() {
        assert_eq!(serde_json::to_string(&DealStage::Qualified).unwrap(), "\"Qualified\"");
        let stage: DealStage = serde_json::from_str("\"Negotiation\"").unwrap();
        assert_eq!(stage, DealStage::Negotiation);
        assert!(serde_json::from_str::<DealStage>("\"Closed\"").is_err());
    }
}
