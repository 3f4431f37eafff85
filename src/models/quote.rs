// src/models/quote.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::{validate_confidence, validate_not_negative};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "quote_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStatus {
    Open,
    Accepted,
    Rejected,
}

// Sub-registro da análise automática do orçamento (gravado como JSONB).
// Quem gera a análise é um cliente externo; aqui só validamos e guardamos.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteAnalysis {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Escopo claro, prazo apertado.")]
    pub summary: String,

    #[schema(example = "Troca de 40 janelas no 2º andar")]
    pub scope: Option<String>,

    #[serde(default)]
    #[schema(example = json!(["prazo", "material importado"]))]
    pub risk_flags: Vec<String>,

    #[validate(custom(function = "validate_confidence"))]
    #[schema(example = 0.8)]
    pub confidence: f64,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "18500.00")]
    pub cost_estimate: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: Uuid,

    #[schema(example = "ANG-2026-0012")]
    pub quote_number: String,

    #[schema(example = "Acme GmbH")]
    pub client: String,

    #[schema(example = "19990.00")]
    pub amount: Decimal,

    #[schema(value_type = Option<String>, format = Date, example = "2026-11-30")]
    pub valid_until: Option<NaiveDate>,

    pub status: QuoteStatus,

    #[schema(value_type = Option<QuoteAnalysis>)]
    pub ai_analysis: Option<Json<QuoteAnalysis>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuotePayload {
    #[validate(length(min = 1, message = "O número é obrigatório."))]
    #[serde(alias = "number")]
    #[schema(example = "ANG-2026-0012")]
    pub quote_number: String,

    #[validate(length(min = 1, message = "O cliente é obrigatório."))]
    pub client: String,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub amount: Decimal,

    #[serde(alias = "validUntilDate", alias = "validity")]
    #[schema(value_type = Option<String>, format = Date)]
    pub valid_until: Option<NaiveDate>,

    pub status: Option<QuoteStatus>,

    #[validate(nested)]
    pub ai_analysis: Option<QuoteAnalysis>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuotePayload {
    #[validate(length(min = 1, message = "O número não pode ficar vazio."))]
    #[serde(alias = "number")]
    pub quote_number: Option<String>,

    #[validate(length(min = 1, message = "O cliente não pode ficar vazio."))]
    pub client: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    pub amount: Option<Decimal>,

    #[serde(alias = "validUntilDate", alias = "validity")]
    #[schema(value_type = Option<String>, format = Date)]
    pub valid_until: Option<NaiveDate>,

    pub status: Option<QuoteStatus>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct QuoteListQuery {
    /// Busca parcial por número ou cliente
    pub search: Option<String>,
    pub status: Option<QuoteStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_confidence_must_be_a_ratio() {
        let mut analysis = QuoteAnalysis {
            summary: "ok".to_string(),
            scope: None,
            risk_flags: vec![],
            confidence: 0.7,
            cost_estimate: Some(Decimal::from(100)),
        };
        assert!(analysis.validate().is_ok());

        analysis.confidence = 7.0;
        assert!(analysis.validate().is_err());
    }

    #[test]
    fn analysis_reads_camel_case() {
        let analysis: QuoteAnalysis = serde_json::from_str(
            r#"{"summary":"s","riskFlags":["prazo"],"confidence":0.5,"costEstimate":10.5}"#,
        )
        .unwrap();
        assert_eq!(analysis.risk_flags, vec!["prazo".to_string()]);
        assert_eq!(analysis.cost_estimate, Some(Decimal::new(105, 1)));
    }
}
