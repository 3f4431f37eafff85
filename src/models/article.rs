// src/models/article.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::{validate_not_negative, validate_percentage};

// Catálogo de artigos/serviços usados nas linhas de fatura e orçamento
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Uuid,

    #[schema(example = "SRV-001")]
    pub sku: String,

    #[schema(example = "Hora técnica")]
    pub name: String,
    pub description: Option<String>,

    #[schema(example = "h")]
    pub unit: Option<String>,

    #[schema(example = "85.00")]
    pub unit_price: Decimal,

    #[schema(example = "19")]
    pub vat_rate: Decimal,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticlePayload {
    #[validate(length(min = 1, message = "O SKU é obrigatório."))]
    #[serde(alias = "articleNumber")]
    pub sku: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub description: Option<String>,
    pub unit: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default, alias = "price")]
    pub unit_price: Decimal,

    #[validate(custom(function = "validate_percentage"))]
    #[serde(default, alias = "vat")]
    pub vat_rate: Decimal,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticlePayload {
    #[validate(length(min = 1, message = "O SKU não pode ficar vazio."))]
    #[serde(alias = "articleNumber")]
    pub sku: Option<String>,

    #[validate(length(min = 1, message = "O nome não pode ficar vazio."))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub unit: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(alias = "price")]
    pub unit_price: Option<Decimal>,

    #[validate(custom(function = "validate_percentage"))]
    #[serde(alias = "vat")]
    pub vat_rate: Option<Decimal>,

    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ArticleListQuery {
    /// Busca parcial por SKU ou nome
    pub search: Option<String>,
    /// Só artigos ativos
    pub active: Option<bool>,
}
