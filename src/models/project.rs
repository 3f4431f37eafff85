// src/models/project.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validate_not_negative;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "project_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Active,
    OnHold,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,

    #[schema(example = "Website Relaunch")]
    pub name: String,
    pub description: Option<String>,

    pub status: ProjectStatus,

    #[schema(example = 40)]
    pub progress: i32,

    #[schema(value_type = Option<String>, format = Date, example = "2026-12-15")]
    pub deadline: Option<NaiveDate>,

    #[schema(example = "12000.00")]
    pub budget: Decimal,
    #[schema(example = "4800.00")]
    pub budget_used: Decimal,

    pub company_id: Option<Uuid>,
    pub company_name: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[serde(alias = "title")]
    pub name: String,
    pub description: Option<String>,

    pub status: Option<ProjectStatus>,

    #[validate(range(min = 0, max = 100, message = "O progresso deve estar entre 0 e 100."))]
    #[serde(default)]
    pub progress: i32,

    #[serde(alias = "dueDate")]
    #[schema(value_type = Option<String>, format = Date)]
    pub deadline: Option<NaiveDate>,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub budget: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default, alias = "spent")]
    pub budget_used: Decimal,

    #[serde(alias = "companyName", alias = "client")]
    pub company: Option<String>,
    pub company_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectPayload {
    #[validate(length(min = 1, message = "O nome não pode ficar vazio."))]
    #[serde(alias = "title")]
    pub name: Option<String>,
    pub description: Option<String>,

    pub status: Option<ProjectStatus>,

    #[validate(range(min = 0, max = 100, message = "O progresso deve estar entre 0 e 100."))]
    pub progress: Option<i32>,

    #[serde(alias = "dueDate")]
    #[schema(value_type = Option<String>, format = Date)]
    pub deadline: Option<NaiveDate>,

    #[validate(custom(function = "validate_not_negative"))]
    pub budget: Option<Decimal>,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(alias = "spent")]
    pub budget_used: Option<Decimal>,

    #[serde(alias = "companyName", alias = "client")]
    pub company: Option<String>,
    pub company_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ProjectListQuery {
    /// Busca parcial pelo nome
    pub search: Option<String>,
    pub company_id: Option<Uuid>,
    pub status: Option<ProjectStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_hold_is_serialized_as_one_word() {
        assert_eq!(serde_json::to_string(&ProjectStatus::OnHold).unwrap(), "\"OnHold\"");
    }
}
