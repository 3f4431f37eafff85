// src/models/timesheet.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::{validate_not_negative, validate_work_hours};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Timesheet {
    pub id: Uuid,

    pub project_id: Uuid,
    #[schema(example = "Website Relaunch")]
    pub project_name: Option<String>,

    #[schema(example = "Reunião de kickoff")]
    pub description: Option<String>,

    #[schema(value_type = String, format = Date, example = "2026-10-19")]
    pub work_date: NaiveDate,

    #[schema(example = "7.5")]
    pub hours: Decimal,

    pub billable: bool,

    #[schema(example = "85.00")]
    pub hourly_rate: Option<Decimal>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_billable() -> bool {
    true
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimesheetPayload {
    pub project_id: Uuid,
    pub description: Option<String>,

    // Padrão: hoje
    #[serde(alias = "date")]
    #[schema(value_type = Option<String>, format = Date)]
    pub work_date: Option<NaiveDate>,

    #[validate(custom(function = "validate_work_hours"))]
    #[schema(example = "7.5")]
    pub hours: Decimal,

    #[serde(default = "default_billable")]
    pub billable: bool,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(alias = "rate")]
    pub hourly_rate: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTimesheetPayload {
    pub project_id: Option<Uuid>,
    pub description: Option<String>,

    #[serde(alias = "date")]
    #[schema(value_type = Option<String>, format = Date)]
    pub work_date: Option<NaiveDate>,

    #[validate(custom(function = "validate_work_hours"))]
    pub hours: Option<Decimal>,

    pub billable: Option<bool>,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(alias = "rate")]
    pub hourly_rate: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct TimesheetListQuery {
    /// Busca parcial na descrição
    pub search: Option<String>,
    pub project_id: Option<Uuid>,
    #[param(value_type = Option<String>, format = Date)]
    pub from: Option<NaiveDate>,
    #[param(value_type = Option<String>, format = Date)]
    pub to: Option<NaiveDate>,
}
