// src/models/appointment.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::validation::validate_time_window;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,

    #[schema(example = "Vistoria na obra")]
    pub title: String,
    pub description: Option<String>,

    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,

    #[schema(example = "Hauptstraße 5, Berlin")]
    pub location: Option<String>,

    pub contact_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub company_name: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_window", skip_on_field_errors = false))]
pub struct CreateAppointmentPayload {
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub title: String,
    pub description: Option<String>,

    #[serde(alias = "start")]
    pub starts_at: DateTime<Utc>,
    #[serde(alias = "end")]
    pub ends_at: DateTime<Utc>,

    pub location: Option<String>,
    pub contact_id: Option<Uuid>,

    #[serde(alias = "companyName")]
    pub company: Option<String>,
    pub company_id: Option<Uuid>,
}

fn validate_create_window(payload: &CreateAppointmentPayload) -> Result<(), ValidationError> {
    validate_time_window(payload.starts_at, payload.ends_at)
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_window", skip_on_field_errors = false))]
pub struct UpdateAppointmentPayload {
    #[validate(length(min = 1, message = "O título não pode ficar vazio."))]
    pub title: Option<String>,
    pub description: Option<String>,

    #[serde(alias = "start")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(alias = "end")]
    pub ends_at: Option<DateTime<Utc>>,

    pub location: Option<String>,
    pub contact_id: Option<Uuid>,

    #[serde(alias = "companyName")]
    pub company: Option<String>,
    pub company_id: Option<Uuid>,
}

// Só dá para checar aqui quando as duas pontas vêm juntas; o CHECK do banco cobre o resto.
fn validate_update_window(payload: &UpdateAppointmentPayload) -> Result<(), ValidationError> {
    match (payload.starts_at, payload.ends_at) {
        (Some(starts_at), Some(ends_at)) => validate_time_window(starts_at, ends_at),
        _ => Ok(()),
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct AppointmentListQuery {
    /// Busca parcial por título ou local
    pub search: Option<String>,
    pub company_id: Option<Uuid>,
    pub contact_id: Option<Uuid>,
    /// Início da janela (inclusive)
    pub from: Option<DateTime<Utc>>,
    /// Fim da janela (exclusive)
    pub to: Option<DateTime<Utc>>,
}
