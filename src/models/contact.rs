// src/models/contact.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::blank_as_none;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,

    #[schema(example = "Maria")]
    pub first_name: String,

    #[schema(example = "Schmidt")]
    pub last_name: Option<String>,

    #[schema(example = "maria@acme.de")]
    pub email: Option<String>,
    pub phone: Option<String>,

    #[schema(example = "Einkauf")]
    pub position: Option<String>,

    pub company_id: Option<Uuid>,

    // Preenchido via LEFT JOIN para a listagem não precisar de outra chamada
    #[schema(example = "Acme GmbH")]
    pub company_name: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[serde(alias = "firstname")]
    #[schema(example = "Maria")]
    pub first_name: String,

    #[serde(alias = "lastname")]
    pub last_name: Option<String>,

    #[validate(email(message = "invalid_email"))]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,

    // Nome OU id da empresa; se o nome não existir, a empresa é criada
    #[serde(alias = "companyName")]
    #[schema(example = "Acme GmbH")]
    pub company: Option<String>,
    pub company_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactPayload {
    #[validate(length(min = 1, message = "O nome não pode ficar vazio."))]
    #[serde(alias = "firstname")]
    pub first_name: Option<String>,

    #[serde(alias = "lastname")]
    pub last_name: Option<String>,

    #[validate(email(message = "invalid_email"))]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,

    // Texto vazio desvincula a empresa
    #[serde(alias = "companyName")]
    pub company: Option<String>,
    pub company_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ContactListQuery {
    /// Busca parcial por nome ou e-mail
    pub search: Option<String>,
    pub company_id: Option<Uuid>,
}
