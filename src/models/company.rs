// src/models/company.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::blank_as_none;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(example = "Acme GmbH")]
    pub name: String,

    #[schema(example = "Construção")]
    pub sector: Option<String>,

    #[schema(example = "Berlin")]
    pub location: Option<String>,

    #[schema(example = "kontakt@acme.de")]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,

    #[schema(example = "DE123456789")]
    pub tax_number: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// Referência a uma empresa vinda da UI
// ---
// O formulário manda um texto livre ("company") que pode ser o nome OU o id,
// e às vezes um "companyId" explícito. Aqui decidimos o que ele significa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyRef {
    Id(Uuid),
    Name(String),
    None,
}

impl CompanyRef {
    pub fn parse(company: Option<&str>, company_id: Option<Uuid>) -> Self {
        if let Some(id) = company_id {
            return CompanyRef::Id(id);
        }

        match company.map(str::trim).filter(|s| !s.is_empty()) {
            Some(text) => match Uuid::parse_str(text) {
                Ok(id) => CompanyRef::Id(id),
                Err(_) => CompanyRef::Name(text.to_string()),
            },
            None => CompanyRef::None,
        }
    }
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Acme GmbH")]
    pub name: String,

    #[serde(alias = "industry")]
    pub sector: Option<String>,
    #[serde(alias = "city")]
    pub location: Option<String>,

    #[validate(email(message = "invalid_email"))]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,

    #[serde(alias = "taxId", alias = "vatNumber")]
    pub tax_number: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyPayload {
    #[validate(length(min = 1, message = "O nome não pode ficar vazio."))]
    pub name: Option<String>,

    #[serde(alias = "industry")]
    pub sector: Option<String>,
    #[serde(alias = "city")]
    pub location: Option<String>,

    #[validate(email(message = "invalid_email"))]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,

    #[serde(alias = "taxId", alias = "vatNumber")]
    pub tax_number: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct CompanyListQuery {
    /// Busca parcial por nome, setor ou cidade
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_id_wins_over_text() {
        let id = Uuid::new_v4();
        assert_eq!(CompanyRef::parse(Some("Acme"), Some(id)), CompanyRef::Id(id));
    }

    #[test]
    fn uuid_shaped_text_is_an_id() {
        let id = Uuid::new_v4();
        let text = id.to_string();
        assert_eq!(CompanyRef::parse(Some(&text), None), CompanyRef::Id(id));
    }

    #[test]
    fn other_text_is_a_trimmed_name() {
        assert_eq!(
            CompanyRef::parse(Some("  Acme GmbH "), None),
            CompanyRef::Name("Acme GmbH".to_string())
        );
    }

    #[test]
    fn blank_or_missing_is_none() {
        assert_eq!(CompanyRef::parse(Some("   "), None), CompanyRef::None);
        assert_eq!(CompanyRef::parse(None, None), CompanyRef::None);
    }

    #[test]
    fn empty_email_is_accepted_as_missing() {
        let payload: CreateCompanyPayload =
            serde_json::from_value(serde_json::json!({ "name": "Acme GmbH", "email": "" })).unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.email, None);

        let payload: UpdateCompanyPayload =
            serde_json::from_value(serde_json::json!({ "email": "  " })).unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.email, None);
    }

    #[test]
    fn malformed_email_is_still_rejected() {
        let payload: CreateCompanyPayload =
            serde_json::from_value(serde_json::json!({ "name": "Acme GmbH", "email": "kein-email" })).unwrap();
        assert!(payload.validate().is_err());
    }
}
