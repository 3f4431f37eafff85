use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Requisição inválida: {0}")]
    BadRequest(String),

    // DATABASE_URL ausente: o backend sobe, mas não atende rotas de dados.
    #[error("Banco de dados não configurado")]
    ServiceUnavailable,

    #[error("{0} não encontrado(a)")]
    NotFound(&'static str),

    #[error("Conflito: {0}")]
    Conflict(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Achata `ValidationErrors` em `campo -> [mensagens]`.
/// Sem mensagem customizada, usamos o código do validador (ex: "range").
pub fn validation_details(errors: &validator::ValidationErrors) -> HashMap<String, Vec<String>> {
    let mut details = HashMap::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        details.insert(field.to_string(), messages);
    }
    details
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_message = match &self {
            AppError::ValidationError(errors) => {
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": validation_details(errors),
                }));
                return (status, body).into_response();
            }
            AppError::BadRequest(message) | AppError::Conflict(message) => message.clone(),
            AppError::ServiceUnavailable => {
                "O banco de dados não está configurado neste servidor.".to_string()
            }
            AppError::NotFound(_) => self.to_string(),

            // Todo o resto vira 500. O detalhe fica só no log.
            e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                "Ocorreu um erro inesperado.".to_string()
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    #[test]
    fn maps_each_variant_to_its_status() {
        assert_eq!(AppError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::ServiceUnavailable.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(AppError::NotFound("Empresa").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::DatabaseError(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::InternalServerError(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_details_fall_back_to_code() {
        let mut errors = ValidationErrors::new();
        errors.add("name", ValidationError::new("length"));
        let mut with_message = ValidationError::new("range");
        with_message.message = Some("O valor não pode ser negativo.".into());
        errors.add("amount", with_message);

        let details = validation_details(&errors);
        assert_eq!(details["name"], vec!["length".to_string()]);
        assert_eq!(details["amount"], vec!["O valor não pode ser negativo.".to_string()]);
    }

    #[test]
    fn not_found_message_names_the_entity() {
        assert_eq!(AppError::NotFound("Fatura").to_string(), "Fatura não encontrado(a)");
    }
}
