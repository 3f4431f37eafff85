use crate::common::error::AppError;

// ---
// Tradução de erros de escrita do Postgres
// ---
/// Converte violações de constraint em erros de negócio.
/// `unique_message` só é montada quando é de fato uma violação de unicidade.
pub(crate) fn map_write_error<F>(e: sqlx::Error, unique_message: F) -> AppError
where
    F: FnOnce() -> String,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::Conflict(unique_message());
        }
        if db_err.is_foreign_key_violation() {
            return AppError::BadRequest("Referência a um registro inexistente.".to_string());
        }
        if db_err.is_check_violation() {
            return AppError::BadRequest(format!(
                "Valor fora do intervalo permitido ({}).",
                db_err.constraint().unwrap_or("check")
            ));
        }
    }
    e.into()
}

/// Padrão `%termo%` para buscas ILIKE. Termos em branco viram `None`.
pub(crate) fn like_pattern(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_is_ignored() {
        assert_eq!(like_pattern(None), None);
        assert_eq!(like_pattern(Some("   ")), None);
        assert_eq!(like_pattern(Some(" acme ")), Some("%acme%".to_string()));
    }

    #[test]
    fn non_database_errors_pass_through() {
        let err = map_write_error(sqlx::Error::RowNotFound, || "dup".to_string());
        assert!(matches!(err, AppError::DatabaseError(sqlx::Error::RowNotFound)));
    }
}
