// src/services/company_service.rs

use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CompanyRepository,
    models::company::CompanyRef,
};

// Resolução de empresa compartilhada por contatos, negócios, faturas, projetos...
#[derive(Clone, Default)]
pub struct CompanyService {
    repo: CompanyRepository,
}

impl CompanyService {
    pub fn new() -> Self {
        Self { repo: CompanyRepository::new() }
    }

    /// - id explícito: devolve o id se a empresa existir, senão `None`;
    /// - nome: busca sem diferenciar maiúsculas e cria se não existir;
    /// - nada: `None`.
    pub async fn resolve(
        &self,
        conn: &mut PgConnection,
        reference: CompanyRef,
    ) -> Result<Option<Uuid>, AppError> {
        match reference {
            CompanyRef::Id(id) => {
                if self.repo.exists(&mut *conn, id).await? {
                    Ok(Some(id))
                } else {
                    tracing::debug!("Empresa {} não existe; referência descartada.", id);
                    Ok(None)
                }
            }
            CompanyRef::Name(name) => {
                if let Some(company) = self.repo.find_by_name(&mut *conn, &name).await? {
                    return Ok(Some(company.id));
                }

                let company = self.repo.create_by_name(&mut *conn, &name).await?;
                tracing::info!("🏢 Empresa '{}' criada automaticamente ({}).", company.name, company.id);
                Ok(Some(company.id))
            }
            CompanyRef::None => Ok(None),
        }
    }

    /// Versão para PATCH: `None` quando o payload não mexe na empresa,
    /// `Some(None)` quando pede para desvincular.
    pub async fn resolve_change(
        &self,
        conn: &mut PgConnection,
        company: Option<&str>,
        company_id: Option<Uuid>,
    ) -> Result<Option<Option<Uuid>>, AppError> {
        if company.is_none() && company_id.is_none() {
            return Ok(None);
        }

        let resolved = self.resolve(conn, CompanyRef::parse(company, company_id)).await?;
        Ok(Some(resolved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Nome novo cria a empresa; o mesmo nome com outra caixa reaproveita.
    #[sqlx::test]
    async fn resolve_by_name_creates_once_ignoring_case(pool: sqlx::PgPool) {
        let service = CompanyService::new();
        let mut conn = pool.acquire().await.unwrap();

        let created = service
            .resolve(&mut conn, CompanyRef::parse(Some("  Acme GmbH "), None))
            .await
            .unwrap()
            .unwrap();
        let again = service
            .resolve(&mut conn, CompanyRef::parse(Some("acme gmbh"), None))
            .await
            .unwrap();
        assert_eq!(again, Some(created));

        let company = CompanyRepository::new()
            .find_by_id(&mut *conn, created)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(company.name, "Acme GmbH");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM companies")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[sqlx::test]
    async fn resolve_by_id_keeps_only_existing_companies(pool: sqlx::PgPool) {
        let service = CompanyService::new();
        let mut conn = pool.acquire().await.unwrap();

        let existing = service
            .resolve(&mut conn, CompanyRef::Name("Beta AG".to_string()))
            .await
            .unwrap()
            .unwrap();

        let kept = service.resolve(&mut conn, CompanyRef::Id(existing)).await.unwrap();
        assert_eq!(kept, Some(existing));

        // UUID como texto também vale como id, nunca como nome
        let unknown = Uuid::new_v4().to_string();
        let dropped = service
            .resolve(&mut conn, CompanyRef::parse(Some(unknown.as_str()), None))
            .await
            .unwrap();
        assert_eq!(dropped, None);

        let blank = service.resolve(&mut conn, CompanyRef::parse(Some("   "), None)).await.unwrap();
        assert_eq!(blank, None);
    }

    #[sqlx::test]
    async fn resolve_change_distinguishes_absent_from_unlink(pool: sqlx::PgPool) {
        let service = CompanyService::new();
        let mut conn = pool.acquire().await.unwrap();

        assert_eq!(service.resolve_change(&mut conn, None, None).await.unwrap(), None);
        assert_eq!(service.resolve_change(&mut conn, Some(""), None).await.unwrap(), Some(None));

        let linked = service.resolve_change(&mut conn, Some("Gamma KG"), None).await.unwrap();
        assert!(matches!(linked, Some(Some(_))));
    }
}
