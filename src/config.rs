// src/config.rs

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    common::error::AppError,
    db::{
        AppointmentRepository, ArticleRepository, CompanyRepository, ContactRepository, DealRepository,
        InvoiceRepository, LedgerRepository, ProjectRepository, QuoteRepository, TimesheetRepository,
    },
    models::ledger::LedgerKind,
    services::{CompanyService, DashboardService, InvoiceService},
};

// ---
// Configuração lida do ambiente (.env opcional)
// ---
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // Sem DATABASE_URL o servidor sobe mesmo assim e responde 503 nas rotas de dados.
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de uma função de busca (env ou mapa nos testes).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT inválida: '{}'", raw))?,
            None => 3000,
        };

        let max_connections = match non_empty("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS inválido: '{}'", raw))?,
            None => 5,
        };

        let cors_origins = non_empty("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            database_url: non_empty("DATABASE_URL"),
            host: non_empty("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            max_connections,
            cors_origins,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: Option<PgPool>,
    // Repositórios usados direto pelos handlers de CRUD simples
    pub company_repo: CompanyRepository,
    pub contact_repo: ContactRepository,
    pub deal_repo: DealRepository,
    pub quote_repo: QuoteRepository,
    pub invoice_repo: InvoiceRepository,
    pub income_repo: LedgerRepository,
    pub expense_repo: LedgerRepository,
    pub project_repo: ProjectRepository,
    pub timesheet_repo: TimesheetRepository,
    pub appointment_repo: AppointmentRepository,
    pub article_repo: ArticleRepository,
    // Serviços (regras que envolvem mais de um repositório)
    pub company_service: CompanyService,
    pub invoice_service: InvoiceService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = match &config.database_url {
            Some(database_url) => {
                let pool = PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(database_url)
                    .await
                    .context("Falha ao conectar ao banco de dados")?;

                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
                Some(pool)
            }
            None => {
                tracing::warn!("DATABASE_URL não definida: rotas de dados responderão 503.");
                None
            }
        };

        Ok(Self::from_pool(db_pool))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: Option<PgPool>) -> Self {
        let company_service = CompanyService::new();
        let invoice_service = InvoiceService::new(company_service.clone());
        let dashboard_service = DashboardService::new();

        Self {
            db_pool,
            company_repo: CompanyRepository::new(),
            contact_repo: ContactRepository::new(),
            deal_repo: DealRepository::new(),
            quote_repo: QuoteRepository::new(),
            invoice_repo: InvoiceRepository::new(),
            income_repo: LedgerRepository::new(LedgerKind::Income),
            expense_repo: LedgerRepository::new(LedgerKind::Expense),
            project_repo: ProjectRepository::new(),
            timesheet_repo: TimesheetRepository::new(),
            appointment_repo: AppointmentRepository::new(),
            article_repo: ArticleRepository::new(),
            company_service,
            invoice_service,
            dashboard_service,
        }
    }

    pub fn ledger_repo(&self, kind: LedgerKind) -> &LedgerRepository {
        match kind {
            LedgerKind::Income => &self.income_repo,
            LedgerKind::Expense => &self.expense_repo,
        }
    }

    /// Pool do banco ou 503 se o backend não estiver configurado.
    pub fn pool(&self) -> Result<&PgPool, AppError> {
        self.db_pool.as_ref().ok_or(AppError::ServiceUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.database_url, None);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.max_connections, 5);
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn reads_all_keys() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/archonpro"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("CORS_ORIGINS", "http://localhost:5173, https://app.archonpro.io,"),
        ]))
        .unwrap();

        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/archonpro"));
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.max_connections, 12);
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:5173".to_string(), "https://app.archonpro.io".to_string()]
        );
    }

    #[test]
    fn blank_database_url_counts_as_missing() {
        let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "  ")])).unwrap();
        assert_eq!(config.database_url, None);
    }

    #[test]
    fn invalid_port_fails() {
        assert!(Config::from_lookup(lookup_from(&[("PORT", "http")])).is_err());
    }

    #[test]
    fn unconfigured_state_answers_service_unavailable() {
        let state = AppState::from_pool(None);
        assert!(matches!(state.pool(), Err(AppError::ServiceUnavailable)));
    }
}
