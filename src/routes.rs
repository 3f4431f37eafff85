// src/routes.rs

use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, handlers};

/// Monta o router completo (rotas + CORS + trace).
pub fn build_router(app_state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        // --- Sistema ---
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        // --- CRM ---
        .route(
            "/api/companies",
            get(handlers::companies::list_companies).post(handlers::companies::create_company),
        )
        .route(
            "/api/companies/{id}",
            get(handlers::companies::get_company)
                .patch(handlers::companies::update_company)
                .put(handlers::companies::update_company)
                .delete(handlers::companies::delete_company),
        )
        .route(
            "/api/contacts",
            get(handlers::contacts::list_contacts).post(handlers::contacts::create_contact),
        )
        .route(
            "/api/contacts/{id}",
            get(handlers::contacts::get_contact)
                .patch(handlers::contacts::update_contact)
                .put(handlers::contacts::update_contact)
                .delete(handlers::contacts::delete_contact),
        )
        .route(
            "/api/deals",
            get(handlers::deals::list_deals).post(handlers::deals::create_deal),
        )
        .route(
            "/api/deals/{id}",
            get(handlers::deals::get_deal)
                .patch(handlers::deals::update_deal)
                .put(handlers::deals::update_deal)
                .delete(handlers::deals::delete_deal),
        )
        // --- Vendas ---
        .route(
            "/api/quotes",
            get(handlers::quotes::list_quotes).post(handlers::quotes::create_quote),
        )
        .route(
            "/api/quotes/{id}",
            get(handlers::quotes::get_quote)
                .patch(handlers::quotes::update_quote)
                .put(handlers::quotes::update_quote)
                .delete(handlers::quotes::delete_quote),
        )
        .route(
            "/api/quotes/{id}/analysis",
            put(handlers::quotes::put_quote_analysis).delete(handlers::quotes::delete_quote_analysis),
        )
        .route(
            "/api/invoices",
            get(handlers::invoices::list_invoices).post(handlers::invoices::create_invoice),
        )
        .route(
            "/api/invoices/{id}",
            get(handlers::invoices::get_invoice)
                .patch(handlers::invoices::update_invoice)
                .put(handlers::invoices::update_invoice)
                .delete(handlers::invoices::delete_invoice),
        )
        .route("/api/invoices/{id}/payment", post(handlers::invoices::record_payment))
        .route("/api/invoices/{id}/reminders", post(handlers::invoices::send_reminder))
        // --- Financeiro ---
        .route(
            "/api/income",
            get(handlers::ledger::list_income).post(handlers::ledger::create_income),
        )
        .route(
            "/api/income/{id}",
            get(handlers::ledger::get_income)
                .patch(handlers::ledger::update_income)
                .put(handlers::ledger::update_income)
                .delete(handlers::ledger::delete_income),
        )
        .route(
            "/api/expenses",
            get(handlers::ledger::list_expenses).post(handlers::ledger::create_expense),
        )
        .route(
            "/api/expenses/{id}",
            get(handlers::ledger::get_expense)
                .patch(handlers::ledger::update_expense)
                .put(handlers::ledger::update_expense)
                .delete(handlers::ledger::delete_expense),
        )
        // --- Operação ---
        .route(
            "/api/projects",
            get(handlers::projects::list_projects).post(handlers::projects::create_project),
        )
        .route(
            "/api/projects/{id}",
            get(handlers::projects::get_project)
                .patch(handlers::projects::update_project)
                .put(handlers::projects::update_project)
                .delete(handlers::projects::delete_project),
        )
        .route(
            "/api/timesheets",
            get(handlers::timesheets::list_timesheets).post(handlers::timesheets::create_timesheet),
        )
        .route(
            "/api/timesheets/{id}",
            get(handlers::timesheets::get_timesheet)
                .patch(handlers::timesheets::update_timesheet)
                .put(handlers::timesheets::update_timesheet)
                .delete(handlers::timesheets::delete_timesheet),
        )
        .route(
            "/api/appointments",
            get(handlers::appointments::list_appointments)
                .post(handlers::appointments::create_appointment),
        )
        .route(
            "/api/appointments/{id}",
            get(handlers::appointments::get_appointment)
                .patch(handlers::appointments::update_appointment)
                .put(handlers::appointments::update_appointment)
                .delete(handlers::appointments::delete_appointment),
        )
        .route(
            "/api/articles",
            get(handlers::articles::list_articles).post(handlers::articles::create_article),
        )
        .route(
            "/api/articles/{id}",
            get(handlers::articles::get_article)
                .patch(handlers::articles::update_article)
                .put(handlers::articles::update_article)
                .delete(handlers::articles::delete_article),
        )
        // --- Dashboard ---
        .route("/api/dashboard/summary", get(handlers::dashboard::get_summary))
        .route(
            "/api/dashboard/revenue-chart",
            get(handlers::dashboard::get_revenue_chart),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(build_cors_layer(cors_origins))
        .with_state(app_state)
}

/// Sem origens configuradas o CORS fica aberto (qualquer origem).
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Origem CORS inválida ignorada: '{}'", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header::ORIGIN, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    // Sem DATABASE_URL: só o que acontece antes do banco pode ser exercitado aqui.
    fn app() -> Router {
        build_router(AppState::from_pool(None), &[])
    }

    fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let response = app()
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn openapi_document_lists_the_routes() {
        let response = app()
            .oneshot(Request::get("/api/openapi.json").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let doc = body_json(response).await;
        let paths = doc["paths"].as_object().unwrap();
        assert!(paths.contains_key("/api/companies"));
        assert!(paths.contains_key("/api/invoices/{id}/payment"));
        assert!(paths.contains_key("/api/quotes/{id}/analysis"));
        assert!(paths.contains_key("/api/dashboard/revenue-chart"));
    }

    #[tokio::test]
    async fn valid_payload_without_database_is_service_unavailable() {
        let response = app()
            .oneshot(json_request(Method::POST, "/api/companies", r#"{"name":"Acme GmbH"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn reads_without_database_are_service_unavailable() {
        let response = app()
            .oneshot(Request::get("/api/dashboard/summary").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn invalid_payload_is_rejected_before_touching_the_database() {
        let response = app()
            .oneshot(json_request(
                Method::POST,
                "/api/deals",
                r#"{"title":"Rahmenvertrag","value":-10,"probability":140}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["details"]["value"].is_array());
        assert!(body["details"]["probability"].is_array());
    }

    #[tokio::test]
    async fn inverted_appointment_window_is_rejected() {
        let response = app()
            .oneshot(json_request(
                Method::POST,
                "/api/appointments",
                r#"{"title":"Kickoff","startsAt":"2026-10-20T10:00:00Z","endsAt":"2026-10-20T09:00:00Z"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let response = app()
            .oneshot(json_request(Method::PATCH, "/api/contacts/5b0e3a58-8f55-4bb5-a3c7-1f1c6ef1f2a1", "{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_uuid_ids_are_rejected() {
        let response = app()
            .oneshot(Request::get("/api/invoices/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        let body = body_json(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn unknown_filter_values_answer_json_errors() {
        for uri in [
            "/api/invoices?status=Bogus",
            "/api/deals?stage=Somewhere",
            "/api/appointments?from=yesterday",
        ] {
            let response = app()
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(response.headers()[CONTENT_TYPE], "application/json", "{}", uri);
            let body = body_json(response).await;
            assert!(body["error"].is_string(), "{}", uri);
        }
    }

    #[tokio::test]
    async fn empty_email_passes_validation() {
        for (uri, body) in [
            ("/api/companies", r#"{"name":"Acme GmbH","email":""}"#),
            ("/api/contacts", r#"{"firstName":"Maria","email":""}"#),
        ] {
            let response = app()
                .oneshot(json_request(Method::POST, uri, body))
                .await
                .unwrap();

            // Passou do validate(); sem banco a resposta é 503
            assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE, "{}", uri);
        }
    }

    #[tokio::test]
    async fn income_and_expenses_share_validation() {
        for uri in ["/api/income", "/api/expenses"] {
            let response = app()
                .oneshot(json_request(
                    Method::POST,
                    uri,
                    r#"{"title":"Beratung","amount":-1,"date":"2026-10-01"}"#,
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }
    }

    #[tokio::test]
    async fn cors_allows_configured_origin() {
        let app = build_router(
            AppState::from_pool(None),
            &["http://localhost:5173".to_string()],
        );

        let response = app
            .oneshot(
                Request::get("/api/health")
                    .header(ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:5173"
        );
    }
}
