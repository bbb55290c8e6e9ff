//! HTTP interface - routes, shared state and error responses.
//!
//! Three route groups mirror the three screens of the gate desk: access
//! logging, registration and reports. Handlers are thin: they pull the
//! store connection out of [`AppState`] and call into [`crate::core`].

/// Access logging endpoints
pub mod access;
/// Extractors that reject with the crate error
pub mod extract;
/// Registration endpoints for people, vehicles and links
pub mod registration;
/// Report and CSV export endpoints
pub mod reports;

use crate::{config::AppConfig, errors::Error};
use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Shared data available to all handlers.
///
/// Holds the store connection handed to every core operation and the
/// loaded settings. The connection sits behind an `Arc` because
/// `DatabaseConnection` is not `Clone` when the mock backend is compiled in.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all database operations
    pub database: Arc<DatabaseConnection>,
    /// Settings loaded at startup
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Creates a new `AppState` from a connection and settings.
    #[must_use]
    pub fn new(database: DatabaseConnection, config: AppConfig) -> Self {
        Self {
            database: Arc::new(database),
            config: Arc::new(config),
        }
    }
}

/// Builds the full router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(healthz))
        .route(
            "/api/people",
            get(registration::list_people).post(registration::create_person),
        )
        .route(
            "/api/people/{id}",
            put(registration::update_person).delete(registration::delete_person),
        )
        .route(
            "/api/vehicles",
            get(registration::list_vehicles).post(registration::create_vehicle),
        )
        .route(
            "/api/vehicles/{id}",
            put(registration::update_vehicle).delete(registration::delete_vehicle),
        )
        .route(
            "/api/links",
            get(registration::list_links).post(registration::create_link),
        )
        .route("/api/links/{id}", delete(registration::delete_link))
        .route("/api/access", post(access::record))
        .route("/api/access/lookup", get(access::lookup))
        .route("/api/access/recent", get(access::recent))
        .route("/api/reports", get(reports::report))
        .route("/api/reports/export.csv", get(reports::export_csv))
        .route("/api/reports/events/{id}", delete(reports::delete_event))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// HTTP status for each error kind.
#[must_use]
pub const fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::Validation { .. } | Error::InvalidRange { .. } => StatusCode::BAD_REQUEST,
        Error::PersonNotFound { .. }
        | Error::VehicleNotFound { .. }
        | Error::LinkNotFound { .. }
        | Error::EventNotFound { .. } => StatusCode::NOT_FOUND,
        Error::DuplicateLink { .. } => StatusCode::CONFLICT,
        Error::Database(_) | Error::Config { .. } | Error::Io(_) | Error::EnvVar(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }
        (
            status,
            Json(serde_json::json!({ "error": self.user_message() })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use axum::body::Body;
    use axum::http::{Method, Request, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn test_app() -> Router {
        let db = setup_test_db().await.unwrap();
        router(AppState::new(db, AppConfig::default()))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = send(app, method, uri, body).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&Error::validation("x")), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&Error::PersonNotFound { id: 1 }), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(&Error::DuplicateLink {
                person_id: 1,
                vehicle_id: 2
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&Error::Database(sea_orm::DbErr::Custom("boom".to_string()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_healthz() {
        let app = test_app().await;
        let (status, _) = send(&app, Method::GET, "/healthz", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_registration_flow() {
        let app = test_app().await;

        let (status, people) = send_json(
            &app,
            Method::POST,
            "/api/people",
            Some(json!({ "name": "Ana Souza", "national_id": "111" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let person_id = people[0]["id"].as_i64().unwrap();

        let (status, vehicles) = send_json(
            &app,
            Method::POST,
            "/api/vehicles",
            Some(json!({ "plate": "abc-1234", "make": "Fiat", "model": "Uno", "color": "Red" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(vehicles[0]["plate"], "ABC1234");
        let vehicle_id = vehicles[0]["id"].as_i64().unwrap();

        let link = json!({ "person_id": person_id, "vehicle_id": vehicle_id });
        let (status, links) = send_json(&app, Method::POST, "/api/links", Some(link.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(links.as_array().unwrap().len(), 1);
        assert_eq!(links[0]["person"]["name"], "Ana Souza");

        let (status, error) = send_json(&app, Method::POST, "/api/links", Some(link)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(error["error"], "This link already exists.");

        let (status, found) = send_json(&app, Method::GET, "/api/people?search=souza", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found.as_array().unwrap().len(), 1);

        let (status, remaining) =
            send_json(&app, Method::DELETE, &format!("/api/people/{person_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(remaining.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_vehicle_is_not_found() {
        let app = test_app().await;
        let (status, body) = send_json(
            &app,
            Method::PUT,
            "/api/vehicles/99",
            Some(json!({ "plate": "ABC1234" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Vehicle 99 not found");
    }

    #[tokio::test]
    async fn test_access_flow() {
        let app = test_app().await;
        send(
            &app,
            Method::POST,
            "/api/vehicles",
            Some(json!({ "plate": "ABC1234", "make": "Fiat", "model": "Uno", "color": "Red" })),
        )
        .await;

        let (status, lookup) = send_json(&app, Method::GET, "/api/access/lookup?plate=abc-1234", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(lookup["plate"], "ABC1234");
        assert_eq!(lookup["vehicle"]["model"], "Uno");
        assert!(lookup["person"].is_null());

        let (status, recorded) = send_json(
            &app,
            Method::POST,
            "/api/access",
            Some(json!({ "plate": "abc1234", "movement": "saida", "note": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(recorded["event"]["movement"], "saida");
        assert!(recorded["event"]["vehicle_id"].is_i64());
        assert!(recorded["event"]["note"].is_null());
        assert_eq!(recorded["recent"].as_array().unwrap().len(), 1);

        let (status, body) = send_json(&app, Method::POST, "/api/access", Some(json!({ "plate": "--" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_reports_and_export() {
        let app = test_app().await;

        let (status, report) = send_json(
            &app,
            Method::GET,
            "/api/reports?start=2024-01-01&end=2024-01-03",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["daily"].as_array().unwrap().len(), 3);
        assert_eq!(report["stats"]["total"], 0);

        let request = Request::builder()
            .uri("/api/reports/export.csv?start=2024-01-01&end=2024-01-03")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
        assert!(disposition.contains("relatorio_acessos_2024-01-01_2024-01-03.csv"));
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(String::from_utf8(body.to_vec()).unwrap(), crate::core::report::CSV_HEADER);

        let (status, _) = send_json(
            &app,
            Method::GET,
            "/api/reports?start=2024-02-01&end=2024-01-01",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_blank_report_dates_use_default_range() {
        let app = test_app().await;
        let (status, report) = send_json(&app, Method::GET, "/api/reports?start=&end=", None).await;
        assert_eq!(status, StatusCode::OK);
        // 30 days back plus today
        assert_eq!(report["daily"].as_array().unwrap().len(), 31);

        let (status, body) = send_json(&app, Method::GET, "/api/reports?start=yesterday", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_input_answers_with_json_error() {
        let app = test_app().await;

        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/access",
            Some(json!({ "plate": "ABC1234", "movement": "ENTRY" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body["error"].as_str().unwrap().is_empty());

        let (status, body) = send_json(&app, Method::DELETE, "/api/people/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body["error"].as_str().unwrap().is_empty());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/vehicles")
            .body(Body::from("plate=ABC1234"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].is_string());
    }
}
