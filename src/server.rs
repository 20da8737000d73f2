//! Server bootstrap: database pool, CORS policy, request tracing and the assembled router.

use std::str::FromStr;

use axum::{
    http::{HeaderValue, Method},
    Router,
};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Config;
use crate::docs::docs_routes;
use crate::migration::apply_migrations;
use crate::routes::{common_routes, product_routes};
use crate::state::AppState;

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 100 * 1024;

/// Build the pool and create the schema.
///
/// Only an unparseable `DATABASE_URL` is an error. Connectivity failures are logged and the
/// lazily connecting pool is returned anyway, so requests fail individually until the database is reachable.
pub async fn connect_database(config: &Config) -> Result<PgPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(&config.database_url)?;
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_lazy_with(options);

    match apply_migrations(&pool).await {
        Ok(()) => tracing::info!("connected to database"),
        Err(e) => tracing::error!(error = %e, "could not connect to the database"),
    }
    Ok(pool)
}

/// Allow exactly one origin. Without a usable origin, no cross-origin caller is allowed.
pub fn cors_layer(frontend_url: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE]);
    match frontend_url.map(HeaderValue::from_str) {
        Some(Ok(origin)) => layer.allow_origin(AllowOrigin::list([origin])),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "FRONTEND_URL is not a valid origin; CORS will reject every origin");
            layer
        }
        None => layer,
    }
}

pub fn build_app(state: AppState, config: &Config) -> Router {
    Router::new()
        .nest("/api/products", product_routes(state.clone()))
        .merge(common_routes(state))
        .merge(docs_routes())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(cors_layer(config.frontend_origin()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use testresult::TestResult;
    use tower::ServiceExt;

    use super::*;
    use crate::store::{MockProductStore, PgProductStore, ProductStore};
    use crate::test_helpers::{mock_app, send, TEST_ORIGIN};

    fn unreachable_config(database_url: &str) -> Config {
        Config {
            database_url: database_url.into(),
            acquire_timeout_secs: 1,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn startup_survives_an_unreachable_database() -> TestResult {
        let pool = connect_database(&unreachable_config("postgres://nobody@127.0.0.1:1/products")).await?;
        let store = PgProductStore::new(pool);
        assert!(store.ping().await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn malformed_database_url_is_reported() {
        assert!(connect_database(&unreachable_config("not a url")).await.is_err());
    }

    #[tokio::test]
    async fn requests_fail_with_500_when_the_database_is_down() -> TestResult {
        let config = unreachable_config("postgres://nobody@127.0.0.1:1/products");
        let pool = connect_database(&config).await?;
        let app = build_app(AppState::new(PgProductStore::new(pool)), &config);

        let (status, body) = send(app, "GET", "/api/products", None).await?;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal Server Error");
        Ok(())
    }

    async fn preflight(app: Router, origin: &str) -> TestResult<axum::http::Response<Body>> {
        let req = Request::builder()
            .method("OPTIONS")
            .uri("/api/products")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())?;
        Ok(app.oneshot(req).await?)
    }

    #[tokio::test]
    async fn cors_allows_the_configured_origin() -> TestResult {
        let resp = preflight(mock_app(MockProductStore::new()), TEST_ORIGIN).await?;
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static(TEST_ORIGIN))
        );
        Ok(())
    }

    #[tokio::test]
    async fn cors_ignores_other_origins() -> TestResult {
        let resp = preflight(mock_app(MockProductStore::new()), "http://evil.example").await?;
        assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());

        let req = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://evil.example")
            .body(Body::empty())?;
        let resp = mock_app(MockProductStore::new()).oneshot(req).await?;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        Ok(())
    }

    #[tokio::test]
    async fn oversized_bodies_are_rejected() -> TestResult {
        let app = mock_app(MockProductStore::new());
        let payload = format!(r#"{{"name":"{}"}}"#, "x".repeat(BODY_LIMIT_BYTES));
        let req = Request::builder()
            .method("POST")
            .uri("/api/products")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CONTENT_LENGTH, payload.len())
            .body(Body::from(payload))?;
        let resp = app.oneshot(req).await?;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        Ok(())
    }

    #[tokio::test]
    async fn chunked_oversized_bodies_are_rejected() -> TestResult {
        let app = mock_app(MockProductStore::new());
        let payload = format!(r#"{{"name":"{}","price":1}}"#, "x".repeat(BODY_LIMIT_BYTES));
        let req = Request::builder()
            .method("POST")
            .uri("/api/products")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::TRANSFER_ENCODING, "chunked")
            .body(Body::from(payload))?;
        let resp = app.oneshot(req).await?;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        Ok(())
    }

    #[tokio::test]
    async fn swagger_ui_is_served_under_docs() -> TestResult {
        let app = mock_app(MockProductStore::new());

        let req = Request::builder().uri("/docs").body(Body::empty())?;
        let resp = app.clone().oneshot(req).await?;
        assert!(resp.status().is_redirection());
        assert_eq!(
            resp.headers().get(header::LOCATION),
            Some(&HeaderValue::from_static("/docs/"))
        );

        let req = Request::builder().uri("/docs/").body(Body::empty())?;
        let resp = app.oneshot(req).await?;
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("text/html"), "content type {content_type}");
        Ok(())
    }

    #[tokio::test]
    async fn docs_are_served() -> TestResult {
        let (status, body) = send(mock_app(MockProductStore::new()), "GET", "/docs/openapi.json", None).await?;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/products/{id}"].is_object());
        Ok(())
    }
}
