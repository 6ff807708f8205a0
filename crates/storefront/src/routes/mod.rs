//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                              - Liveness check
//! GET  /health/ready                        - Readiness check (database)
//!
//! # Catalog API (JSON)
//! GET  /api/products                        - Filtered, sorted, paginated listing
//! GET  /api/products/{id}                   - Product detail
//! GET  /api/products/{id}/recommendations   - Related products
//! GET  /api/products/{id}/reviews           - Recent reviews and average
//! GET  /api/filters                         - Filter panel options
//! ```

pub mod filters;
pub mod health;
pub mod products;

use axum::{Router, body::Body, http::Request, middleware::from_fn, routing::get};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the health routes router.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::health))
        .route("/ready", get(health::readiness))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route("/{id}/recommendations", get(products::recommendations))
        .route("/{id}/reviews", get(products::reviews))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/health", health_routes())
        .nest("/api/products", product_routes())
        .route("/api/filters", get(filters::index))
}

/// Build the application with request tracing and request IDs.
///
/// Sentry layers are added by the binary, outside of this.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{SentryConfig, StorefrontConfig};
    use crate::middleware::REQUEST_ID_HEADER;

    // Nothing listens on port 1, so any query fails fast.
    const UNREACHABLE_DB: &str = "postgres://stride@127.0.0.1:1/stride";

    fn test_app() -> Router {
        let config = StorefrontConfig {
            database_url: SecretString::from(UNREACHABLE_DB),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            db_max_connections: 1,
            sentry: SentryConfig::default(),
        };
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_millis(500))
            .connect_lazy(UNREACHABLE_DB)
            .unwrap();
        app(AppState::new(config, pool))
    }

    async fn fetch(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = fetch(test_app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_readiness_without_database() {
        let (status, _) = fetch(test_app(), "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_request_id_generated_and_echoed() {
        let response = test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));

        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(REQUEST_ID_HEADER, "edge-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "edge-42");
    }

    #[tokio::test]
    async fn test_non_uuid_product_is_not_found() {
        let (status, _) = fetch(test_app(), "/api/products/air-max-90").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_uuid_recommendations_are_empty() {
        let (status, body) = fetch(test_app(), "/api/products/air-max-90/recommendations").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "[]");
    }

    #[tokio::test]
    async fn test_non_uuid_reviews_are_empty() {
        let (status, body) = fetch(test_app(), "/api/products/air-max-90/reviews").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["recentCount"], 0);
        assert!(json["recentAverage"].is_null());
        assert_eq!(json["reviews"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_database_failure_is_generic_500() {
        let (status, body) = fetch(test_app(), "/api/filters").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Internal server error");
    }
}
