//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use catalog_app::ports::ProductRepository;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api` and exposes a `/health` probe.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<R>(state: AppState<R>) -> Router
where
    R: ProductRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use crate::test_support::{InMemoryRepo, app, send};
    use axum::http::StatusCode;
    use serde_json::Value;

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let (status, body) = send(&app(InMemoryRepo::default()), "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String("OK".to_string()));
    }

    #[tokio::test]
    async fn should_serve_collection_with_trailing_slash() {
        let (status, body) = send(&app(InMemoryRepo::default()), "GET", "/api/products/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"data": []}));
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_route() {
        let (status, _) = send(&app(InMemoryRepo::default()), "GET", "/api/unknown", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_reject_unsupported_method_on_collection() {
        let (status, _) = send(&app(InMemoryRepo::default()), "DELETE", "/api/products", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
