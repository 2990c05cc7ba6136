pub mod response;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::compression::CompressionLayer;

use crate::config::Config;
use crate::features::{self, FeatureState};
use crate::middleware;
use response::ErrorResponse;

/// Build the application router with every middleware applied
///
/// From the outside in: CORS, tracing, compression, request timeout and
/// panic recovery.
pub fn create_router(state: FeatureState, config: &Config) -> Router {
    let api_v1 = features::router(state.clone());

    Router::new()
        .route("/", get(root))
        .route("/health", get(health).with_state(state))
        .nest("/api/v1", api_v1)
        .layer(middleware::catch_panic_layer())
        .layer(middleware::timeout_layer(config.server.request_timeout_secs))
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Mahlzeit",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn health(State(state): State<FeatureState>) -> Response {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            let error = ErrorResponse::new("UNAVAILABLE", "Database unreachable");
            (StatusCode::SERVICE_UNAVAILABLE, Json(error)).into_response()
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{pancakes, send_json, InMemoryStore};
    use axum::http::Method;

    fn app(store: std::sync::Arc<InMemoryStore>) -> Router {
        create_router(FeatureState::new(store), &Config::default())
    }

    #[tokio::test]
    async fn test_root() {
        let (status, body) = send_json(app(InMemoryStore::new()), Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "running");
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) =
            send_json(app(InMemoryStore::new()), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_health_reports_database_failure() {
        let store = InMemoryStore::new();
        store.fail_all();

        let (status, body) = send_json(app(store), Method::GET, "/health", None).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_api_is_nested_under_v1() {
        let store = InMemoryStore::new();
        let p = pancakes(&store);

        let (status, body) = send_json(
            app(store),
            Method::GET,
            &format!("/api/v1/recipes/{}?servings=2", p.recipe_id),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["servings"], 2);
    }

    #[tokio::test]
    async fn test_rescaling_zero_base_servings_is_a_500() {
        let store = InMemoryStore::new();
        let id = store.insert_recipe("Broken", 0);

        let (status, body) = send_json(
            app(store.clone()),
            Method::GET,
            &format!("/api/v1/recipes/{id}?servings=2"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");

        let (status, _) =
            send_json(app(store), Method::GET, &format!("/api/v1/recipes/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
