//! Stand-in commerce API.
//!
//! Serves the handful of endpoints the storefront touches while the Medusa
//! backend is not reachable. Handlers are stateless apart from the shared
//! storefront data source.
//!
//! | Route                            | Response |
//! |----------------------------------|----------|
//! | `GET /health`                    | `{status, timestamp}` |
//! | `GET /key-exchange`              | `{success, message}` |
//! | `GET /api`                       | endpoint index |
//! | `GET /store/publishable-api-keys`| one fabricated key |
//! | `GET /admin/products`            | `{success, products}` |
//! | anything else                    | 404 `{message, path}` |

use crate::core::prefetch::StubStorefront;
use crate::domain::model::PublishableApiKey;
use crate::domain::ports::StorefrontData;
use crate::utils::error::Result;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, MethodRouter};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const NOT_IMPLEMENTED_MESSAGE: &str = "Endpoint not implemented yet";

#[derive(Clone)]
pub struct AppState {
    pub data: Arc<dyn StorefrontData>,
}

impl AppState {
    pub fn new(data: Arc<dyn StorefrontData>) -> Self {
        Self { data }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(StubStorefront))
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EndpointInfo {
    pub path: &'static str,
    pub method: &'static str,
    pub description: &'static str,
}

pub const ENDPOINTS: [EndpointInfo; 5] = [
    EndpointInfo {
        path: "/health",
        method: "GET",
        description: "Health check endpoint",
    },
    EndpointInfo {
        path: "/key-exchange",
        method: "GET",
        description: "Endpoint for storefront to verify backend connectivity",
    },
    EndpointInfo {
        path: "/api",
        method: "GET",
        description: "Lists the endpoints served by this stand-in",
    },
    EndpointInfo {
        path: "/store/publishable-api-keys",
        method: "GET",
        description: "Publishable key for the storefront",
    },
    EndpointInfo {
        path: "/admin/products",
        method: "GET",
        description: "Product listing placeholder",
    },
];

#[derive(Serialize)]
struct PublishableKeyList {
    publishable_api_keys: Vec<PublishableApiKey>,
}

/// Wrong methods on known paths fall through to the same 404 as unknown paths.
fn stand_in<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: axum::handler::Handler<T, AppState>,
    T: 'static,
{
    get(handler).fallback(not_implemented)
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", stand_in(health))
        .route("/key-exchange", stand_in(key_exchange))
        .route("/api", stand_in(api_index))
        .route("/store/publishable-api-keys", stand_in(publishable_api_keys))
        .route("/admin/products", stand_in(admin_products))
        .fallback(not_implemented)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

async fn key_exchange() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "message": "API is running",
    }))
}

async fn api_index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Medusa API is coming soon",
        "endpoints": ENDPOINTS,
    }))
}

async fn publishable_api_keys() -> Json<PublishableKeyList> {
    Json(PublishableKeyList {
        publishable_api_keys: vec![PublishableApiKey::stand_in(Utc::now())],
    })
}

async fn admin_products(State(state): State<AppState>) -> Response {
    match state.data.prefetch_products().await {
        Ok(page) => Json(serde_json::json!({
            "success": true,
            "products": page.products,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!("Product source failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({
                    "success": false,
                    "message": e.user_friendly_message(),
                })),
            )
                .into_response()
        }
    }
}

async fn not_implemented(method: Method, uri: Uri) -> Response {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    tracing::warn!("Unhandled request: {} {}", method, path);

    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "message": NOT_IMPLEMENTED_MESSAGE,
            "path": path,
        })),
    )
        .into_response()
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server is running on {}", listener.local_addr()?);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
