mod cart;
mod compare;
mod newsletter;
mod products;
mod webhooks;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use transom_catalog::{normalize_product, CatalogError, StorefrontClient};
use transom_core::{AppConfig, Product, SpecCategory};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId, WebhookVerifier};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub client: Arc<StorefrontClient>,
    pub taxonomy: Arc<Vec<SpecCategory>>,
    pub webhook: WebhookVerifier,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    version: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "upstream_unavailable" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn normalize_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(50).clamp(1, 200)
}

pub(super) fn map_backend_error(request_id: String, error: &CatalogError) -> ApiError {
    tracing::error!(error = %error, "commerce backend request failed");
    ApiError::new(
        request_id,
        "upstream_unavailable",
        "commerce backend request failed",
    )
}

/// Fetches the full catalog from the backend and normalizes it to published
/// domain products. Products the normalizer rejects are skipped with a
/// warning rather than failing the whole listing.
pub(super) async fn fetch_catalog(
    state: &AppState,
    request_id: &str,
) -> Result<Vec<Product>, ApiError> {
    let raw = state
        .client
        .fetch_all_products(state.config.page_size, state.config.inter_request_delay_ms)
        .await
        .map_err(|e| map_backend_error(request_id.to_owned(), &e))?;

    let mut products = Vec::with_capacity(raw.len());
    for backend in raw {
        match normalize_product(backend) {
            Ok(product) => {
                if product.published {
                    products.push(product);
                }
            }
            Err(e) => tracing::warn!(error = %e, "skipping unnormalizable product"),
        }
    }
    Ok(products)
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

fn storefront_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/products", get(products::list_products))
        .route("/api/v1/products/{handle}", get(products::get_product))
        .route(
            "/api/v1/products/{handle}/inventory",
            get(products::get_inventory),
        )
        .route("/api/v1/compare", post(compare::compare_products))
        .route("/api/v1/cart", post(cart::create_cart))
        .route("/api/v1/newsletter", post(newsletter::subscribe))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        )))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    // The webhook route sits outside the rate limiter: deliveries come from
    // the backend, which retries on non-2xx, and its own HMAC check gates it.
    let public_routes = Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/webhooks/orders", post(webhooks::order_created));

    Router::new()
        .merge(public_routes)
        .merge(storefront_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData {
                status: "ok",
                version: env!("CARGO_PKG_VERSION"),
            },
            meta: ResponseMeta::new(req_id.0),
        }),
    )
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}

#[cfg(test)]
pub(crate) fn test_state(backend_url: &str, webhook: WebhookVerifier) -> AppState {
    let config = AppConfig {
        env: transom_core::Environment::Test,
        bind_addr: std::net::SocketAddr::from(([127, 0, 0, 1], 0)),
        log_level: "info".to_owned(),
        backend_url: backend_url.to_owned(),
        backend_token: None,
        webhook_secret: None,
        taxonomy_path: None,
        http_timeout_secs: 5,
        user_agent: "transom-tests".to_owned(),
        page_size: 250,
        max_retries: 0,
        retry_backoff_base_secs: 0,
        inter_request_delay_ms: 0,
    };
    let client = StorefrontClient::from_config(&config).expect("test client");
    AppState {
        config: Arc::new(config),
        client: Arc::new(client),
        taxonomy: Arc::new(transom_core::default_taxonomy()),
        webhook,
    }
}
