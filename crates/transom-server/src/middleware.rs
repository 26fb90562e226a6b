use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use tokio::sync::Mutex;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Order-webhook signature verification settings.
///
/// The commerce backend signs each webhook delivery with HMAC-SHA256 over
/// the raw body, base64-encoded in the signature header.
#[derive(Debug, Clone)]
pub struct WebhookVerifier {
    secret: Option<Arc<String>>,
    pub enabled: bool,
}

impl WebhookVerifier {
    /// Builds verification config from the shared secret.
    ///
    /// In development, a missing secret disables verification for local
    /// iteration. In non-development envs, a missing secret fails startup.
    pub fn from_config(is_development: bool, secret: Option<&str>) -> anyhow::Result<Self> {
        let secret = secret.map(str::trim).filter(|s| !s.is_empty());

        match secret {
            Some(secret) => Ok(Self {
                secret: Some(Arc::new(secret.to_owned())),
                enabled: true,
            }),
            None if is_development => {
                tracing::warn!(
                    "TRANSOM_WEBHOOK_SECRET not set; webhook signature verification disabled in development environment"
                );
                Ok(Self {
                    secret: None,
                    enabled: false,
                })
            }
            None => anyhow::bail!(
                "TRANSOM_WEBHOOK_SECRET is required outside development; provide the backend's webhook signing secret"
            ),
        }
    }

    /// Checks a delivery's base64 signature against the raw body.
    ///
    /// Returns `true` when verification is disabled. The underlying
    /// comparison is constant-time.
    #[must_use]
    pub fn verify(&self, body: &[u8], signature: Option<&str>) -> bool {
        let Some(secret) = &self.secret else {
            return true;
        };
        let Some(signature) = signature else {
            return false;
        };
        let Ok(expected) = BASE64.decode(signature.trim()) else {
            return false;
        };
        let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
            return false;
        };
        mac.update(body);
        mac.verify_slice(&expected).is_ok()
    }
}

#[derive(Debug, Clone)]
struct RateLimitWindow {
    started_at: Instant,
    count: usize,
}

/// Fixed-window limiter for simple storefront protection.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    state: Arc<Mutex<RateLimitWindow>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            state: Arc::new(Mutex::new(RateLimitWindow {
                started_at: Instant::now(),
                count: 0,
            })),
        }
    }
}

#[derive(Debug, Serialize)]
struct RateLimitErrorBody {
    error: RateLimitError,
}

#[derive(Debug, Serialize)]
struct RateLimitError {
    code: &'static str,
    message: &'static str,
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware enforcing a fixed request-per-window limit.
pub async fn enforce_rate_limit(
    State(rate_limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    let mut window = rate_limit.state.lock().await;
    let elapsed = window.started_at.elapsed();

    if elapsed >= rate_limit.window {
        window.started_at = Instant::now();
        window.count = 0;
    }

    if window.count >= rate_limit.max_requests {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(RateLimitErrorBody {
                error: RateLimitError {
                    code: "rate_limited",
                    message: "rate limit exceeded",
                },
            }),
        )
            .into_response();
    }

    window.count += 1;
    drop(window);

    next.run(req).await
}
