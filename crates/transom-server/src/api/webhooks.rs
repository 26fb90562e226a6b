use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    Extension,
};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

const SIGNATURE_HEADER: &str = "x-transom-hmac-sha256";

/// The slice of the backend's order payload this service reads; everything
/// else in the delivery is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderCreated {
    id: i64,
    #[serde(default)]
    order_number: Option<i64>,
    #[serde(default)]
    total_price: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// POST /api/v1/webhooks/orders — order-created deliveries from the backend.
///
/// The signature is HMAC-SHA256 over the raw body, base64-encoded in the
/// `X-Transom-Hmac-Sha256` header. Verification runs before the body is
/// parsed; an unverifiable delivery is rejected without reading it.
pub(super) async fn order_created(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let signature = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());

    if !state.webhook.verify(&body, signature) {
        tracing::warn!(request_id = %req_id.0, "rejected order webhook with bad signature");
        return Err(ApiError::new(
            req_id.0,
            "unauthorized",
            "missing or invalid webhook signature",
        ));
    }

    match serde_json::from_slice::<OrderCreated>(&body) {
        Ok(order) => {
            // Do not log the address itself; only whether one was attached.
            tracing::info!(
                order_id = order.id,
                order_number = ?order.order_number,
                total_price = ?order.total_price,
                email_present = order.email.is_some(),
                "order created"
            );
        }
        Err(e) => {
            // The signature already proved origin. Accept the delivery so
            // the backend does not redeliver forever, but record the shape
            // mismatch.
            tracing::warn!(error = %e, "order webhook payload did not parse");
        }
    }

    Ok(StatusCode::NO_CONTENT)
}
