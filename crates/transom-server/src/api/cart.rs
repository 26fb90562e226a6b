use axum::{extract::State, http::StatusCode, Extension, Json};
use transom_catalog::{CheckoutCreated, CheckoutRequest};

use crate::middleware::RequestId;

use super::{map_backend_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// POST /api/v1/cart — create a checkout on the commerce backend.
///
/// Pure proxy: nothing is persisted here, and the call is not retried
/// (checkout creation is not idempotent).
pub(super) async fn create_cart(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CheckoutCreated>>), ApiError> {
    let rid = &req_id.0;

    if body.items.is_empty() {
        return Err(ApiError::new(
            rid,
            "validation_error",
            "cart must contain at least one item",
        ));
    }
    for item in &body.items {
        if item.variant_id.trim().is_empty() {
            return Err(ApiError::new(
                rid,
                "validation_error",
                "every cart item needs a variant id",
            ));
        }
        if item.quantity == 0 {
            return Err(ApiError::new(
                rid,
                "validation_error",
                format!("quantity for variant {} must be at least 1", item.variant_id),
            ));
        }
    }

    let checkout = state
        .client
        .create_checkout(&body)
        .await
        .map_err(|e| map_backend_error(req_id.0.clone(), &e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: checkout,
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}
