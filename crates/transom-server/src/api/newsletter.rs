use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use transom_catalog::SubscriptionAck;

use crate::middleware::RequestId;

use super::{map_backend_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct SubscribeRequest {
    pub email: String,
}

/// POST /api/v1/newsletter — forward a subscription to the backend's list.
///
/// Shape validation only; the backend owns real address verification.
pub(super) async fn subscribe(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SubscribeRequest>,
) -> Result<Json<ApiResponse<SubscriptionAck>>, ApiError> {
    let email = body.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::new(
            &req_id.0,
            "validation_error",
            "a valid email address is required",
        ));
    }

    let ack = state
        .client
        .subscribe_newsletter(email)
        .await
        .map_err(|e| map_backend_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: ack,
        meta: ResponseMeta::new(req_id.0),
    }))
}
