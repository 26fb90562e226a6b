use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use transom_compare::{build_table, ComparisonTable, SelectionSlots, SLOT_COUNT};

use crate::middleware::RequestId;

use super::{fetch_catalog, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct CompareRequest {
    pub handles: Vec<String>,
}

pub(super) async fn compare_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<CompareRequest>,
) -> Result<Json<ApiResponse<ComparisonTable>>, ApiError> {
    let rid = &req_id.0;

    if body.handles.is_empty() {
        return Err(ApiError::new(
            rid,
            "validation_error",
            "handles must name at least one product",
        ));
    }
    if body.handles.len() > SLOT_COUNT {
        return Err(ApiError::new(
            rid,
            "validation_error",
            format!("at most {SLOT_COUNT} products can be compared"),
        ));
    }
    for (i, handle) in body.handles.iter().enumerate() {
        if body.handles[..i].contains(handle) {
            return Err(ApiError::new(
                rid,
                "validation_error",
                format!("duplicate handle '{handle}'"),
            ));
        }
    }

    let products = fetch_catalog(&state, rid).await?;

    let mut slots = SelectionSlots::new();
    for (index, handle) in body.handles.iter().enumerate() {
        let product = products
            .iter()
            .find(|p| &p.handle == handle)
            .ok_or_else(|| {
                ApiError::new(
                    rid.clone(),
                    "not_found",
                    format!("no product with handle '{handle}'"),
                )
            })?;
        slots.set_slot(index, Some(product.clone()));
    }

    Ok(Json(ApiResponse {
        data: build_table(&slots, &state.taxonomy),
        meta: ResponseMeta::new(req_id.0),
    }))
}
