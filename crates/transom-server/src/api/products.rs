use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use transom_catalog::{
    filter_and_sort, CatalogError, InventoryFilter, InventoryLevel, InventorySort,
};
use transom_compare::resolve_spec;
use transom_core::Product;

use crate::middleware::RequestId;

use super::{
    fetch_catalog, map_backend_error, normalize_limit, ApiError, ApiResponse, AppState,
    ResponseMeta,
};

#[derive(Debug, Serialize)]
pub(super) struct ProductSummary {
    id: String,
    handle: String,
    title: String,
    brand: Option<String>,
    product_type: Option<String>,
    condition: Option<String>,
    horsepower: Option<f64>,
    power_category: Option<String>,
    price: Option<Decimal>,
    available: bool,
    image_url: Option<String>,
    variant_count: usize,
}

impl ProductSummary {
    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            handle: product.handle.clone(),
            title: product.title.clone(),
            brand: product.brand.clone(),
            product_type: product.product_type.clone(),
            condition: product.condition.clone(),
            horsepower: product.horsepower,
            power_category: product.power_category.clone(),
            price: product.primary_price(),
            available: product.has_available_variants(),
            image_url: product.image_url.clone(),
            variant_count: product.variant_count(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ResolvedSpec {
    name: String,
    value: String,
}

#[derive(Debug, Serialize)]
pub(super) struct SpecGroup {
    title: String,
    specs: Vec<ResolvedSpec>,
}

#[derive(Debug, Serialize)]
pub(super) struct ProductDetail {
    product: Product,
    spec_groups: Vec<SpecGroup>,
}

/// `category` filters on `product_type`; the parts catalog is served by the
/// same route with `category=Parts`.
#[derive(Debug, Deserialize)]
pub(super) struct ProductsQuery {
    pub brand: Option<String>,
    pub condition: Option<String>,
    pub category: Option<String>,
    pub power_category: Option<String>,
    pub min_hp: Option<f64>,
    pub max_hp: Option<f64>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub in_stock: Option<bool>,
    pub sort: Option<String>,
    pub limit: Option<usize>,
}

pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<ApiResponse<Vec<ProductSummary>>>, ApiError> {
    // Validate the sort before touching the backend; a bad query should not
    // cost a catalog fetch.
    let sort = match query.sort.as_deref() {
        Some(raw) => Some(InventorySort::from_query(raw).ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "validation_error",
                format!(
                    "unknown sort '{raw}'; expected one of price_asc, price_desc, hp_asc, hp_desc, title"
                ),
            )
        })?),
        None => None,
    };
    let limit = normalize_limit(query.limit);

    let products = fetch_catalog(&state, &req_id.0).await?;

    let filter = InventoryFilter {
        brand: query.brand,
        condition: query.condition,
        product_type: query.category,
        power_category: query.power_category,
        min_hp: query.min_hp,
        max_hp: query.max_hp,
        min_price: query.min_price,
        max_price: query.max_price,
        in_stock_only: query.in_stock.unwrap_or(false),
    };

    let data = filter_and_sort(&products, &filter, sort)
        .into_iter()
        .take(limit)
        .map(ProductSummary::from_product)
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
) -> Result<Json<ApiResponse<ProductDetail>>, ApiError> {
    let products = fetch_catalog(&state, &req_id.0).await?;
    let product = products
        .into_iter()
        .find(|p| p.handle == handle)
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "not_found",
                format!("no product with handle '{handle}'"),
            )
        })?;

    let spec_groups = state
        .taxonomy
        .iter()
        .map(|category| SpecGroup {
            title: category.title.clone(),
            specs: category
                .specs
                .iter()
                .map(|name| ResolvedSpec {
                    name: name.clone(),
                    value: resolve_spec(&product, name),
                })
                .collect(),
        })
        .collect();

    Ok(Json(ApiResponse {
        data: ProductDetail {
            product,
            spec_groups,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_inventory(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
) -> Result<Json<ApiResponse<Vec<InventoryLevel>>>, ApiError> {
    let levels = state
        .client
        .inventory_levels(&handle)
        .await
        .map_err(|e| match e {
            CatalogError::NotFound { .. } => ApiError::new(
                req_id.0.clone(),
                "not_found",
                format!("no inventory for handle '{handle}'"),
            ),
            other => map_backend_error(req_id.0.clone(), &other),
        })?;

    Ok(Json(ApiResponse {
        data: levels,
        meta: ResponseMeta::new(req_id.0),
    }))
}
