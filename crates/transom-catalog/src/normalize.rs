//! Normalization from backend wire types to [`transom_core::Product`].
//!
//! Horsepower backfill from titles is delegated to [`crate::parse`]; this
//! module focuses on structural conversion from the backend API shapes.
//! The free-form `specs` map is deliberately passed through untouched:
//! key-spelling inconsistencies are absorbed at read time by the comparison
//! layer, not rewritten at ingestion.

use transom_core::{Product, Variant};

use crate::error::CatalogError;
use crate::parse::parse_horsepower;
use crate::types::{BackendProduct, BackendVariant};

/// Normalizes a raw [`BackendProduct`] into a domain [`Product`].
///
/// # Errors
///
/// Returns [`CatalogError::Normalization`] if the product has no variants.
pub fn normalize_product(product: BackendProduct) -> Result<Product, CatalogError> {
    if product.variants.is_empty() {
        return Err(CatalogError::Normalization {
            source_product_id: product.id.to_string(),
            reason: "product has no variants".into(),
        });
    }

    let id = product.id.to_string();

    // Empty strings from old import batches are treated as absent.
    let brand = product.brand.filter(|s| !s.is_empty());
    let product_type = product.product_type.filter(|s| !s.is_empty());
    let condition = product.condition.filter(|s| !s.is_empty());
    let shaft_length = product.shaft_length.filter(|s| !s.is_empty());
    let power_category = product.power_category.filter(|s| !s.is_empty());
    let image_url = product.image_url.filter(|s| !s.is_empty());

    // Zero is a known placeholder for "unknown" on bulk imports; treat it as
    // absent and backfill from the title where possible.
    let horsepower = product
        .horsepower
        .filter(|hp| *hp > 0.0)
        .or_else(|| parse_horsepower(&product.title));

    let variants = product
        .variants
        .into_iter()
        .map(|variant| normalize_variant(variant, &id))
        .collect();

    Ok(Product {
        id,
        handle: product.handle,
        title: product.title,
        brand,
        product_type,
        condition,
        horsepower,
        weight_lbs: product.weight_lbs,
        shaft_length,
        power_category,
        image_url,
        published: product.published,
        tags: product.tags,
        specs: product.specs.into_iter().collect(),
        variants,
    })
}

/// Normalizes a raw [`BackendVariant`] into a domain [`Variant`].
///
/// Nothing here is fatal: a variant with no parseable price is kept with
/// `price: None` so the display layer can fall through its lookup chain.
fn normalize_variant(variant: BackendVariant, source_product_id: &str) -> Variant {
    let price = parse_price(variant.price, "price", variant.id, source_product_id);
    let compare_at_price = parse_price(
        variant.compare_at_price,
        "compareAtPrice",
        variant.id,
        source_product_id,
    );

    Variant {
        id: variant.id.to_string(),
        title: variant.title,
        sku: variant.sku.filter(|s| !s.is_empty()),
        price,
        compare_at_price,
        weight: variant.weight,
        weight_unit: variant.weight_unit.filter(|s| !s.is_empty()),
        option1_name: variant.option1_name.filter(|s| !s.is_empty()),
        option1_value: variant.option1_value.filter(|s| !s.is_empty()),
        available: variant.available,
        position: variant.position,
    }
}

/// Parses a wire price string into a `Decimal`, tolerating absence.
///
/// Unparseable values are dropped to `None` with a warning rather than
/// failing the whole product: price display falls back to empty downstream.
fn parse_price(
    raw: Option<String>,
    field: &str,
    variant_id: i64,
    source_product_id: &str,
) -> Option<rust_decimal::Decimal> {
    let raw = raw.filter(|s| !s.is_empty())?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(
                product_id = source_product_id,
                variant_id,
                field,
                raw,
                "unparseable price string, treating as absent"
            );
            None
        }
    }
}
