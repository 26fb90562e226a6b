//! Wire types for the commerce backend's storefront JSON API.
//!
//! ## Observed shape from the live backend
//!
//! ### `specs`
//! A flat string-to-string object. Key casing and delimiters are inconsistent
//! across import batches: the same attribute appears as `"Shaft Length"`,
//! `"shaft_length"`, or `"custom.shaft_length"` depending on which CSV feed
//! created the product. The map is passed through untouched; resolution
//! happens at read time in `transom-compare`.
//!
//! ### Prices
//! Decimal strings (e.g., `"4299.00"`), never floats. `compareAtPrice` is
//! explicitly `null` when the motor is not on promotion. Some legacy listings
//! omit `price` entirely on non-purchasable variants.
//!
//! ### `condition`
//! `"new"`, `"used"`, or an empty string on older imports. Empty strings are
//! normalized to absent; the comparison layer defaults the display to "New".
//!
//! ### `horsepower`
//! Numeric where present. A few bulk imports carry `0` as a placeholder for
//! "unknown", so zero is treated the same as absent downstream. Portable
//! models use fractional ratings (`2.5`, `9.9`).
//!
//! ### `published`
//! Absent on a handful of archived listings; defaults to `true` since the
//! storefront endpoint only serves live products in practice.
//!
//! ### `available` on variants
//! Boolean; defaults to `true` when missing (optimistic assumption, matching
//! the backend's own storefront rendering).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level response from `GET /api/products.json`.
#[derive(Debug, Deserialize)]
pub struct BackendProductsResponse {
    pub products: Vec<BackendProduct>,
}

/// A single product listing from the backend catalog.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendProduct {
    /// Backend numeric product ID (e.g., `7012345678901`).
    pub id: i64,

    /// Display name (e.g., `"Tohatsu MFS25C 25hp EFI Outboard"`).
    pub title: String,

    /// URL slug for the product page.
    pub handle: String,

    /// Manufacturer name. May be empty string on old imports.
    #[serde(default)]
    pub brand: Option<String>,

    /// Category string (`"Outboard Motors"`, `"Parts & Accessories"`).
    /// Empty string is normalized to absent.
    #[serde(default)]
    pub product_type: Option<String>,

    /// `"new"` / `"used"`; empty string normalized to absent.
    #[serde(default)]
    pub condition: Option<String>,

    /// Rated horsepower. `0` is a placeholder for unknown on some imports.
    #[serde(default)]
    pub horsepower: Option<f64>,

    /// Dry weight in pounds, when the import carried it as a flat field.
    #[serde(default)]
    pub weight_lbs: Option<f64>,

    /// Shaft length designation (`"20\" Long"`, `"15\" Short"`).
    #[serde(default)]
    pub shaft_length: Option<String>,

    /// Merchandising tier, hyphen-delimited (`"high-performance"`).
    #[serde(default)]
    pub power_category: Option<String>,

    /// Whether the listing is live. Defaults to `true` when absent.
    #[serde(default = "default_published")]
    pub published: bool,

    /// Tags as a JSON array of strings. Empty array when untagged.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Primary image CDN URL.
    #[serde(default)]
    pub image_url: Option<String>,

    /// Free-form spec sheet. Keys are inconsistent across import batches;
    /// passed through without normalization.
    #[serde(default)]
    pub specs: BTreeMap<String, String>,

    /// All purchasable configurations, storefront order. The first entry is
    /// the default configuration.
    pub variants: Vec<BackendVariant>,
}

/// A single purchasable configuration of a [`BackendProduct`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendVariant {
    /// Backend numeric variant ID.
    pub id: i64,

    /// Display title (`"20\" Shaft / Electric Start"`, `"Default Title"`).
    pub title: String,

    /// Stock-keeping unit. Present but may be empty on some listings.
    #[serde(default)]
    pub sku: Option<String>,

    /// Current price as a decimal string (e.g., `"4299.00"`). Absent on a
    /// few legacy non-purchasable variants.
    #[serde(default)]
    pub price: Option<String>,

    /// Pre-promotion price as a decimal string, or `null` when the variant
    /// is not on promotion.
    #[serde(default)]
    pub compare_at_price: Option<String>,

    /// Shipping weight in `weight_unit` units.
    #[serde(default)]
    pub weight: Option<f64>,

    /// Unit for `weight` (`"lbs"`, `"kg"`). Defaults to pounds downstream.
    #[serde(default)]
    pub weight_unit: Option<String>,

    /// Name of the first option axis, when the product has one
    /// (e.g., `"Shaft Length"`).
    #[serde(default)]
    pub option1_name: Option<String>,

    /// Value of the first option axis (e.g., `"20\" Long"`).
    #[serde(default)]
    pub option1_value: Option<String>,

    /// Whether this variant is currently in stock.
    /// Defaults to `true` when absent.
    #[serde(default = "default_available")]
    pub available: bool,

    /// 1-based position; `1` is the storefront-default variant.
    #[serde(default)]
    pub position: Option<i32>,
}

/// Request body for checkout creation, forwarded verbatim to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
}

/// One line item in a checkout-creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    /// Backend variant ID as a string (the backend accepts both forms; we
    /// send strings to avoid precision loss in JavaScript consumers).
    pub variant_id: String,
    pub quantity: u32,
}

/// Response from `POST /api/checkouts.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutCreated {
    /// Backend checkout token.
    pub id: String,

    /// Hosted checkout URL the storefront redirects the buyer to.
    pub web_url: String,

    /// Checkout total as a decimal string, when the backend computed one.
    #[serde(default)]
    pub total_price: Option<String>,
}

/// Response from `POST /api/newsletter/subscriptions.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionAck {
    pub email: String,

    /// `false` when the address was already on the list.
    #[serde(default)]
    pub subscribed: bool,
}

/// Top-level response from `GET /api/inventory.json?handle=...`.
#[derive(Debug, Deserialize)]
pub struct InventoryResponse {
    pub levels: Vec<InventoryLevel>,
}

/// Stock level for one variant at one location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLevel {
    pub variant_id: i64,

    #[serde(default)]
    pub sku: Option<String>,

    /// Units on hand. Negative values mean oversold backorders.
    pub quantity: i64,

    #[serde(default)]
    pub location: Option<String>,
}

/// Default for `BackendProduct::published` when the field is absent.
fn default_published() -> bool {
    true
}

/// Default for `BackendVariant::available` when the field is absent.
fn default_available() -> bool {
    true
}
