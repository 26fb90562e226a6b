use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product from the commerce backend, normalized for display and
/// comparison across listings.
///
/// Flat fields come from the backend's per-product columns and are
/// denormalized per import batch; the free-form [`SpecMap`] carries whatever
/// additional specification rows the importer attached, with uneven key
/// casing and delimiter conventions. The specs map is intentionally kept
/// as-imported — read-side lookup absorbs the inconsistency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Backend numeric product ID, stored as a string to avoid precision loss.
    pub id: String,
    /// URL slug for the product page (e.g., `"tohatsu-mfs25c-efi"`).
    pub handle: String,
    /// Display name (e.g., `"Tohatsu MFS25C 25hp EFI"`).
    pub title: String,
    /// Manufacturer (e.g., `"Tohatsu"`, `"Suzuki"`).
    pub brand: Option<String>,
    /// Backend category string (e.g., `"Outboard Motor"`, `"Propeller"`).
    pub product_type: Option<String>,
    /// `"new"` or `"used"`. Absent on older import batches; display defaults
    /// to new.
    pub condition: Option<String>,
    /// Rated horsepower. Fractional for small motors (2.5, 9.9).
    pub horsepower: Option<f64>,
    /// Dry weight in pounds from the flat column, when the importer set it.
    pub weight_lbs: Option<f64>,
    /// Shaft length as a display string (e.g., `"20\" Long"`).
    pub shaft_length: Option<String>,
    /// Hyphen-delimited merchandising band (e.g., `"high-performance"`).
    pub power_category: Option<String>,
    /// Whether the product is visible on the storefront.
    pub published: bool,
    pub tags: Vec<String>,
    /// Primary image CDN URL.
    pub image_url: Option<String>,
    /// Free-form specification rows, keys preserved exactly as imported.
    pub specs: SpecMap,
    /// Purchasable configurations in storefront order; index 0 is the
    /// primary configuration used for display price and weight.
    pub variants: Vec<Variant>,
}

impl Product {
    /// Returns the storefront-primary variant (first by order), if any.
    #[must_use]
    pub fn primary_variant(&self) -> Option<&Variant> {
        self.variants.first()
    }

    /// Returns the primary variant's price, if set.
    #[must_use]
    pub fn primary_price(&self) -> Option<Decimal> {
        self.primary_variant().and_then(|v| v.price)
    }

    /// Returns `true` if at least one variant is currently purchasable.
    #[must_use]
    pub fn has_available_variants(&self) -> bool {
        self.variants.iter().any(|v| v.available)
    }

    /// Returns the total number of variants for this product.
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }
}

/// A single purchasable configuration of a [`Product`], e.g. a specific
/// shaft length and starter option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    /// Backend numeric variant ID, stored as a string to avoid precision loss.
    pub id: String,
    pub sku: Option<String>,
    /// Variant display title (e.g., `"20\" Shaft / Electric Start"`).
    pub title: String,
    /// Current price. `None` when the backend price string failed to parse;
    /// display layers render an absent price as empty.
    pub price: Option<Decimal>,
    /// Pre-sale comparison price, if the variant is on sale.
    pub compare_at_price: Option<Decimal>,
    /// Variant-specific dry weight, when the importer set it.
    pub weight: Option<f64>,
    /// Unit for `weight` (display defaults to `"lbs"` when absent).
    pub weight_unit: Option<String>,
    /// First option axis name (e.g., `"Shaft Length"`). Importers are not
    /// consistent about which axis lands here.
    pub option1_name: Option<String>,
    /// First option axis value (e.g., `"20\" Long"`).
    pub option1_value: Option<String>,
    /// Whether this variant is currently in stock and purchasable.
    pub available: bool,
    /// 1-based position; `1` is the storefront default.
    pub position: Option<i32>,
}

/// Free-form specification mapping: spec-name string to display value.
///
/// Keys arrive with inconsistent casing and delimiters across import batches
/// (`"Shaft Length"`, `"shaft_length"`, `"Physical.shaft_length"`, ...), so
/// lookups are exact-key; callers chain candidate spellings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecMap(BTreeMap<String, String>);

impl SpecMap {
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Exact-key lookup. No case folding or delimiter normalization happens
    /// here; fallback chains live with the reader.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for SpecMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
