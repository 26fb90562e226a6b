//! Inventory filtering and sorting over the in-memory product list.
//!
//! The catalog is small (a dealership carries hundreds of listings, not
//! millions), so filtering is a linear predicate chain per product and
//! sorting is an ordinary stable sort. No indexes.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use transom_core::Product;

/// Conjunctive filter over the product list. Unset fields match everything.
///
/// String matches are case-insensitive. Products missing a field that a
/// bound requires (e.g., no horsepower when `min_hp` is set) do not match:
/// a listing cannot prove it is in range.
#[derive(Debug, Clone, Default)]
pub struct InventoryFilter {
    pub brand: Option<String>,
    pub condition: Option<String>,
    pub product_type: Option<String>,
    pub power_category: Option<String>,
    pub min_hp: Option<f64>,
    pub max_hp: Option<f64>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub in_stock_only: bool,
}

impl InventoryFilter {
    /// Linear predicate chain; the first failing predicate wins.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(brand) = &self.brand {
            if !field_matches(product.brand.as_deref(), brand) {
                return false;
            }
        }
        if let Some(condition) = &self.condition {
            if !field_matches(product.condition.as_deref(), condition) {
                return false;
            }
        }
        if let Some(product_type) = &self.product_type {
            if !field_matches(product.product_type.as_deref(), product_type) {
                return false;
            }
        }
        if let Some(power_category) = &self.power_category {
            if !field_matches(product.power_category.as_deref(), power_category) {
                return false;
            }
        }
        if let Some(min_hp) = self.min_hp {
            if !product.horsepower.is_some_and(|hp| hp >= min_hp) {
                return false;
            }
        }
        if let Some(max_hp) = self.max_hp {
            if !product.horsepower.is_some_and(|hp| hp <= max_hp) {
                return false;
            }
        }
        if let Some(min_price) = self.min_price {
            if !product.primary_price().is_some_and(|p| p >= min_price) {
                return false;
            }
        }
        if let Some(max_price) = self.max_price {
            if !product.primary_price().is_some_and(|p| p <= max_price) {
                return false;
            }
        }
        if self.in_stock_only && !product.has_available_variants() {
            return false;
        }
        true
    }
}

fn field_matches(field: Option<&str>, wanted: &str) -> bool {
    field.is_some_and(|value| value.eq_ignore_ascii_case(wanted))
}

/// Sort order for filtered listings.
///
/// All sorts are stable; products lacking the sort key order last
/// regardless of direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventorySort {
    PriceAsc,
    PriceDesc,
    HorsepowerAsc,
    HorsepowerDesc,
    TitleAsc,
}

impl InventorySort {
    /// Parses the storefront query-string form (`"price_asc"`, `"hp_desc"`,
    /// `"title"`). Returns `None` for unknown values.
    #[must_use]
    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "price_asc" => Some(Self::PriceAsc),
            "price_desc" => Some(Self::PriceDesc),
            "hp_asc" => Some(Self::HorsepowerAsc),
            "hp_desc" => Some(Self::HorsepowerDesc),
            "title" => Some(Self::TitleAsc),
            _ => None,
        }
    }

    /// Stable-sorts the given references in place.
    pub fn apply(self, products: &mut [&Product]) {
        match self {
            Self::PriceAsc => {
                products.sort_by(|a, b| cmp_keyed(a.primary_price(), b.primary_price(), false));
            }
            Self::PriceDesc => {
                products.sort_by(|a, b| cmp_keyed(a.primary_price(), b.primary_price(), true));
            }
            Self::HorsepowerAsc => {
                products.sort_by(|a, b| cmp_float_keyed(a.horsepower, b.horsepower, false));
            }
            Self::HorsepowerDesc => {
                products.sort_by(|a, b| cmp_float_keyed(a.horsepower, b.horsepower, true));
            }
            Self::TitleAsc => {
                products.sort_by(|a, b| a.title.cmp(&b.title));
            }
        }
    }
}

/// Compares optional sort keys: present keys order by value (reversed when
/// `descending`), absent keys always sink to the end.
fn cmp_keyed<T: Ord>(a: Option<T>, b: Option<T>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => {
            if descending {
                y.cmp(&x)
            } else {
                x.cmp(&y)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// `f64` variant of [`cmp_keyed`]; NaN compares as equal, which keeps the
/// sort stable instead of panicking.
fn cmp_float_keyed(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => {
            let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Filters and optionally sorts the product list, returning references in
/// final display order.
#[must_use]
pub fn filter_and_sort<'a>(
    products: &'a [Product],
    filter: &InventoryFilter,
    sort: Option<InventorySort>,
) -> Vec<&'a Product> {
    let mut matched: Vec<&Product> = products.iter().filter(|p| filter.matches(p)).collect();
    if let Some(sort) = sort {
        sort.apply(&mut matched);
    }
    matched
}
