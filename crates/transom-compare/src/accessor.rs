//! Per-field spec resolution over heterogeneous product records.
//!
//! Upstream spec data arrives with inconsistent key casing and delimiter
//! conventions across import batches (`"Shaft Length"` vs `"shaft_length"`
//! vs `"custom.shaft_length"`). Rather than normalizing at ingestion, this
//! module absorbs the inconsistency at read time: each canonical spec name
//! maps to an ordered chain of [`Lookup`] strategies, evaluated in sequence,
//! first non-empty result wins. Missing or malformed data is never an
//! error; every miss resolves to an empty string.

use rust_decimal::Decimal;
use transom_core::Product;

/// A single lookup strategy: one way to pull a display value out of a
/// product. Strategies return an empty string on a miss so chains can fall
/// through.
#[derive(Debug, Clone, Copy)]
enum Lookup {
    /// `variants[0].price`, currency-formatted with thousands separators.
    PrimaryPrice,
    /// Flat `horsepower` when > 0, suffixed `HP`. Zero and negative ratings
    /// mean "unknown", not "zero horsepower".
    RatedHorsepower,
    /// Flat `brand`.
    Brand,
    /// Product `title`.
    Title,
    /// `variants[0].sku`.
    PrimarySku,
    /// Flat `product_type`.
    ProductType,
    /// Flat `power_category`: hyphen-delimited tokens, each capitalized,
    /// re-joined with spaces.
    PowerCategory,
    /// Flat `condition`, defaulting to new, capitalized.
    Condition,
    /// `variants[0].weight` when > 0, suffixed with its unit (default lbs).
    PrimaryWeight,
    /// Flat `weight_lbs` when > 0, suffixed lbs.
    FlatWeight,
    /// Flat `shaft_length`.
    ShaftLength,
    /// `variants[0].option1_value` when `option1_name` contains "shaft"
    /// (case-insensitive).
    ShaftOption,
    /// Exact-key lookup in the free-form specs map.
    Spec(&'static str),
}

impl Lookup {
    fn resolve(self, product: &Product) -> String {
        match self {
            Self::PrimaryPrice => product
                .primary_variant()
                .and_then(|v| v.price)
                .map(format_price)
                .unwrap_or_default(),
            Self::RatedHorsepower => product
                .horsepower
                .filter(|hp| *hp > 0.0)
                .map(|hp| format!("{hp} HP"))
                .unwrap_or_default(),
            Self::Brand => product.brand.clone().unwrap_or_default(),
            Self::Title => product.title.clone(),
            Self::PrimarySku => product
                .primary_variant()
                .and_then(|v| v.sku.clone())
                .unwrap_or_default(),
            Self::ProductType => product.product_type.clone().unwrap_or_default(),
            Self::PowerCategory => product
                .power_category
                .as_deref()
                .map(title_case_hyphenated)
                .unwrap_or_default(),
            Self::Condition => capitalize(product.condition.as_deref().unwrap_or("new")),
            Self::PrimaryWeight => product
                .primary_variant()
                .and_then(|v| {
                    let weight = v.weight.filter(|w| *w > 0.0)?;
                    let unit = v.weight_unit.as_deref().unwrap_or("lbs");
                    Some(format!("{weight} {unit}"))
                })
                .unwrap_or_default(),
            Self::FlatWeight => product
                .weight_lbs
                .filter(|w| *w > 0.0)
                .map(|w| format!("{w} lbs"))
                .unwrap_or_default(),
            Self::ShaftLength => product.shaft_length.clone().unwrap_or_default(),
            Self::ShaftOption => product
                .primary_variant()
                .and_then(|v| {
                    let name = v.option1_name.as_deref()?;
                    if name.to_lowercase().contains("shaft") {
                        v.option1_value.clone()
                    } else {
                        None
                    }
                })
                .unwrap_or_default(),
            Self::Spec(key) => product.specs.get(key).unwrap_or_default().to_owned(),
        }
    }
}

/// The resolution chain for a canonical spec name, or `None` for names the
/// taxonomy does not know specially (those fall back to generated specs-map
/// keys).
fn chain(name: &str) -> Option<&'static [Lookup]> {
    use Lookup as L;
    Some(match name {
        "Price" => &[L::PrimaryPrice],
        "Horsepower" => &[L::RatedHorsepower],
        "Brand" => &[L::Brand],
        "Model" => &[L::Title],
        "SKU" => &[L::PrimarySku],
        "Type" => &[L::ProductType],
        "Power Category" => &[L::PowerCategory],
        "Condition" => &[L::Condition],
        "Weight" => &[
            L::PrimaryWeight,
            L::FlatWeight,
            L::Spec("Weight"),
            L::Spec("weight"),
            L::Spec("weight_lbs"),
        ],
        "Shaft Length" => &[
            L::ShaftLength,
            L::ShaftOption,
            L::Spec("Shaft Length"),
            L::Spec("custom.shaft_length"),
            L::Spec("shaft_length"),
            L::Spec("Physical.shaft_length"),
        ],
        "Cooling" => &[L::Spec("Cooling"), L::Spec("cooling")],
        "Starting Method" => &[L::Spec("Starting Method"), L::Spec("starting_method")],
        "Fuel Induction" => &[L::Spec("Fuel Induction"), L::Spec("fuel_induction")],
        "Lubrication" => &[L::Spec("Lubrication"), L::Spec("lubrication")],
        "Throttle Range" => &[L::Spec("Throttle Range"), L::Spec("throttle_range")],
        "Gear Shift" => &[L::Spec("Gear Shift"), L::Spec("gear_shift")],
        _ => return None,
    })
}

/// Resolves a named specification field to a display-ready string, or an
/// empty string if unavailable. Never panics.
#[must_use]
pub fn resolve_spec(product: &Product, name: &str) -> String {
    if let Some(chain) = chain(name) {
        for lookup in chain {
            let value = lookup.resolve(product);
            if !value.is_empty() {
                return value;
            }
        }
        return String::new();
    }

    // Unknown canonical names: try the literal name against the specs map,
    // then lower-cased, then with spaces replaced by underscores (both
    // cases), then with spaces stripped (both cases).
    for key in fallback_keys(name) {
        if let Some(value) = product.specs.get(&key) {
            if !value.is_empty() {
                return value.to_owned();
            }
        }
    }
    String::new()
}

fn fallback_keys(name: &str) -> [String; 6] {
    let lower = name.to_lowercase();
    [
        name.to_owned(),
        lower.clone(),
        name.replace(' ', "_"),
        lower.replace(' ', "_"),
        name.replace(' ', ""),
        lower.replace(' ', ""),
    ]
}

/// Formats a price with a currency prefix and thousands separators,
/// trimming insignificant trailing zeros: `1000.00` → `"$1,000"`,
/// `999.5` → `"$999.5"`.
fn format_price(price: Decimal) -> String {
    let raw = price.normalize().to_string();
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (raw.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let grouped = group_thousands(digits);
    match frac_part {
        Some(frac) => format!("{sign}${grouped}.{frac}"),
        None => format!("{sign}${grouped}"),
    }
}

/// Inserts a comma every three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

fn title_case_hyphenated(value: &str) -> String {
    value
        .split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
