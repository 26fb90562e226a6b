use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One display grouping of canonical spec names for the comparison table.
///
/// The ordered list of categories (and the order of specs inside each) is the
/// exact render order — the comparison layer never re-sorts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecCategory {
    pub title: String,
    pub specs: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct TaxonomyFile {
    pub categories: Vec<SpecCategory>,
}

/// The built-in comparison taxonomy for outboard motors.
///
/// Covers every canonical spec name the accessor resolves specially; unknown
/// names added via a taxonomy override file fall through to the generic
/// specs-map lookup chain.
#[must_use]
pub fn default_taxonomy() -> Vec<SpecCategory> {
    fn category(title: &str, specs: &[&str]) -> SpecCategory {
        SpecCategory {
            title: title.to_string(),
            specs: specs.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    vec![
        category(
            "Overview",
            &[
                "Brand",
                "Model",
                "SKU",
                "Price",
                "Condition",
                "Type",
                "Power Category",
            ],
        ),
        category("Performance", &["Horsepower", "Throttle Range"]),
        category(
            "Engine",
            &[
                "Cooling",
                "Starting Method",
                "Fuel Induction",
                "Lubrication",
                "Gear Shift",
            ],
        ),
        category("Dimensions", &["Weight", "Shaft Length"]),
    ]
}

/// Load and validate a taxonomy override from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_taxonomy(path: &Path) -> Result<Vec<SpecCategory>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TaxonomyFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: TaxonomyFile = serde_yaml::from_str(&content)?;

    validate_taxonomy(&file.categories)?;

    Ok(file.categories)
}

fn validate_taxonomy(categories: &[SpecCategory]) -> Result<(), ConfigError> {
    if categories.is_empty() {
        return Err(ConfigError::Validation(
            "taxonomy must declare at least one category".to_string(),
        ));
    }

    let mut seen_titles = HashSet::new();

    for category in categories {
        if category.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category title must be non-empty".to_string(),
            ));
        }

        if !seen_titles.insert(category.title.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category title: '{}'",
                category.title
            )));
        }

        if category.specs.is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{}' declares no specs",
                category.title
            )));
        }

        if category.specs.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "category '{}' contains an empty spec name",
                category.title
            )));
        }
    }

    Ok(())
}
