use transom_catalog::{ProductStore, StorefrontClient};
use transom_compare::resolve_spec;
use transom_core::AppConfig;

/// Fetch the published catalog and print a one-line summary per listing.
///
/// # Errors
///
/// Returns an error if the catalog fetch fails.
pub(crate) async fn run_catalog(
    client: &StorefrontClient,
    config: &AppConfig,
    category: Option<&str>,
    limit: usize,
) -> anyhow::Result<()> {
    let mut store = match category {
        Some(category) => {
            ProductStore::for_category(category, config.page_size, config.inter_request_delay_ms)
        }
        None => ProductStore::new(config.page_size, config.inter_request_delay_ms),
    };
    store.load(client).await;

    if let Some(error) = store.error() {
        anyhow::bail!("catalog fetch failed: {error}");
    }

    let products = store.products();
    if products.is_empty() {
        println!(
            "no published products{}",
            category
                .map(|c| format!(" in category '{c}'"))
                .unwrap_or_default()
        );
        return Ok(());
    }

    let header = format!(
        "{:<30}{:<12}{:<9}{:<11}{:<7}TITLE",
        "HANDLE", "BRAND", "HP", "PRICE", "STOCK"
    );
    println!("{header}");
    for product in products.iter().take(limit) {
        let brand = product.brand.as_deref().unwrap_or("\u{2014}");
        let hp = dash_when_empty(resolve_spec(product, "Horsepower"));
        let price = dash_when_empty(resolve_spec(product, "Price"));
        let stock = if product.has_available_variants() {
            "yes"
        } else {
            "no"
        };
        let title_display = if product.title.chars().count() > 50 {
            format!("{}...", product.title.chars().take(50).collect::<String>())
        } else {
            product.title.clone()
        };
        println!(
            "{:<30}{:<12}{:<9}{:<11}{:<7}{}",
            product.handle, brand, hp, price, stock, title_display
        );
    }

    if products.len() > limit {
        println!();
        println!(
            "showing {limit} of {} listings; raise --limit to see more",
            products.len()
        );
    }

    Ok(())
}

fn dash_when_empty(value: String) -> String {
    if value.is_empty() {
        "\u{2014}".to_string()
    } else {
        value
    }
}
