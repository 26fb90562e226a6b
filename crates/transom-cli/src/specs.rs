use transom_catalog::{ProductStore, StorefrontClient};
use transom_compare::resolve_spec;
use transom_core::AppConfig;

/// Print every taxonomy spec for one product, resolved to display values.
///
/// # Errors
///
/// Returns an error if the catalog fetch fails or the handle is unknown.
pub(crate) async fn run_specs(
    client: &StorefrontClient,
    config: &AppConfig,
    handle: &str,
) -> anyhow::Result<()> {
    let mut store = ProductStore::new(config.page_size, config.inter_request_delay_ms);
    store.load(client).await;
    if let Some(error) = store.error() {
        anyhow::bail!("catalog fetch failed: {error}");
    }

    let product = store
        .products()
        .iter()
        .find(|p| p.handle == handle)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "no product with handle '{handle}'; run `transom catalog` to list handles"
            )
        })?;

    println!("{} ({})", product.title, product.handle);
    for category in crate::comparison_taxonomy(config)? {
        println!();
        println!("{}", category.title);
        for name in &category.specs {
            let value = resolve_spec(product, name);
            let display = if value.is_empty() {
                "\u{2014}"
            } else {
                value.as_str()
            };
            println!("  {name:<18}{display}");
        }
    }

    Ok(())
}
