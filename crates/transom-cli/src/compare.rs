use transom_catalog::{ProductStore, StorefrontClient};
use transom_compare::{build_table, render_text, SelectionSlots};
use transom_core::AppConfig;

/// Load the catalog, fill the comparison slots from the given handles, and
/// print the rendered spec table.
///
/// # Errors
///
/// Returns an error if the catalog fetch fails, a handle is unknown, or the
/// same handle is given twice.
pub(crate) async fn run_compare(
    client: &StorefrontClient,
    config: &AppConfig,
    handles: &[String],
) -> anyhow::Result<()> {
    for (i, handle) in handles.iter().enumerate() {
        if handles[..i].contains(handle) {
            anyhow::bail!("duplicate handle '{handle}'");
        }
    }

    let mut store = ProductStore::new(config.page_size, config.inter_request_delay_ms);
    store.load(client).await;
    if let Some(error) = store.error() {
        anyhow::bail!("catalog fetch failed: {error}");
    }

    let mut slots = SelectionSlots::default();
    for (index, handle) in handles.iter().enumerate() {
        let product = store
            .products()
            .iter()
            .find(|p| &p.handle == handle)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "no product with handle '{handle}'; run `transom catalog` to list handles"
                )
            })?;
        slots.set_slot(index, Some(product.clone()));
    }

    let taxonomy = crate::comparison_taxonomy(config)?;
    let table = build_table(&slots, &taxonomy);
    print!("{}", render_text(&table));

    Ok(())
}
