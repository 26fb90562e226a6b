//! One-shot product store: fetch the catalog once, then serve it from memory.
//!
//! The comparison workflow needs the product list exactly once per session,
//! so the store is deliberately not a cache: it moves through
//! `Idle → Loading → Ready | Failed` and stays in its terminal state for the
//! rest of its lifetime. A failed fetch is not retried; callers that want a
//! fresh attempt build a new store. This keeps the state space enumerable
//! and makes "loaded" an irreversible fact rather than a fluctuating one.

use transom_core::Product;

use crate::client::StorefrontClient;
use crate::normalize::normalize_product;

/// Lifecycle of a [`ProductStore`].
#[derive(Debug)]
enum StoreState {
    Idle,
    Loading,
    Ready(Vec<Product>),
    Failed(String),
}

/// One-shot in-memory catalog, optionally scoped to a product category.
///
/// Owned by a single caller; all mutation goes through `&mut self`. No
/// interior locking: one comparison session, one owner.
#[derive(Debug)]
pub struct ProductStore {
    state: StoreState,
    /// When set, only products of this `product_type` survive the load
    /// (case-insensitive match).
    category: Option<String>,
    page_size: u32,
    inter_request_delay_ms: u64,
}

impl ProductStore {
    /// Creates an idle store covering the whole catalog.
    #[must_use]
    pub fn new(page_size: u32, inter_request_delay_ms: u64) -> Self {
        Self {
            state: StoreState::Idle,
            category: None,
            page_size,
            inter_request_delay_ms,
        }
    }

    /// Creates an idle store scoped to one product category
    /// (e.g., `"Parts & Accessories"`).
    #[must_use]
    pub fn for_category(category: &str, page_size: u32, inter_request_delay_ms: u64) -> Self {
        Self {
            state: StoreState::Idle,
            category: Some(category.to_owned()),
            page_size,
            inter_request_delay_ms,
        }
    }

    /// Fetches the catalog once.
    ///
    /// Only an `Idle` store fetches: calling `load` again after the store
    /// has reached `Ready` or `Failed` (or while a load is in flight) is a
    /// no-op. On success the store keeps published products, scoped to the
    /// category when one is set; products that fail normalization are
    /// skipped with a warning rather than failing the whole catalog. On
    /// fetch failure the store keeps a single human-readable error string
    /// and an empty list, terminally.
    pub async fn load(&mut self, client: &StorefrontClient) {
        if !matches!(self.state, StoreState::Idle) {
            return;
        }
        self.state = StoreState::Loading;

        match client
            .fetch_all_products(self.page_size, self.inter_request_delay_ms)
            .await
        {
            Ok(raw_products) => {
                let mut products = Vec::with_capacity(raw_products.len());
                for raw in raw_products {
                    match normalize_product(raw) {
                        Ok(product) => products.push(product),
                        Err(e) => {
                            tracing::warn!(error = %e, "skipping unnormalizable product");
                        }
                    }
                }

                products.retain(|p| p.published);
                if let Some(category) = &self.category {
                    products.retain(|p| {
                        p.product_type
                            .as_deref()
                            .is_some_and(|t| t.eq_ignore_ascii_case(category))
                    });
                }

                tracing::debug!(count = products.len(), "product store ready");
                self.state = StoreState::Ready(products);
            }
            Err(e) => {
                tracing::warn!(error = %e, "product store load failed");
                self.state = StoreState::Failed(e.to_string());
            }
        }
    }

    /// The loaded product list. Empty unless the store is `Ready`.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        match &self.state {
            StoreState::Ready(products) => products,
            _ => &[],
        }
    }

    /// `true` while a load is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state, StoreState::Loading)
    }

    /// The terminal error message, if the load failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            StoreState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_store_serves_empty_slice() {
        let store = ProductStore::new(250, 0);
        assert!(store.products().is_empty());
        assert!(!store.is_loading());
        assert!(store.error().is_none());
    }

    #[test]
    fn failed_store_reports_error_and_empty_products() {
        let mut store = ProductStore::new(250, 0);
        store.state = StoreState::Failed("backend unreachable".to_owned());
        assert_eq!(store.error(), Some("backend unreachable"));
        assert!(store.products().is_empty());
        assert!(!store.is_loading());
    }

    #[test]
    fn loading_store_reports_in_flight() {
        let mut store = ProductStore::new(250, 0);
        store.state = StoreState::Loading;
        assert!(store.is_loading());
        assert!(store.products().is_empty());
        assert!(store.error().is_none());
    }
}
