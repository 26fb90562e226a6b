//! Multi-page product fetch loop for `StorefrontClient`.

use std::time::Duration;

use crate::error::CatalogError;
use crate::pagination::extract_next_cursor;
use crate::types::BackendProduct;

use super::StorefrontClient;
use super::MAX_PAGES;

impl StorefrontClient {
    /// Fetches the full backend catalog by iterating through all pages.
    ///
    /// Starts with the first page (no cursor), follows `Link` header cursors
    /// until no `rel="next"` link is present, and returns all products
    /// collected.
    ///
    /// `inter_request_delay_ms` is the delay in milliseconds between page
    /// requests (applied after every page except the first).
    ///
    /// **All-or-nothing semantics**: on any page failure (network error, rate
    /// limit, pagination limit), already-fetched products from earlier pages
    /// are discarded and the error is returned. A partial catalog would make
    /// the storefront silently hide inventory, which is worse than an
    /// explicit failure.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_products_page`].
    /// Returns [`CatalogError::PaginationLimit`] if the number of pages
    /// exceeds [`MAX_PAGES`].
    pub async fn fetch_all_products(
        &self,
        limit: u32,
        inter_request_delay_ms: u64,
    ) -> Result<Vec<BackendProduct>, CatalogError> {
        let mut all_products: Vec<BackendProduct> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut is_first_page = true;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(CatalogError::PaginationLimit {
                    max_pages: MAX_PAGES,
                });
            }

            if !is_first_page && inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_request_delay_ms)).await;
            }
            is_first_page = false;

            let (response, link_header) =
                self.fetch_products_page(limit, cursor.as_deref()).await?;

            all_products.extend(response.products);

            cursor = extract_next_cursor(link_header.as_deref());
            if cursor.is_none() {
                break;
            }
        }

        Ok(all_products)
    }
}
