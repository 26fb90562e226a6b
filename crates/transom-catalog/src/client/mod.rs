//! HTTP client for the commerce backend's storefront API.

mod fetch_all;

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use transom_core::AppConfig;

use crate::error::CatalogError;
use crate::retry::retry_with_backoff;
use crate::types::{
    BackendProductsResponse, CheckoutCreated, CheckoutRequest, InventoryLevel, InventoryResponse,
    SubscriptionAck,
};

/// Maximum number of pages to fetch before returning an error.
/// Prevents infinite loops on cycling cursors.
///
/// Note: each page request may be retried up to `max_retries` times on
/// transient errors, so the effective worst-case request count is
/// `MAX_PAGES * (1 + max_retries)`.
pub(super) const MAX_PAGES: usize = 200;

/// HTTP client for the commerce backend's storefront API.
///
/// Owns one validated base URL and an optional bearer token. Maps rate
/// limiting (429), not-found (404), and other non-2xx responses to typed
/// errors. Page fetches return pagination cursors extracted from the `Link`
/// header for callers to drive multi-page loops.
///
/// Transient errors (429, network failures, 5xx) are automatically retried
/// with exponential backoff on idempotent GETs. The checkout and newsletter
/// POSTs are never retried: the backend does not deduplicate them.
#[derive(Debug)]
pub struct StorefrontClient {
    client: Client,
    /// Validated backend origin with any trailing slash stripped.
    base_url: String,
    bearer_token: Option<String>,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    backoff_base_secs: u64,
}

impl StorefrontClient {
    /// Creates a `StorefrontClient` with configured timeout, `User-Agent`,
    /// and retry policy.
    ///
    /// `max_retries` is the number of additional attempts after the first
    /// failure for retriable errors. Set to `0` to disable retries.
    /// `backoff_base_secs` controls the base delay for exponential backoff:
    /// the wait before the n-th retry is `backoff_base_secs * 2^(n-1)` seconds.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidBackendUrl`] if `base_url` is not an
    ///   absolute `http`/`https` URL.
    /// - [`CatalogError::Http`] if the underlying `reqwest::Client` cannot
    ///   be constructed (e.g., invalid TLS config).
    pub fn new(
        base_url: &str,
        bearer_token: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, CatalogError> {
        let base_url = validate_base_url(base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url,
            bearer_token: bearer_token.map(str::to_owned),
            max_retries,
            backoff_base_secs,
        })
    }

    /// Creates a client from the application config.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        Self::new(
            &config.backend_url,
            config.backend_token.as_deref(),
            config.http_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
        )
    }

    /// Fetches one page of products from the backend catalog, with
    /// automatic retry on transient errors.
    ///
    /// Returns the parsed page plus the raw `Link` header (if any) for
    /// cursor extraction.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::RateLimited`] — HTTP 429 after all retries exhausted.
    /// - [`CatalogError::NotFound`] — HTTP 404 (not retried).
    /// - [`CatalogError::UnexpectedStatus`] — any other non-2xx status
    ///   (5xx retried, 4xx not).
    /// - [`CatalogError::Http`] — network or TLS failure after all retries exhausted.
    /// - [`CatalogError::Deserialize`] — response body is not valid JSON (not retried).
    pub async fn fetch_products_page(
        &self,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<(BackendProductsResponse, Option<String>), CatalogError> {
        let url = self.products_url(limit, cursor)?;

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .authorize(self.client.get(&url))
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await?;

                let response = check_status(response, &url)?;

                // Extract the Link header before consuming the response body.
                let link_header = response
                    .headers()
                    .get(reqwest::header::LINK)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned);

                let body = response.text().await?;
                let parsed = serde_json::from_str::<BackendProductsResponse>(&body).map_err(
                    |e| CatalogError::Deserialize {
                        context: format!("products page from {url}"),
                        source: e,
                    },
                )?;

                Ok((parsed, link_header))
            }
        })
        .await
    }

    /// Creates a checkout on the backend from the given line items.
    ///
    /// Not retried: checkout creation is not idempotent and a duplicate
    /// submission would open two carts for the buyer.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::fetch_products_page`], without the retry
    /// behavior.
    pub async fn create_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutCreated, CatalogError> {
        let url = self.endpoint_url("/api/checkouts.json");
        self.post_json(&url, request, "checkout creation").await
    }

    /// Subscribes an email address to the dealership newsletter.
    ///
    /// Not retried, for the same reason as [`Self::create_checkout`].
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::fetch_products_page`], without the retry
    /// behavior.
    pub async fn subscribe_newsletter(&self, email: &str) -> Result<SubscriptionAck, CatalogError> {
        #[derive(Serialize)]
        struct SubscribeBody<'a> {
            email: &'a str,
        }

        let url = self.endpoint_url("/api/newsletter/subscriptions.json");
        self.post_json(&url, &SubscribeBody { email }, "newsletter subscription")
            .await
    }

    /// Fetches per-variant stock levels for one product handle, with
    /// automatic retry on transient errors.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::fetch_products_page`].
    pub async fn inventory_levels(&self, handle: &str) -> Result<Vec<InventoryLevel>, CatalogError> {
        let url = self.inventory_url(handle)?;

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .authorize(self.client.get(&url))
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await?;

                let response = check_status(response, &url)?;
                let body = response.text().await?;
                let parsed = serde_json::from_str::<InventoryResponse>(&body).map_err(|e| {
                    CatalogError::Deserialize {
                        context: format!("inventory levels from {url}"),
                        source: e,
                    }
                })?;
                Ok(parsed.levels)
            }
        })
        .await
    }

    /// Single-attempt JSON POST with the shared status mapping.
    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
        context: &str,
    ) -> Result<T, CatalogError> {
        let response = self
            .authorize(self.client.post(url))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        let response = check_status(response, url)?;
        let text = response.text().await?;
        serde_json::from_str::<T>(&text).map_err(|e| CatalogError::Deserialize {
            context: format!("{context} response from {url}"),
            source: e,
        })
    }

    /// Attaches the bearer token when one is configured.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Builds the products URL for the given page size and optional cursor.
    fn products_url(&self, limit: u32, cursor: Option<&str>) -> Result<String, CatalogError> {
        let base = self.endpoint_url("/api/products.json");
        let mut url = parse_endpoint(&base, &self.base_url)?;

        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());

        if let Some(cursor) = cursor {
            url.query_pairs_mut().append_pair("cursor", cursor);
        }

        Ok(url.to_string())
    }

    /// Builds the inventory URL for one product handle.
    fn inventory_url(&self, handle: &str) -> Result<String, CatalogError> {
        let base = self.endpoint_url("/api/inventory.json");
        let mut url = parse_endpoint(&base, &self.base_url)?;
        url.query_pairs_mut().append_pair("handle", handle);
        Ok(url.to_string())
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Validates and canonicalizes the backend base URL: must be an absolute
/// `http`/`https` URL; trailing slashes are stripped.
fn validate_base_url(base_url: &str) -> Result<String, CatalogError> {
    let parsed = reqwest::Url::parse(base_url).map_err(|e| CatalogError::InvalidBackendUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(CatalogError::InvalidBackendUrl {
                url: base_url.to_owned(),
                reason: format!("unsupported scheme \"{other}\""),
            });
        }
    }

    Ok(base_url.trim_end_matches('/').to_owned())
}

/// Parses an already-joined endpoint URL, surfacing failures as
/// [`CatalogError::InvalidBackendUrl`] against the configured base.
fn parse_endpoint(endpoint: &str, base_url: &str) -> Result<reqwest::Url, CatalogError> {
    reqwest::Url::parse(endpoint).map_err(|e| CatalogError::InvalidBackendUrl {
        url: base_url.to_owned(),
        reason: format!("endpoint \"{endpoint}\" is not a valid URL: {e}"),
    })
}

/// Maps non-2xx statuses to typed errors; passes 2xx responses through.
fn check_status(
    response: reqwest::Response,
    url: &str,
) -> Result<reqwest::Response, CatalogError> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);

        return Err(CatalogError::RateLimited { retry_after_secs });
    }

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(CatalogError::NotFound {
            url: url.to_owned(),
        });
    }

    if !status.is_success() {
        return Err(CatalogError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    Ok(response)
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
