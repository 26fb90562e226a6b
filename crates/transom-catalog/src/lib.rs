pub mod client;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod pagination;
mod parse;
mod retry;
pub mod store;
pub mod types;

pub use client::StorefrontClient;
pub use error::CatalogError;
pub use filter::{filter_and_sort, InventoryFilter, InventorySort};
pub use normalize::normalize_product;
pub use store::ProductStore;
pub use types::{
    BackendProduct, BackendProductsResponse, BackendVariant, CheckoutCreated, CheckoutItem,
    CheckoutRequest, InventoryLevel, SubscriptionAck,
};
