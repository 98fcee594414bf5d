//! Read-only catalog commands.
//!
//! # Environment Variables
//!
//! - `SHOPIFY_STORE` - Store domain (e.g. `gold-sabertooth.myshopify.com`)
//! - `SHOPIFY_STOREFRONT_TOKEN` - Storefront API access token
//! - `SHOPIFY_API_VERSION` - API version (default `2024-07`)

use goldsabertooth_storefront::config::ShopifyStorefrontConfig;
use goldsabertooth_storefront::shopify::StorefrontClient;

use super::{CommandError, print_json};

fn client() -> StorefrontClient {
    StorefrontClient::new(&ShopifyStorefrontConfig::from_env())
}

/// Print one page of products matching any of `tags`.
pub async fn list(tags: &[String], after: Option<&str>, first: i64) -> Result<(), CommandError> {
    let page = client().get_products_by_tags(tags, after, first).await?;
    tracing::info!(
        count = page.products.len(),
        has_next_page = page.page_info.has_next_page,
        "Fetched products"
    );
    print_json(&page)
}

/// Print the product with `handle`.
pub async fn show(handle: &str) -> Result<(), CommandError> {
    let product = client()
        .get_product_by_handle(handle)
        .await?
        .ok_or_else(|| CommandError::ProductNotFound(handle.to_owned()))?;
    print_json(&product)
}
