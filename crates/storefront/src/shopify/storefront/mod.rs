//! Shopify Storefront API client implementation.
//!
//! Hand-written documents from [`queries`] are posted with `reqwest` 0.13 and
//! unwrapped through the `graphql_client` response envelope. Nothing is
//! cached: every call hits the API.

mod conversions;
pub mod queries;

use std::sync::Arc;

use graphql_client::{GraphQLQuery, Response};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use crate::config::ShopifyStorefrontConfig;
use crate::shopify::types::{
    Cart, CartId, CartLineId, CartLineInput, CartLineUpdateInput, Product, ProductPage,
};
use crate::shopify::{GraphQLError, GraphQLErrorLocation, ShopifyError};

use conversions::{convert_cart, convert_product, convert_product_page, join_user_errors};
use queries::{
    AddToCart, AddToCartVariables, CartInput, CartMutationPayload, CreateCart,
    CreateCartVariables, GetCart, GetCartVariables, GetProductByHandle,
    GetProductByHandleVariables, GetProducts, GetProductsVariables, RemoveFromCart,
    RemoveFromCartVariables, UpdateCartLines, UpdateCartLinesVariables,
};

/// Products per page when the caller does not ask for a size.
pub const DEFAULT_PAGE_SIZE: i64 = 12;

const MISSING_CONFIG: &str = "Missing required Shopify environment variables";

/// Build the Storefront search query matching any of `tags`.
///
/// Returns `None` when there is nothing to filter on, so the query variable
/// is omitted entirely.
///
/// ```
/// use goldsabertooth_storefront::shopify::build_tag_query;
///
/// let tags = vec!["Playmats".to_string(), "Stickers".to_string()];
/// assert_eq!(
///     build_tag_query(&tags).as_deref(),
///     Some(r#"tag:"Playmats" OR tag:"Stickers""#)
/// );
/// assert_eq!(build_tag_query(&[]), None);
/// ```
#[must_use]
pub fn build_tag_query(tags: &[String]) -> Option<String> {
    if tags.is_empty() {
        return None;
    }

    Some(
        tags.iter()
            .map(|tag| format!("tag:\"{tag}\""))
            .collect::<Vec<_>>()
            .join(" OR "),
    )
}

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: Option<String>,
    access_token: Option<SecretString>,
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    ///
    /// Never fails: a missing store domain or token is reported by the
    /// first request instead.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig) -> Self {
        let base = config
            .base_url
            .as_ref()
            .map(|url| url.trim_end_matches('/').to_string())
            .or_else(|| config.store.as_ref().map(|store| format!("https://{store}")));

        let endpoint = match (&config.store, base) {
            (Some(_), Some(base)) => Some(format!(
                "{base}/api/{}/graphql.json",
                config.api_version
            )),
            _ => None,
        };

        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                endpoint,
                access_token: config.access_token.clone(),
            }),
        }
    }

    /// Execute a GraphQL operation and return its `data` payload.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Config`] when the store domain or token is
    /// missing, and otherwise the transport, status, GraphQL or shape error
    /// that stopped the request. Nothing is retried.
    pub async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, ShopifyError> {
        let (Some(endpoint), Some(access_token)) =
            (&self.inner.endpoint, &self.inner.access_token)
        else {
            return Err(ShopifyError::Config(MISSING_CONFIG.to_string()));
        };

        let request_body = Q::build_query(variables);

        let response = self
            .inner
            .client
            .post(endpoint)
            .header(
                "X-Shopify-Storefront-Access-Token",
                access_token.expose_secret(),
            )
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                operation = request_body.operation_name,
                body = %truncate(&response_text, 500),
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::Status {
                status,
                body: truncate(&response_text, 200),
            });
        }

        let response: Response<Q::ResponseData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    operation = request_body.operation_name,
                    body = %truncate(&response_text, 500),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(ShopifyError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            tracing::debug!(
                errors = ?errors,
                operation = request_body.operation_name,
                "GraphQL errors in response"
            );

            return Err(ShopifyError::GraphQL(
                errors.into_iter().map(convert_graphql_error).collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                operation = request_body.operation_name,
                body = %truncate(&response_text, 500),
                "Shopify GraphQL response has no data and no errors"
            );
            ShopifyError::NoData
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get one page of products, optionally restricted to any of `tags`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response does not
    /// have the expected shape.
    #[instrument(skip(self), fields(tags = ?tags))]
    pub async fn get_products_by_tags(
        &self,
        tags: &[String],
        cursor: Option<&str>,
        page_size: i64,
    ) -> Result<ProductPage, ShopifyError> {
        let variables = GetProductsVariables {
            first: page_size,
            after: cursor.map(str::to_string),
            query: build_tag_query(tags),
        };

        let data = self.execute::<GetProducts>(variables).await?;

        Ok(convert_product_page(data.products))
    }

    /// Get a product by its handle, `None` if no product has that handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_product_by_handle(
        &self,
        handle: &str,
    ) -> Result<Option<Product>, ShopifyError> {
        let variables = GetProductByHandleVariables {
            handle: handle.to_string(),
        };

        let data = self.execute::<GetProductByHandle>(variables).await?;

        Ok(data.product.map(convert_product))
    }

    // =========================================================================
    // Cart Methods
    // =========================================================================

    /// Create a new cart, optionally seeded with lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart creation fails or user errors are returned.
    #[instrument(skip(self, lines), fields(line_count = lines.len()))]
    pub async fn create_cart(&self, lines: Vec<CartLineInput>) -> Result<Cart, ShopifyError> {
        let variables = CreateCartVariables {
            input: CartInput { lines },
        };

        let data = self.execute::<CreateCart>(variables).await?;

        mutation_cart(data.cart_create, "Failed to create cart")
    }

    /// Get an existing cart.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::NotFound`] if the cart no longer exists, or an
    /// error if the API request fails.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn get_cart(&self, cart_id: &CartId) -> Result<Cart, ShopifyError> {
        let variables = GetCartVariables {
            cart_id: cart_id.clone(),
        };

        let data = self.execute::<GetCart>(variables).await?;

        data.cart
            .map(convert_cart)
            .ok_or_else(|| ShopifyError::NotFound(format!("Cart not found: {cart_id}")))
    }

    /// Add lines to a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    pub async fn add_to_cart(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineInput>,
    ) -> Result<Cart, ShopifyError> {
        let variables = AddToCartVariables {
            cart_id: cart_id.clone(),
            lines,
        };

        let data = self.execute::<AddToCart>(variables).await?;

        mutation_cart(data.cart_lines_add, "Failed to add to cart")
    }

    /// Set quantities on existing cart lines. A quantity of zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    pub async fn update_cart_lines(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineUpdateInput>,
    ) -> Result<Cart, ShopifyError> {
        let variables = UpdateCartLinesVariables {
            cart_id: cart_id.clone(),
            lines,
        };

        let data = self.execute::<UpdateCartLines>(variables).await?;

        mutation_cart(data.cart_lines_update, "Failed to update cart")
    }

    /// Remove lines from a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, line_ids), fields(cart_id = %cart_id))]
    pub async fn remove_cart_lines(
        &self,
        cart_id: &CartId,
        line_ids: Vec<CartLineId>,
    ) -> Result<Cart, ShopifyError> {
        let variables = RemoveFromCartVariables {
            cart_id: cart_id.clone(),
            line_ids,
        };

        let data = self.execute::<RemoveFromCart>(variables).await?;

        mutation_cart(data.cart_lines_remove, "Failed to remove from cart")
    }
}

/// Unwrap a cart mutation payload: user errors win over a returned cart.
fn mutation_cart(
    payload: Option<CartMutationPayload>,
    failure: &str,
) -> Result<Cart, ShopifyError> {
    if let Some(result) = payload {
        if !result.user_errors.is_empty() {
            return Err(ShopifyError::UserError(join_user_errors(
                result.user_errors,
            )));
        }

        if let Some(cart) = result.cart {
            return Ok(convert_cart(cart));
        }
    }

    Err(ShopifyError::UserError(failure.to_string()))
}

fn convert_graphql_error(e: graphql_client::Error) -> GraphQLError {
    GraphQLError {
        message: e.message,
        locations: e.locations.map_or_else(Vec::new, |locs| {
            locs.into_iter()
                .map(|l| GraphQLErrorLocation {
                    line: i64::from(l.line),
                    column: i64::from(l.column),
                })
                .collect()
        }),
        path: e.path.map_or_else(Vec::new, |p| {
            p.into_iter()
                .map(|fragment| match fragment {
                    graphql_client::PathFragment::Key(s) => serde_json::Value::String(s),
                    graphql_client::PathFragment::Index(i) => serde_json::Value::Number(i.into()),
                })
                .collect()
        }),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
