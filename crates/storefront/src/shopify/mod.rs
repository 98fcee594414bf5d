//! Shopify Storefront API client.
//!
//! # Architecture
//!
//! - Query documents are hand-written and executed through the
//!   `graphql_client` request/response envelope
//! - Responses are deserialized into strict wire structs; a shape mismatch is
//!   a hard error, never partial data
//! - Shopify is the source of truth: no caching, every call hits the API
//!
//! # Example
//!
//! ```rust,ignore
//! use goldsabertooth_storefront::shopify::{CartLineInput, StorefrontClient};
//!
//! let client = StorefrontClient::new(&config.shopify);
//!
//! let page = client.get_products_by_tags(&["Playmats".into()], None, 12).await?;
//!
//! let cart = client.create_cart(Vec::new()).await?;
//! let cart = client
//!     .add_to_cart(&cart.id, vec![CartLineInput::new(page.products[0].variants[0].id.clone(), 1)])
//!     .await?;
//! ```

mod storefront;
pub mod types;

pub use storefront::{DEFAULT_PAGE_SIZE, StorefrontClient, build_tag_query};
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with the Storefront API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// Store domain or access token is not configured.
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Shopify answered with a non-success HTTP status.
    #[error("HTTP error! status: {status}")]
    Status {
        /// Response status code.
        status: reqwest::StatusCode,
        /// Leading part of the response body, for diagnostics.
        body: String,
    },

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// Response had neither data nor errors.
    #[error("No data returned from Shopify API")]
    NoData,

    /// Response body did not match the expected shape.
    #[error("Unexpected response shape: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// User error from mutation (e.g., invalid quantity).
    #[error("{0}")]
    UserError(String),
}

/// A GraphQL error returned by the Shopify API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            if !e.message.is_empty() {
                parts.push(e.message.clone());
            }

            if !e.path.is_empty() {
                let path_str = e
                    .path
                    .iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                parts.push(format!("path: {path_str}"));
            }

            if let Some(loc) = e.locations.first() {
                parts.push(format!("at line {}:{}", loc.line, loc.column));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shopify_error_display() {
        let err = ShopifyError::NotFound("product-123".to_string());
        assert_eq!(err.to_string(), "Not found: product-123");

        let err = ShopifyError::Status {
            status: reqwest::StatusCode::BAD_GATEWAY,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "HTTP error! status: 502 Bad Gateway");
    }

    #[test]
    fn test_user_error_is_shown_verbatim() {
        let err = ShopifyError::UserError("Quantity must be positive".to_string());
        assert_eq!(err.to_string(), "Quantity must be positive");
    }

    #[test]
    fn test_graphql_error_formatting() {
        let errors = vec![
            GraphQLError {
                message: "Field not found".to_string(),
                locations: vec![],
                path: vec![],
            },
            GraphQLError {
                message: "Invalid ID".to_string(),
                locations: vec![],
                path: vec![],
            },
        ];
        let err = ShopifyError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Field not found; Invalid ID"
        );
    }

    #[test]
    fn test_graphql_error_path_and_location() {
        let errors = vec![GraphQLError {
            message: String::new(),
            locations: vec![GraphQLErrorLocation { line: 5, column: 10 }],
            path: vec![
                serde_json::Value::String("products".to_string()),
                serde_json::Value::Number(0.into()),
            ],
        }];
        let err = ShopifyError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: path: products.0 at line 5:10"
        );
    }

    #[test]
    fn test_graphql_error_no_details() {
        let err = ShopifyError::GraphQL(vec![GraphQLError {
            message: String::new(),
            locations: vec![],
            path: vec![],
        }]);
        assert_eq!(err.to_string(), "GraphQL errors: [error 1]: (no details)");

        let err = ShopifyError::GraphQL(vec![]);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: (no error details provided)"
        );
    }

    #[test]
    fn test_config_and_no_data_errors() {
        let err = ShopifyError::Config("Missing required Shopify environment variables".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required Shopify environment variables"
        );
        assert_eq!(
            ShopifyError::NoData.to_string(),
            "No data returned from Shopify API"
        );
    }
}
