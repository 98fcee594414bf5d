//! Product catalog route handlers.
//!
//! Read-only JSON views over the Storefront API. Nothing is cached.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::shopify::{DEFAULT_PAGE_SIZE, Product, ProductPage};
use crate::state::AppState;

/// Largest page the Storefront API will return.
const MAX_PAGE_SIZE: i64 = 250;

/// Query parameters for product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Comma-separated tags; products matching any of them are returned.
    pub tags: Option<String>,
    /// Cursor from the previous page.
    pub after: Option<String>,
    /// Page size.
    pub first: Option<i64>,
}

impl ProductsQuery {
    fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn page_size(&self) -> i64 {
        self.first
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

/// Product listing.
///
/// GET /api/products
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    query: std::result::Result<Query<ProductsQuery>, QueryRejection>,
) -> Result<Json<ProductPage>> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected product query");
        AppError::Validation("Invalid query parameters".to_string())
    })?;

    let page = state
        .storefront()
        .get_products_by_tags(&query.tag_list(), query.after.as_deref(), query.page_size())
        .await?;

    Ok(Json(page))
}

/// Product detail.
///
/// GET /api/products/{handle}
#[instrument(skip(state), fields(handle = %handle))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<Product>> {
    state
        .storefront()
        .get_product_by_handle(&handle)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Product not found: {handle}")))
}
