//! Subcommand implementations.

pub mod cart;
pub mod catalog;

use goldsabertooth_storefront::shopify::ShopifyError;
use serde::Serialize;
use thiserror::Error;

/// Errors that end a command with a non-zero exit.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Storefront API call failed.
    #[error(transparent)]
    Shopify(#[from] ShopifyError),

    /// Requested product does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The cart store recorded an error for the last command.
    #[error("Cart error: {0}")]
    Cart(String),

    /// Output could not be encoded.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Write `value` to stdout as pretty JSON.
#[allow(clippy::print_stdout)]
fn print_json(value: &impl Serialize) -> Result<(), CommandError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
