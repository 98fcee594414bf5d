//! Cart commands.
//!
//! Each invocation restores the cart saved in the data directory, applies
//! one command and prints the resulting state. The cart is saved again
//! whenever Shopify returns a new one.
//!
//! # Environment Variables
//!
//! - `GOLDSABERTOOTH_DATA_DIR` - Where the cart is kept (default `.goldsabertooth`)
//! - Shopify variables as for the catalog commands

use std::sync::Arc;

use clap::Subcommand;
use goldsabertooth_core::{CartLineId, VariantId};
use goldsabertooth_storefront::cart::{CartCommand, CartStore, FileCartStorage};
use goldsabertooth_storefront::config::{ShopifyStorefrontConfig, data_dir_from_env};
use goldsabertooth_storefront::shopify::StorefrontClient;

use super::{CommandError, print_json};

#[derive(Debug, Subcommand)]
pub enum CartAction {
    /// Print the saved cart without contacting Shopify
    Show,
    /// Create an empty cart unless one exists
    Init,
    /// Add a variant, creating the cart if needed
    Add {
        /// Variant global ID
        variant_id: String,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: i64,
    },
    /// Set a line's quantity (0 removes it)
    Update {
        /// Cart line global ID
        line_id: String,

        /// New quantity
        quantity: i64,
    },
    /// Remove a line
    Remove {
        /// Cart line global ID
        line_id: String,
    },
    /// Re-read the cart from Shopify
    Refresh,
    /// Forget the saved cart
    Clear,
}

impl CartAction {
    /// The store command for this action. `Show` has none.
    fn command(self) -> Option<CartCommand> {
        match self {
            Self::Show => None,
            Self::Init => Some(CartCommand::Init),
            Self::Add {
                variant_id,
                quantity,
            } => Some(CartCommand::Add {
                variant_id: VariantId::new(variant_id),
                quantity,
            }),
            Self::Update { line_id, quantity } => Some(CartCommand::UpdateQuantity {
                line_id: CartLineId::new(line_id),
                quantity,
            }),
            Self::Remove { line_id } => Some(CartCommand::Remove {
                line_id: CartLineId::new(line_id),
            }),
            Self::Refresh => Some(CartCommand::Refresh),
            Self::Clear => Some(CartCommand::Clear),
        }
    }
}

/// Apply `action` to the persisted cart and print the outcome.
pub async fn run(action: CartAction) -> Result<(), CommandError> {
    let data_dir = data_dir_from_env();
    let storage = FileCartStorage::new(&data_dir);
    tracing::debug!(path = %storage.path().display(), "Using cart storage");

    let client = StorefrontClient::new(&ShopifyStorefrontConfig::from_env());
    let store = CartStore::new(client, Arc::new(storage)).await;

    if let Some(command) = action.command() {
        store.dispatch(command).await;
    }

    let state = store.snapshot();
    print_json(&state)?;

    match state.error {
        Some(message) => Err(CommandError::Cart(message)),
        None => Ok(()),
    }
}
