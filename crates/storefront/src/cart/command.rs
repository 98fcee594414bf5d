use crate::shopify::types::{CartLineId, VariantId};

/// Everything that may change a [`CartStore`](super::CartStore).
///
/// `Init`, `Add`, `UpdateQuantity`, `Remove` and `Refresh` talk to Shopify;
/// the rest are local transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    /// Create a cart unless one already exists.
    Init,
    /// Add a variant, creating the cart first if needed.
    Add { variant_id: VariantId, quantity: i64 },
    /// Set a line's quantity. Zero removes the line.
    UpdateQuantity { line_id: CartLineId, quantity: i64 },
    /// Remove a line.
    Remove { line_id: CartLineId },
    /// Forget the cart and reset every flag.
    Clear,
    ClearError,
    OpenSidebar,
    CloseSidebar,
    ToggleSidebar,
    /// Re-read the current cart from Shopify.
    Refresh,
}

impl CartCommand {
    /// Add a single unit of a variant.
    #[must_use]
    pub const fn add(variant_id: VariantId) -> Self {
        Self::Add {
            variant_id,
            quantity: 1,
        }
    }

    /// Whether this command issues a Storefront API call.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Init
                | Self::Add { .. }
                | Self::UpdateQuantity { .. }
                | Self::Remove { .. }
                | Self::Refresh
        )
    }
}
