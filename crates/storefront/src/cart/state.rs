use serde::Serialize;

use crate::shopify::types::Cart;

/// Snapshot of the cart store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartState {
    /// Last cart confirmed by Shopify.
    pub cart: Option<Cart>,
    /// A Storefront API call is in flight.
    pub is_loading: bool,
    /// Message from the last failed command.
    pub error: Option<String>,
    /// Cart sidebar visibility.
    pub is_open: bool,
}

/// Coarse lifecycle of the store, derived from a [`CartState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CartStatus {
    /// Nothing loaded and nothing attempted.
    Uninitialized,
    Loading,
    /// The last command failed.
    Error,
    Ready,
}

impl CartState {
    /// Total item quantity, zero without a cart.
    #[must_use]
    pub fn cart_count(&self) -> i64 {
        self.cart.as_ref().map_or(0, |cart| cart.total_quantity)
    }

    #[must_use]
    pub const fn status(&self) -> CartStatus {
        if self.is_loading {
            CartStatus::Loading
        } else if self.error.is_some() {
            CartStatus::Error
        } else if self.cart.is_some() {
            CartStatus::Ready
        } else {
            CartStatus::Uninitialized
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = CartState::default();
        assert_eq!(state.status(), CartStatus::Uninitialized);
        assert_eq!(state.cart_count(), 0);
        assert!(!state.is_open);
    }

    #[test]
    fn test_loading_wins_over_error() {
        let state = CartState {
            is_loading: true,
            error: Some("boom".to_string()),
            ..CartState::default()
        };
        assert_eq!(state.status(), CartStatus::Loading);
    }

    #[test]
    fn test_error_without_cart() {
        let state = CartState {
            error: Some("Missing required Shopify environment variables".to_string()),
            ..CartState::default()
        };
        assert_eq!(state.status(), CartStatus::Error);
    }
}
