use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tracing::{debug, instrument, warn};

use crate::shopify::types::{
    Cart, CartId, CartLineId, CartLineInput, CartLineUpdateInput, VariantId,
};
use crate::shopify::{ShopifyError, StorefrontClient};

use super::command::CartCommand;
use super::persistence::{CartPersistence, PersistedCart};
use super::state::{CartState, CartStatus};

/// The shopper's cart, mirrored from Shopify.
///
/// Network commands run one at a time: a command issued while another is in
/// flight waits for it and then works from the newer snapshot. Local
/// commands (sidebar, `ClearError`, `Clear`) never wait.
///
/// No command returns an error. Failures end up in [`CartState::error`].
pub struct CartStore {
    client: StorefrontClient,
    persistence: Arc<dyn CartPersistence>,
    state: watch::Sender<CartState>,
    flight: Mutex<()>,
}

impl CartStore {
    /// Create a store, restoring the cart saved by `persistence`.
    ///
    /// Only the cart itself is restored; flags always start cleared. An
    /// unreadable entry is logged and ignored.
    pub async fn new(client: StorefrontClient, persistence: Arc<dyn CartPersistence>) -> Self {
        let cart = match persistence.load().await {
            Ok(entry) => entry.and_then(|entry| entry.cart),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable persisted cart");
                None
            }
        };

        let (state, _) = watch::channel(CartState {
            cart,
            ..CartState::default()
        });

        Self {
            client,
            persistence,
            state,
            flight: Mutex::new(()),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state.subscribe()
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> CartState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn cart(&self) -> Option<Cart> {
        self.state.borrow().cart.clone()
    }

    /// Total item quantity, zero without a cart.
    #[must_use]
    pub fn cart_count(&self) -> i64 {
        self.state.borrow().cart_count()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    #[must_use]
    pub fn status(&self) -> CartStatus {
        self.state.borrow().status()
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Apply one command.
    ///
    /// Network commands hold the flight lock for their whole run; local ones
    /// apply immediately.
    pub async fn dispatch(&self, command: CartCommand) {
        let _flight = if command.is_network() {
            Some(self.flight.lock().await)
        } else {
            None
        };

        match command {
            CartCommand::Init => self.create_if_missing().await,
            CartCommand::Add {
                variant_id,
                quantity,
            } => self.add_line(variant_id, quantity).await,
            CartCommand::UpdateQuantity { line_id, quantity } => {
                self.update_line(line_id, quantity).await;
            }
            CartCommand::Remove { line_id } => self.remove_line(line_id).await,
            CartCommand::Refresh => self.reload().await,
            CartCommand::Clear => self.clear_cart().await,
            CartCommand::ClearError => self.clear_error(),
            CartCommand::OpenSidebar => self.open_sidebar(),
            CartCommand::CloseSidebar => self.close_sidebar(),
            CartCommand::ToggleSidebar => self.toggle_sidebar(),
        }
    }

    /// Create a cart unless one already exists.
    pub async fn init_cart(&self) {
        self.dispatch(CartCommand::Init).await;
    }

    /// Add `quantity` of a variant, creating the cart first if there is none.
    ///
    /// A freshly created cart is kept even when the add itself fails.
    pub async fn add_to_cart(&self, variant_id: VariantId, quantity: i64) {
        self.dispatch(CartCommand::Add {
            variant_id,
            quantity,
        })
        .await;
    }

    /// Set a line's quantity. Does nothing without a cart.
    pub async fn update_quantity(&self, line_id: CartLineId, quantity: i64) {
        self.dispatch(CartCommand::UpdateQuantity { line_id, quantity })
            .await;
    }

    /// Remove a line. Does nothing without a cart.
    pub async fn remove_from_cart(&self, line_id: CartLineId) {
        self.dispatch(CartCommand::Remove { line_id }).await;
    }

    /// Re-read the cart from Shopify, dropping it if Shopify no longer has it.
    pub async fn refresh(&self) {
        self.dispatch(CartCommand::Refresh).await;
    }

    /// Reset every field and delete the persisted cart.
    pub async fn clear_cart(&self) {
        self.state.send_replace(CartState::default());
        if let Err(e) = self.persistence.clear().await {
            warn!(error = %e, "Failed to delete persisted cart");
        }
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }

    pub fn open_sidebar(&self) {
        self.set_open(true);
    }

    pub fn close_sidebar(&self) {
        self.set_open(false);
    }

    pub fn toggle_sidebar(&self) {
        self.state.send_modify(|s| s.is_open = !s.is_open);
    }

    // =========================================================================
    // Internals
    // =========================================================================

    #[instrument(skip(self))]
    async fn create_if_missing(&self) {
        if self.current_cart_id().is_some() {
            return;
        }

        self.begin();
        let result = self.create_and_store().await.map(|_| ());
        self.finish(result);
    }

    #[instrument(skip(self), fields(variant_id = %variant_id))]
    async fn add_line(&self, variant_id: VariantId, quantity: i64) {
        self.begin();
        let result = self.try_add(variant_id, quantity).await;
        self.finish(result);
    }

    #[instrument(skip(self), fields(line_id = %line_id))]
    async fn update_line(&self, line_id: CartLineId, quantity: i64) {
        let Some(cart_id) = self.current_cart_id() else {
            return;
        };

        self.begin();
        let lines = vec![CartLineUpdateInput {
            id: line_id,
            quantity,
        }];
        let result = self.client.update_cart_lines(&cart_id, lines).await;
        self.finish_with_cart(result).await;
    }

    #[instrument(skip(self), fields(line_id = %line_id))]
    async fn remove_line(&self, line_id: CartLineId) {
        let Some(cart_id) = self.current_cart_id() else {
            return;
        };

        self.begin();
        let result = self.client.remove_cart_lines(&cart_id, vec![line_id]).await;
        self.finish_with_cart(result).await;
    }

    #[instrument(skip(self))]
    async fn reload(&self) {
        let Some(cart_id) = self.current_cart_id() else {
            return;
        };

        self.begin();
        let result = match self.client.get_cart(&cart_id).await {
            Ok(cart) => {
                self.store_cart(Some(cart)).await;
                Ok(())
            }
            Err(ShopifyError::NotFound(_)) => {
                debug!(cart_id = %cart_id, "Cart no longer exists, dropping it");
                self.store_cart(None).await;
                Ok(())
            }
            Err(e) => Err(e),
        };
        self.finish(result);
    }

    async fn create_and_store(&self) -> Result<CartId, ShopifyError> {
        let cart = self.client.create_cart(Vec::new()).await?;
        let id = cart.id.clone();
        debug!(cart_id = %id, "Created cart");
        self.store_cart(Some(cart)).await;
        Ok(id)
    }

    async fn try_add(&self, variant_id: VariantId, quantity: i64) -> Result<(), ShopifyError> {
        let cart_id = match self.current_cart_id() {
            Some(id) => id,
            None => self.create_and_store().await?,
        };

        let lines = vec![CartLineInput::new(variant_id, quantity)];
        let cart = self.client.add_to_cart(&cart_id, lines).await?;
        self.store_cart(Some(cart)).await;
        Ok(())
    }

    fn set_open(&self, open: bool) {
        self.state.send_modify(|s| s.is_open = open);
    }

    fn current_cart_id(&self) -> Option<CartId> {
        self.state.borrow().cart.as_ref().map(|cart| cart.id.clone())
    }

    fn begin(&self) {
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });
    }

    fn finish(&self, result: Result<(), ShopifyError>) {
        if let Err(e) = &result {
            warn!(error = %e, "Cart command failed");
        }
        self.state.send_modify(|s| {
            s.is_loading = false;
            if let Err(e) = result {
                s.error = Some(e.to_string());
            }
        });
    }

    async fn finish_with_cart(&self, result: Result<Cart, ShopifyError>) {
        match result {
            Ok(cart) => {
                self.store_cart(Some(cart)).await;
                self.finish(Ok(()));
            }
            Err(e) => self.finish(Err(e)),
        }
    }

    /// Replace the cart snapshot and persist it.
    async fn store_cart(&self, cart: Option<Cart>) {
        let entry = PersistedCart { cart: cart.clone() };
        self.state.send_modify(|s| s.cart = cart);
        if let Err(e) = self.persistence.save(&entry).await {
            warn!(error = %e, "Failed to persist cart");
        }
    }
}
