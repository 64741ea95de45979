//! Per-shopper client state and the interaction operations over it.
//!
//! [`ShopSession`] mirrors the three remote collections (catalog, favorites,
//! cart) for one shopper. It is rebuilt from the store on load and after
//! every mutation the affected collection(s) are reloaded wholesale -
//! reload-after-write trades one extra round trip per mutation for a view
//! that never diverges from the store's last known state. Collections are
//! always replaced, never patched, so the mirror is consistent with the last
//! successful fetch and never with an in-flight mutation.

use thiserror::Error;
use tracing::instrument;

use sauda_core::{ProductId, ShopperId};

use crate::store::types::{CartSnapshot, Product};
use crate::store::{StoreClient, StoreError};

/// Errors from the checkout operation.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Locally validated: checking out an empty cart issues no remote call.
    #[error("cart is empty")]
    EmptyCart,

    /// The remote clear (or the subsequent reload) failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// How a quantity edit maps onto the store API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEdit {
    /// The line does not exist locally; nothing to do, no remote call.
    Skip,
    /// The new quantity would be zero or below; remove the line.
    Remove,
    /// Apply the signed delta to the existing quantity.
    Adjust(i64),
}

/// Decide what a `±delta` edit against the current line quantity means.
///
/// "Set to zero" and genuine removal both take the remove path; a
/// zero-quantity line has no independent meaning.
#[must_use]
pub fn plan_cart_edit(current_quantity: Option<u32>, delta: i64) -> CartEdit {
    match current_quantity {
        None => CartEdit::Skip,
        Some(quantity) => {
            if i64::from(quantity) + delta <= 0 {
                CartEdit::Remove
            } else {
                CartEdit::Adjust(delta)
            }
        }
    }
}

/// In-memory mirror of one shopper's view of the store.
///
/// Created empty at the start of a request, populated by the load
/// operations, and never persisted - the remote store is the sole source of
/// truth.
#[derive(Debug, Clone)]
pub struct ShopSession {
    shopper: ShopperId,
    pub catalog: Vec<Product>,
    pub favorites: Vec<Product>,
    pub cart: CartSnapshot,
}

impl ShopSession {
    /// Create an empty session for one shopper.
    #[must_use]
    pub fn new(shopper: ShopperId) -> Self {
        Self {
            shopper,
            catalog: Vec::new(),
            favorites: Vec::new(),
            cart: CartSnapshot::default(),
        }
    }

    /// The shopper this session belongs to.
    #[must_use]
    pub const fn shopper(&self) -> ShopperId {
        self.shopper
    }

    /// Whether a product is currently in the favorites mirror.
    #[must_use]
    pub fn is_favorite(&self, id: ProductId) -> bool {
        self.favorites.iter().any(|p| p.id == id)
    }

    // =========================================================================
    // Load / reload
    // =========================================================================

    /// Populate all three collections.
    ///
    /// # Errors
    ///
    /// Returns the first [`StoreError`] encountered; the session keeps
    /// whatever loaded before the failure.
    #[instrument(skip(self, store), fields(shopper = %self.shopper))]
    pub async fn load(&mut self, store: &StoreClient) -> Result<(), StoreError> {
        self.reload_catalog(store).await?;
        self.reload_favorites(store).await?;
        self.reload_cart(store).await?;
        Ok(())
    }

    /// Replace the catalog mirror with a fresh fetch.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the fetch fails; the mirror is untouched.
    pub async fn reload_catalog(&mut self, store: &StoreClient) -> Result<(), StoreError> {
        self.catalog = store.fetch_catalog().await?;
        Ok(())
    }

    /// Replace the favorites mirror with a fresh fetch.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the fetch fails; the mirror is untouched.
    pub async fn reload_favorites(&mut self, store: &StoreClient) -> Result<(), StoreError> {
        self.favorites = store.fetch_favorites(self.shopper).await?;
        Ok(())
    }

    /// Replace the cart mirror with a fresh fetch.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the fetch fails; the mirror is untouched.
    pub async fn reload_cart(&mut self, store: &StoreClient) -> Result<(), StoreError> {
        self.cart = store.fetch_cart(self.shopper).await?;
        Ok(())
    }

    /// Reload both collections whose rendering depends on favorite
    /// membership (catalog cards pick their icon from it).
    ///
    /// # Errors
    ///
    /// Returns the first [`StoreError`] encountered.
    pub async fn reload_favorites_and_catalog(
        &mut self,
        store: &StoreClient,
    ) -> Result<(), StoreError> {
        self.reload_favorites(store).await?;
        self.reload_catalog(store).await
    }

    // =========================================================================
    // Interaction operations
    // =========================================================================

    /// Add one unit of a product to the cart, then reload the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the mutation or the reload fails.
    #[instrument(skip(self, store), fields(shopper = %self.shopper, product = %product))]
    pub async fn add_to_cart(
        &mut self,
        store: &StoreClient,
        product: ProductId,
    ) -> Result<(), StoreError> {
        store.add_to_cart(self.shopper, product, 1).await?;
        self.reload_cart(store).await
    }

    /// Adjust a cart line's quantity by a signed delta, then reload the cart.
    ///
    /// The line is looked up in the local mirror: an absent line is a no-op
    /// (no remote call), and an edit that would reach zero or below removes
    /// the line instead of sending the delta.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the mutation or the reload fails.
    #[instrument(skip(self, store), fields(shopper = %self.shopper, product = %product))]
    pub async fn update_cart(
        &mut self,
        store: &StoreClient,
        product: ProductId,
        delta: i64,
    ) -> Result<CartEdit, StoreError> {
        let edit = plan_cart_edit(self.cart.line(product).map(|l| l.quantity), delta);
        match edit {
            CartEdit::Skip => return Ok(edit),
            CartEdit::Remove => store.remove_from_cart(self.shopper, product).await?,
            CartEdit::Adjust(delta) => store.add_to_cart(self.shopper, product, delta).await?,
        }
        self.reload_cart(store).await?;
        Ok(edit)
    }

    /// Remove a cart line entirely, then reload the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the mutation or the reload fails.
    #[instrument(skip(self, store), fields(shopper = %self.shopper, product = %product))]
    pub async fn remove_from_cart(
        &mut self,
        store: &StoreClient,
        product: ProductId,
    ) -> Result<(), StoreError> {
        store.remove_from_cart(self.shopper, product).await?;
        self.reload_cart(store).await
    }

    /// Flip a product's favorite membership, then reload favorites and
    /// catalog. Returns the new membership.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the mutation or a reload fails.
    #[instrument(skip(self, store), fields(shopper = %self.shopper, product = %product))]
    pub async fn toggle_favorite(
        &mut self,
        store: &StoreClient,
        product: ProductId,
    ) -> Result<bool, StoreError> {
        let was_favorite = self.is_favorite(product);
        if was_favorite {
            store.remove_favorite(self.shopper, product).await?;
        } else {
            store.add_favorite(self.shopper, product).await?;
        }
        self.reload_favorites_and_catalog(store).await?;
        Ok(!was_favorite)
    }

    /// Place the order: clear the remote cart and reload it.
    ///
    /// An empty cart fails validation locally before any remote call. The
    /// caller must only announce success after this returns `Ok` - the
    /// success notice is contingent on the clear actually succeeding.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] for an empty cart, or a wrapped
    /// [`StoreError`] if the clear or the reload fails.
    #[instrument(skip(self, store), fields(shopper = %self.shopper))]
    pub async fn checkout(&mut self, store: &StoreClient) -> Result<(), CheckoutError> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        store.clear_cart(self.shopper).await?;
        self.reload_cart(store).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreApiConfig;

    /// A client whose every request fails: proves an operation made no call.
    fn unreachable_store() -> StoreClient {
        let config = StoreApiConfig {
            base_url: url::Url::parse("http://127.0.0.1:1").expect("valid url"),
        };
        StoreClient::new(&config)
    }

    #[test]
    fn test_plan_cart_edit_absent_line_is_noop() {
        assert_eq!(plan_cart_edit(None, 1), CartEdit::Skip);
        assert_eq!(plan_cart_edit(None, -1), CartEdit::Skip);
    }

    #[test]
    fn test_plan_cart_edit_decrement_to_zero_removes() {
        assert_eq!(plan_cart_edit(Some(1), -1), CartEdit::Remove);
        assert_eq!(plan_cart_edit(Some(3), -3), CartEdit::Remove);
        assert_eq!(plan_cart_edit(Some(2), -5), CartEdit::Remove);
    }

    #[test]
    fn test_plan_cart_edit_forwards_delta_not_absolute() {
        assert_eq!(plan_cart_edit(Some(2), -1), CartEdit::Adjust(-1));
        assert_eq!(plan_cart_edit(Some(2), 1), CartEdit::Adjust(1));
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_issues_no_remote_call() {
        // The store client points at an unreachable address: if checkout
        // attempted any request this would surface as a Store error rather
        // than EmptyCart.
        let store = unreachable_store();
        let mut session = ShopSession::new(ShopperId::new(1));
        let result = session.checkout(&store).await;
        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[tokio::test]
    async fn test_update_cart_absent_line_issues_no_remote_call() {
        let store = unreachable_store();
        let mut session = ShopSession::new(ShopperId::new(1));
        let edit = session
            .update_cart(&store, ProductId::new(9), -1)
            .await
            .expect("no-op must not touch the store");
        assert_eq!(edit, CartEdit::Skip);
    }
}
