//! Wire types for the remote store API.
//!
//! Shapes mirror the store's JSON payloads exactly; see the endpoint table
//! in [`crate::routes`] consumers and [`super::StoreClient`] for usage.

use serde::{Deserialize, Serialize};

use sauda_core::{Price, ProductId, ShopperId};

/// A purchasable product as listed by the catalog and favorites endpoints.
///
/// Immutable from the client's perspective; only the remote store mutates
/// products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price in minor currency units.
    pub price: Price,
    #[serde(default)]
    pub image_url: Option<String>,
    pub seller_name: String,
}

/// One cart line as returned by the cart endpoint.
///
/// `quantity` is always positive while the line exists; the store removes
/// lines rather than keeping them at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    /// Unit price in minor currency units.
    pub price: Price,
    pub quantity: u32,
    /// Line total as computed by the store (price × quantity).
    pub total: Price,
}

/// The full cart for one shopper: lines plus the aggregate total.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub total: Price,
}

impl CartSnapshot {
    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up a line by product identifier.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }
}

// =============================================================================
// Response envelopes
// =============================================================================

#[derive(Debug, Deserialize)]
pub(super) struct CatalogResponse {
    pub products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FavoritesResponse {
    pub favorites: Vec<Product>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CartResponse {
    pub cart: Vec<CartLine>,
    pub total: Price,
}

/// Mutation endpoints answer `{"status": "success"}` (or `"already_exists"`
/// for a re-added favorite). The body is parsed for well-formedness and
/// otherwise discarded.
#[derive(Debug, Deserialize)]
pub(super) struct StatusResponse {
    #[allow(dead_code)]
    pub status: String,
}

// =============================================================================
// Request bodies
// =============================================================================

#[derive(Debug, Serialize)]
pub(super) struct CartAddRequest {
    pub user_id: ShopperId,
    pub product_id: ProductId,
    /// Signed delta applied to the existing line quantity.
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
pub(super) struct LineKeyRequest {
    pub user_id: ShopperId,
    pub product_id: ProductId,
}

#[derive(Debug, Serialize)]
pub(super) struct ShopperRequest {
    pub user_id: ShopperId,
}
