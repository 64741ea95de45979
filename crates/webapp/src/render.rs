//! Pure view-model builders for the storefront fragments.
//!
//! Builders map client state to display data and nothing else: no I/O, no
//! globals, equal inputs produce equal view models. Each rendered fragment
//! fully replaces its display region, so rendering a non-empty list and then
//! an empty one leaves the region in the empty state.

use sauda_core::ProductId;

use crate::store::types::{CartSnapshot, Product};

/// Which collection a product grid is rendering.
///
/// Drives the empty-state icon/message and the fragment's refresh endpoint;
/// it does not affect favorite-icon lookup, which always goes through the
/// favorites collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridSource {
    Catalog,
    Favorites,
}

impl GridSource {
    /// DOM id of the display region this grid replaces.
    #[must_use]
    pub const fn dom_id(self) -> &'static str {
        match self {
            Self::Catalog => "catalog-grid",
            Self::Favorites => "favorites-grid",
        }
    }

    /// Fragment endpoint that re-renders this grid.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Catalog => "/shop/catalog",
            Self::Favorites => "/shop/favorites",
        }
    }

    /// Empty-state icon, distinguished per collection.
    #[must_use]
    pub const fn empty_icon(self) -> &'static str {
        match self {
            Self::Catalog => "📦",
            Self::Favorites => "⭐",
        }
    }

    /// Empty-state message, distinguished per collection.
    #[must_use]
    pub const fn empty_message(self) -> &'static str {
        match self {
            Self::Catalog => "The catalog is empty",
            Self::Favorites => "No favorites yet",
        }
    }
}

/// Product card display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: ProductId,
    pub name: String,
    /// Pre-formatted price with currency suffix.
    pub price: String,
    pub seller: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_favorite: bool,
}

impl ProductCardView {
    /// Icon for the favorite-toggle control.
    #[must_use]
    pub const fn favorite_icon(&self) -> &'static str {
        if self.is_favorite { "❤️" } else { "🤍" }
    }
}

/// Product grid display data for one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductGridView {
    pub source: GridSource,
    pub cards: Vec<ProductCardView>,
}

impl ProductGridView {
    /// Build the grid for `list`.
    ///
    /// Favorite icons are chosen by identifier lookup in `favorites` - the
    /// client-state collection - never in the list being rendered, so the
    /// catalog grid shows correct icons too.
    #[must_use]
    pub fn build(list: &[Product], favorites: &[Product], source: GridSource) -> Self {
        let cards = list
            .iter()
            .map(|product| ProductCardView {
                id: product.id,
                name: product.name.clone(),
                price: product.price.to_string(),
                seller: product.seller_name.clone(),
                description: product.description.clone(),
                image_url: product.image_url.clone(),
                is_favorite: favorites.iter().any(|f| f.id == product.id),
            })
            .collect();
        Self { source, cards }
    }

    /// Whether the empty-state placeholder is shown instead of cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Cart row display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRowView {
    pub id: ProductId,
    pub name: String,
    /// Pre-formatted unit price.
    pub unit_price: String,
    pub quantity: u32,
    /// Pre-formatted line total (unit price × quantity, from the store).
    pub line_total: String,
}

/// Cart panel display data: rows plus the aggregate total, written
/// separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPanelView {
    pub rows: Vec<CartRowView>,
    pub total: String,
}

impl CartPanelView {
    /// Build the panel from a cart snapshot.
    #[must_use]
    pub fn build(cart: &CartSnapshot) -> Self {
        let rows = cart
            .lines
            .iter()
            .map(|line| CartRowView {
                id: line.id,
                name: line.name.clone(),
                unit_price: line.price.to_string(),
                quantity: line.quantity,
                line_total: line.total.to_string(),
            })
            .collect();
        Self {
            rows,
            total: cart.total.to_string(),
        }
    }

    /// Whether the empty-state placeholder is shown instead of rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Empty-state icon.
    #[must_use]
    pub const fn empty_icon(&self) -> &'static str {
        "🛒"
    }

    /// Empty-state message.
    #[must_use]
    pub const fn empty_message(&self) -> &'static str {
        "Your cart is empty"
    }
}
