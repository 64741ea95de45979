//! Section navigation: which of the fixed tabs is visible.
//!
//! A deliberately trivial state machine: activating a section marks exactly
//! one section and its tab active and clears all others. The target section
//! is an explicit parameter (query string), not an implicit UI event. No
//! history stack, no deep-linking.

use serde::Deserialize;

/// The fixed set of storefront sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Catalog,
    Favorites,
    Cart,
}

impl Section {
    /// All sections, in display order.
    pub const ALL: [Self; 3] = [Self::Catalog, Self::Favorites, Self::Cart];

    /// Stable name used in DOM ids and query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Favorites => "favorites",
            Self::Cart => "cart",
        }
    }

    /// Human-readable tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Catalog => "🛍 Catalog",
            Self::Favorites => "⭐ Favorites",
            Self::Cart => "🛒 Cart",
        }
    }
}

/// One navigation tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavTab {
    pub section: Section,
    pub active: bool,
}

/// The navigation bar with exactly one active tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavView {
    pub tabs: Vec<NavTab>,
    pub active: Section,
}

impl NavView {
    /// Activate `section`, clearing all others.
    #[must_use]
    pub fn activate(section: Section) -> Self {
        Self {
            tabs: Section::ALL
                .into_iter()
                .map(|s| NavTab {
                    section: s,
                    active: s == section,
                })
                .collect(),
            active: section,
        }
    }
}

impl Default for NavView {
    fn default() -> Self {
        Self::activate(Section::default())
    }
}
