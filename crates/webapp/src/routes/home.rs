//! Shell page and product grid fragment handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::Shopper;
use crate::nav::{NavView, Section};
use crate::render::{CartPanelView, GridSource, ProductGridView};
use crate::shop::ShopSession;
use crate::state::AppState;

/// Shell page query parameters.
#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    /// Section to activate; explicit target instead of an implicit UI event.
    pub section: Option<Section>,
}

/// Mini-app shell template: navigation plus all three sections, rendered
/// from a freshly loaded session.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub nav: NavView,
    pub catalog: ProductGridView,
    pub favorites: ProductGridView,
    pub cart: CartPanelView,
}

/// Product grid fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub grid: ProductGridView,
}

/// Display the mini-app shell with all sections populated.
#[instrument(skip(state))]
pub async fn home(
    State(state): State<AppState>,
    Shopper(shopper): Shopper,
    Query(query): Query<HomeQuery>,
) -> Result<HomeTemplate> {
    let mut session = ShopSession::new(shopper);
    session.load(state.store()).await?;

    Ok(HomeTemplate {
        nav: NavView::activate(query.section.unwrap_or_default()),
        catalog: ProductGridView::build(&session.catalog, &session.favorites, GridSource::Catalog),
        favorites: ProductGridView::build(
            &session.favorites,
            &session.favorites,
            GridSource::Favorites,
        ),
        cart: CartPanelView::build(&session.cart),
    })
}

/// Catalog grid fragment.
///
/// Reloads favorites too: catalog cards pick their favorite icon from the
/// favorites collection, not from the list being rendered.
#[instrument(skip(state))]
pub async fn catalog_grid(
    State(state): State<AppState>,
    Shopper(shopper): Shopper,
) -> Result<ProductGridTemplate> {
    let mut session = ShopSession::new(shopper);
    session.reload_favorites_and_catalog(state.store()).await?;

    Ok(ProductGridTemplate {
        grid: ProductGridView::build(&session.catalog, &session.favorites, GridSource::Catalog),
    })
}

/// Favorites grid fragment.
#[instrument(skip(state))]
pub async fn favorites_grid(
    State(state): State<AppState>,
    Shopper(shopper): Shopper,
) -> Result<ProductGridTemplate> {
    let mut session = ShopSession::new(shopper);
    session.reload_favorites(state.store()).await?;

    Ok(ProductGridTemplate {
        grid: ProductGridView::build(&session.favorites, &session.favorites, GridSource::Favorites),
    })
}
