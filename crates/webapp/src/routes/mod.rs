//! HTTP route handlers for the mini-app storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Mini-app shell (?section= selects the active tab)
//! GET  /health            - Health check (wired in main)
//!
//! # Shop (HTMX fragments)
//! GET  /shop/catalog      - Catalog grid fragment
//! GET  /shop/favorites    - Favorites grid fragment
//!
//! # Cart (HTMX fragments)
//! GET  /cart              - Cart panel fragment
//! POST /cart/add          - Add one unit (returns cart panel)
//! POST /cart/update       - Adjust quantity by ±delta (returns cart panel)
//! POST /cart/remove       - Remove line (returns cart panel)
//! POST /cart/checkout     - Validate, clear remote cart, popup
//!
//! # Favorites
//! POST /favorites/toggle  - Flip membership (triggers grid refreshes)
//! ```

pub mod cart;
pub mod favorites;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the shop fragment routes router.
pub fn shop_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(home::catalog_grid))
        .route("/favorites", get(home::favorites_grid))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::panel))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/checkout", post(cart::checkout))
}

/// Create the favorites routes router.
pub fn favorite_routes() -> Router<AppState> {
    Router::new().route("/toggle", post(favorites::toggle))
}

/// Create all routes for the webapp.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Mini-app shell
        .route("/", get(home::home))
        // Section fragments
        .nest("/shop", shop_routes())
        // Cart fragments and mutations
        .nest("/cart", cart_routes())
        // Favorite mutations
        .nest("/favorites", favorite_routes())
}
