//! Cart route handlers.
//!
//! Cart mutations use HTMX fragment swaps: every handler mutates through
//! the remote store, reloads the cart wholesale, and answers with the
//! rebuilt cart panel so the rendered region never diverges from the
//! store's last known state.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use sauda_core::ProductId;

use crate::error::{AppError, Result};
use crate::middleware::Shopper;
use crate::notify::Popup;
use crate::render::CartPanelView;
use crate::shop::{CheckoutError, ShopSession};
use crate::state::AppState;

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i64,
}

/// Quantity adjustment form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i64,
    /// Signed delta (±1 from the cart controls), never an absolute quantity.
    pub delta: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i64,
}

/// Cart panel fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_panel.html")]
pub struct CartPanelTemplate {
    pub cart: CartPanelView,
}

impl CartPanelTemplate {
    fn from_session(session: &ShopSession) -> Self {
        Self {
            cart: CartPanelView::build(&session.cart),
        }
    }
}

/// Cart panel fragment.
#[instrument(skip(state))]
pub async fn panel(
    State(state): State<AppState>,
    Shopper(shopper): Shopper,
) -> Result<CartPanelTemplate> {
    let mut session = ShopSession::new(shopper);
    session.reload_cart(state.store()).await?;
    Ok(CartPanelTemplate::from_session(&session))
}

/// Add one unit of a product to the cart.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Shopper(shopper): Shopper,
    Form(form): Form<AddToCartForm>,
) -> Result<CartPanelTemplate> {
    let mut session = ShopSession::new(shopper);
    session
        .add_to_cart(state.store(), ProductId::new(form.product_id))
        .await?;
    Ok(CartPanelTemplate::from_session(&session))
}

/// Adjust a cart line's quantity by a signed delta.
///
/// The decision (no-op / remove / adjust) is made against the freshly
/// reloaded cart mirror; see [`crate::shop::plan_cart_edit`].
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Shopper(shopper): Shopper,
    Form(form): Form<UpdateCartForm>,
) -> Result<CartPanelTemplate> {
    let mut session = ShopSession::new(shopper);
    session.reload_cart(state.store()).await?;
    session
        .update_cart(state.store(), ProductId::new(form.product_id), form.delta)
        .await?;
    Ok(CartPanelTemplate::from_session(&session))
}

/// Remove a cart line entirely.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Shopper(shopper): Shopper,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<CartPanelTemplate> {
    let mut session = ShopSession::new(shopper);
    session
        .remove_from_cart(state.store(), ProductId::new(form.product_id))
        .await?;
    Ok(CartPanelTemplate::from_session(&session))
}

/// Place the order.
///
/// An empty cart is rejected locally with exactly one error popup and no
/// remote mutation. Otherwise the remote cart is cleared and the success
/// popup is only attached once the clear has succeeded; a failed clear
/// surfaces as a failure popup instead.
#[instrument(skip(state))]
pub async fn checkout(
    State(state): State<AppState>,
    Shopper(shopper): Shopper,
) -> Result<Response> {
    let mut session = ShopSession::new(shopper);
    session.reload_cart(state.store()).await?;

    match session.checkout(state.store()).await {
        Ok(()) => {
            let (name, value) = Popup::order_placed().trigger_header();
            Ok((
                [(name, value)],
                CartPanelTemplate::from_session(&session),
            )
                .into_response())
        }
        Err(CheckoutError::EmptyCart) => {
            let (name, value) = Popup::empty_cart().trigger_header();
            Ok((
                [(name, value)],
                CartPanelTemplate::from_session(&session),
            )
                .into_response())
        }
        Err(CheckoutError::Store(e)) => Err(AppError::Store(e)),
    }
}
