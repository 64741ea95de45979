//! Favorite toggle handler.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use sauda_core::ProductId;

use crate::error::Result;
use crate::middleware::Shopper;
use crate::notify::{FAVORITES_CHANGED_EVENT, event_trigger_header};
use crate::shop::ShopSession;
use crate::state::AppState;

/// Favorite toggle form data.
#[derive(Debug, Deserialize)]
pub struct ToggleFavoriteForm {
    pub product_id: i64,
}

/// Flip a product's favorite membership.
///
/// Membership is read from the freshly loaded favorites mirror and the
/// opposite store operation is issued. The response carries no fragment;
/// the `favorites-changed` trigger makes both grids re-fetch themselves,
/// since catalog cards render their favorite icon from membership.
#[instrument(skip(state))]
pub async fn toggle(
    State(state): State<AppState>,
    Shopper(shopper): Shopper,
    Form(form): Form<ToggleFavoriteForm>,
) -> Result<Response> {
    let mut session = ShopSession::new(shopper);
    session.reload_favorites(state.store()).await?;

    let now_favorite = session
        .toggle_favorite(state.store(), ProductId::new(form.product_id))
        .await?;
    tracing::debug!(product = form.product_id, now_favorite, "favorite toggled");

    let (name, value) = event_trigger_header(FAVORITES_CHANGED_EVENT);
    Ok(([(name, value)], StatusCode::OK).into_response())
}
