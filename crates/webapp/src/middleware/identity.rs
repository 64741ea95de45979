//! Shopper identity extractor.
//!
//! The chat platform hands the mini-app a user identifier; the front-end
//! shim forwards it on every request as the `x-shopper-id` header. When the
//! header is absent or unparsable (e.g., the page opened outside the
//! platform), the configured fallback identifier is used instead. Anonymous
//! sessions sharing the fallback therefore share one cart; hardening that is
//! out of scope.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;

use sauda_core::ShopperId;

use crate::state::AppState;

/// Header carrying the platform-supplied shopper identifier.
pub const SHOPPER_ID_HEADER: &str = "x-shopper-id";

/// The shopper a request acts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shopper(pub ShopperId);

impl FromRequestParts<AppState> for Shopper {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(shopper_from_headers(
            &parts.headers,
            state.config().fallback_shopper,
        )))
    }
}

/// Resolve the shopper id from headers, falling back to the configured
/// constant.
fn shopper_from_headers(headers: &HeaderMap, fallback: ShopperId) -> ShopperId {
    headers
        .get(SHOPPER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.parse::<i64>().ok())
        .map_or(fallback, ShopperId::new)
}
