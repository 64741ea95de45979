//! Remote store API client implementation.
//!
//! Wraps the catalog, favorites, and cart resources of the remote store
//! behind typed request/response methods over `reqwest`. One HTTP request
//! per call, no retries, no caching: after every mutation the caller reloads
//! the affected collection(s) wholesale (see [`crate::shop`]).

pub mod types;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use sauda_core::{ProductId, ShopperId};

use crate::config::StoreApiConfig;
use types::{
    CartAddRequest, CartResponse, CartSnapshot, CatalogResponse, FavoritesResponse,
    LineKeyRequest, Product, ShopperRequest, StatusResponse,
};

/// Longest response-body snippet carried inside an error or log line.
const BODY_SNIPPET_LEN: usize = 200;

/// Errors that can occur when talking to the remote store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request failed to complete (DNS, connect, or transport failure).
    #[error("store request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON shape.
    #[error("failed to decode store response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the remote store API.
///
/// Cheaply cloneable; all clones share one connection pool.
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<StoreClientInner>,
}

struct StoreClientInner {
    client: reqwest::Client,
    /// Base URL without a trailing slash, validated at config load.
    base_url: String,
}

impl StoreClient {
    /// Create a new store API client.
    #[must_use]
    pub fn new(config: &StoreApiConfig) -> Self {
        let base_url = config.base_url.as_str().trim_end_matches('/').to_string();
        Self {
            inner: Arc::new(StoreClientInner {
                client: reqwest::Client::new(),
                base_url,
            }),
        }
    }

    /// Issue a GET and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, StoreError> {
        let url = format!("{}{path}", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;
        Self::decode(response).await
    }

    /// Issue a POST with a JSON body and decode the status envelope.
    async fn post_json(&self, path: &str, body: &impl Serialize) -> Result<(), StoreError> {
        let url = format!("{}{path}", self.inner.base_url);
        let response = self.inner.client.post(&url).json(body).send().await?;
        let _envelope: StatusResponse = Self::decode(response).await?;
        Ok(())
    }

    /// Check the status and parse the body.
    ///
    /// The body is read as text first so a malformed payload can be logged
    /// with a snippet instead of vanishing into a bare decode error.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StoreError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %snippet(&body),
                "store returned non-success status"
            );
            return Err(StoreError::Status {
                status: status.as_u16(),
                body: snippet(&body),
            });
        }

        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %snippet(&body),
                    "failed to parse store response"
                );
                Err(StoreError::Parse(e))
            }
        }
    }

    // =========================================================================
    // Read endpoints
    // =========================================================================

    /// Fetch the full catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or response decoding fails.
    #[instrument(skip(self))]
    pub async fn fetch_catalog(&self) -> Result<Vec<Product>, StoreError> {
        let response: CatalogResponse = self.get_json("/catalog").await?;
        Ok(response.products)
    }

    /// Fetch one shopper's favorites.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or response decoding fails.
    #[instrument(skip(self), fields(shopper = %shopper))]
    pub async fn fetch_favorites(&self, shopper: ShopperId) -> Result<Vec<Product>, StoreError> {
        let response: FavoritesResponse = self.get_json(&format!("/favorites/{shopper}")).await?;
        Ok(response.favorites)
    }

    /// Fetch one shopper's cart with its aggregate total.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or response decoding fails.
    #[instrument(skip(self), fields(shopper = %shopper))]
    pub async fn fetch_cart(&self, shopper: ShopperId) -> Result<CartSnapshot, StoreError> {
        let response: CartResponse = self.get_json(&format!("/cart/{shopper}")).await?;
        Ok(CartSnapshot {
            lines: response.cart,
            total: response.total,
        })
    }

    // =========================================================================
    // Mutation endpoints
    // =========================================================================

    /// Add to (or adjust) a cart line.
    ///
    /// `delta` is always a signed delta applied by the store to the existing
    /// line quantity: `1` for a fresh add, `±1` for increments and decrements
    /// from the cart view. It is never an absolute quantity. A line that
    /// would drop to zero must instead be removed via
    /// [`Self::remove_from_cart`]; callers decide (see
    /// [`crate::shop::plan_cart_edit`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the request or response decoding fails.
    #[instrument(skip(self), fields(shopper = %shopper, product = %product))]
    pub async fn add_to_cart(
        &self,
        shopper: ShopperId,
        product: ProductId,
        delta: i64,
    ) -> Result<(), StoreError> {
        self.post_json(
            "/cart/add",
            &CartAddRequest {
                user_id: shopper,
                product_id: product,
                quantity: delta,
            },
        )
        .await
    }

    /// Remove a cart line entirely, regardless of quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or response decoding fails.
    #[instrument(skip(self), fields(shopper = %shopper, product = %product))]
    pub async fn remove_from_cart(
        &self,
        shopper: ShopperId,
        product: ProductId,
    ) -> Result<(), StoreError> {
        self.post_json(
            "/cart/remove",
            &LineKeyRequest {
                user_id: shopper,
                product_id: product,
            },
        )
        .await
    }

    /// Clear the shopper's whole cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or response decoding fails.
    #[instrument(skip(self), fields(shopper = %shopper))]
    pub async fn clear_cart(&self, shopper: ShopperId) -> Result<(), StoreError> {
        self.post_json("/cart/clear", &ShopperRequest { user_id: shopper })
            .await
    }

    /// Mark a product as a favorite.
    ///
    /// Re-adding an existing favorite is accepted by the store
    /// (`already_exists` envelope), so racing toggles stay idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or response decoding fails.
    #[instrument(skip(self), fields(shopper = %shopper, product = %product))]
    pub async fn add_favorite(
        &self,
        shopper: ShopperId,
        product: ProductId,
    ) -> Result<(), StoreError> {
        self.post_json(
            "/favorites/add",
            &LineKeyRequest {
                user_id: shopper,
                product_id: product,
            },
        )
        .await
    }

    /// Remove a product from the favorites.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or response decoding fails.
    #[instrument(skip(self), fields(shopper = %shopper, product = %product))]
    pub async fn remove_favorite(
        &self,
        shopper: ShopperId,
        product: ProductId,
    ) -> Result<(), StoreError> {
        self.post_json(
            "/favorites/remove",
            &LineKeyRequest {
                user_id: shopper,
                product_id: product,
            },
        )
        .await
    }
}

/// Truncate a response body for logs and error messages.
fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = StoreError::Status {
            status: 503,
            body: "upstream down".to_string(),
        };
        assert_eq!(err.to_string(), "store returned HTTP 503: upstream down");
    }

    #[test]
    fn test_snippet_truncates_long_bodies() {
        let body = "x".repeat(BODY_SNIPPET_LEN * 2);
        assert_eq!(snippet(&body).len(), BODY_SNIPPET_LEN);
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let config = StoreApiConfig {
            base_url: url::Url::parse("http://localhost:8000/").expect("valid url"),
        };
        let client = StoreClient::new(&config);
        assert_eq!(client.inner.base_url, "http://localhost:8000");
    }
}
