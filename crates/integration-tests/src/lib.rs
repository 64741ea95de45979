//! Integration test harness for Sauda.
//!
//! Provides [`MockStore`] - an in-process stand-in for the remote
//! catalog/favorites/cart service, with per-endpoint hit counters - and
//! [`TestContext`], which wires the webapp router to a fresh mock store on
//! ephemeral ports and drives it over HTTP.
//!
//! The mock reproduces the remote service's observable semantics: the
//! add-to-cart quantity is a signed delta applied to the existing line,
//! favorites are deduplicated (`already_exists`), and cart reads compute
//! line totals from the seeded unit prices.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};

use sauda_core::ShopperId;
use sauda_webapp::config::{StoreApiConfig, WebAppConfig};
use sauda_webapp::notify::POPUP_EVENT;
use sauda_webapp::routes;
use sauda_webapp::state::AppState;

// =============================================================================
// Mock remote store
// =============================================================================

/// A seeded catalog product.
#[derive(Debug, Clone)]
pub struct SeedProduct {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub seller_name: String,
}

#[derive(Debug, Clone, Copy)]
struct CartEntry {
    product_id: i64,
    quantity: i64,
}

#[derive(Debug, Default)]
struct MockStoreInner {
    products: Vec<SeedProduct>,
    favorites: HashMap<i64, Vec<i64>>,
    carts: HashMap<i64, Vec<CartEntry>>,
    hits: HashMap<String, usize>,
    fail_clear: bool,
}

/// In-memory mock of the remote store service.
///
/// Cheaply cloneable; all clones share state, so tests keep a handle for
/// seeding and assertions while the spawned router serves requests.
#[derive(Debug, Clone, Default)]
pub struct MockStore {
    inner: Arc<Mutex<MockStoreInner>>,
}

impl MockStore {
    fn lock(&self) -> MutexGuard<'_, MockStoreInner> {
        self.inner.lock().expect("mock store lock poisoned")
    }

    fn record(&self, endpoint: &str) {
        *self.lock().hits.entry(endpoint.to_string()).or_insert(0) += 1;
    }

    /// Add a product to the mock catalog.
    pub fn seed_product(&self, id: i64, name: &str, price: i64, seller_name: &str) {
        self.lock().products.push(SeedProduct {
            id,
            name: name.to_string(),
            price,
            seller_name: seller_name.to_string(),
        });
    }

    /// Make the `/cart/clear` endpoint answer 500 without clearing.
    pub fn set_fail_clear(&self, fail: bool) {
        self.lock().fail_clear = fail;
    }

    /// How many requests hit an endpoint (reads are counted under their
    /// path prefix, e.g. `/cart`; mutations under their full path).
    #[must_use]
    pub fn hits(&self, endpoint: &str) -> usize {
        self.lock().hits.get(endpoint).copied().unwrap_or(0)
    }

    /// Favorite product ids for a shopper, in insertion order.
    #[must_use]
    pub fn favorites_of(&self, shopper: i64) -> Vec<i64> {
        self.lock()
            .favorites
            .get(&shopper)
            .cloned()
            .unwrap_or_default()
    }

    /// Cart lines for a shopper as `(product_id, quantity)` pairs.
    #[must_use]
    pub fn cart_of(&self, shopper: i64) -> Vec<(i64, i64)> {
        self.lock()
            .carts
            .get(&shopper)
            .map(|lines| lines.iter().map(|l| (l.product_id, l.quantity)).collect())
            .unwrap_or_default()
    }

    /// Build the mock service router.
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .route("/catalog", get(catalog))
            .route("/favorites/{user_id}", get(favorites))
            .route("/cart/{user_id}", get(cart))
            .route("/cart/add", post(cart_add))
            .route("/cart/remove", post(cart_remove))
            .route("/cart/clear", post(cart_clear))
            .route("/favorites/add", post(favorite_add))
            .route("/favorites/remove", post(favorite_remove))
            .with_state(self.clone())
    }
}

fn product_json(product: &SeedProduct) -> Value {
    json!({
        "id": product.id,
        "name": product.name,
        "description": null,
        "price": product.price,
        "image_url": null,
        "seller_name": product.seller_name,
    })
}

async fn catalog(State(store): State<MockStore>) -> Json<Value> {
    store.record("/catalog");
    let inner = store.lock();
    let products: Vec<Value> = inner.products.iter().map(product_json).collect();
    Json(json!({ "products": products }))
}

async fn favorites(State(store): State<MockStore>, Path(user_id): Path<i64>) -> Json<Value> {
    store.record("/favorites");
    let inner = store.lock();
    let ids = inner.favorites.get(&user_id).cloned().unwrap_or_default();
    let favorites: Vec<Value> = ids
        .iter()
        .filter_map(|id| inner.products.iter().find(|p| p.id == *id))
        .map(product_json)
        .collect();
    Json(json!({ "favorites": favorites }))
}

async fn cart(State(store): State<MockStore>, Path(user_id): Path<i64>) -> Json<Value> {
    store.record("/cart");
    let inner = store.lock();
    let mut lines = Vec::new();
    let mut total = 0_i64;
    for entry in inner
        .carts
        .get(&user_id)
        .map(Vec::as_slice)
        .unwrap_or_default()
    {
        let Some(product) = inner.products.iter().find(|p| p.id == entry.product_id) else {
            continue;
        };
        let line_total = product.price * entry.quantity;
        total += line_total;
        lines.push(json!({
            "id": product.id,
            "name": product.name,
            "price": product.price,
            "quantity": entry.quantity,
            "total": line_total,
        }));
    }
    Json(json!({ "cart": lines, "total": total }))
}

#[derive(Debug, Deserialize)]
struct CartAddBody {
    user_id: i64,
    product_id: i64,
    quantity: i64,
}

async fn cart_add(State(store): State<MockStore>, Json(body): Json<CartAddBody>) -> Json<Value> {
    store.record("/cart/add");
    let mut inner = store.lock();
    let lines = inner.carts.entry(body.user_id).or_default();
    if let Some(entry) = lines.iter_mut().find(|l| l.product_id == body.product_id) {
        // Delta semantics: the posted quantity adjusts the existing line.
        entry.quantity += body.quantity;
    } else {
        lines.push(CartEntry {
            product_id: body.product_id,
            quantity: body.quantity,
        });
    }
    Json(json!({ "status": "success" }))
}

#[derive(Debug, Deserialize)]
struct LineKeyBody {
    user_id: i64,
    product_id: i64,
}

async fn cart_remove(
    State(store): State<MockStore>,
    Json(body): Json<LineKeyBody>,
) -> Json<Value> {
    store.record("/cart/remove");
    let mut inner = store.lock();
    if let Some(lines) = inner.carts.get_mut(&body.user_id) {
        lines.retain(|l| l.product_id != body.product_id);
    }
    Json(json!({ "status": "success" }))
}

#[derive(Debug, Deserialize)]
struct ShopperBody {
    user_id: i64,
}

async fn cart_clear(State(store): State<MockStore>, Json(body): Json<ShopperBody>) -> Response {
    store.record("/cart/clear");
    let mut inner = store.lock();
    if inner.fail_clear {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "status": "error" })),
        )
            .into_response();
    }
    inner.carts.remove(&body.user_id);
    Json(json!({ "status": "success" })).into_response()
}

async fn favorite_add(
    State(store): State<MockStore>,
    Json(body): Json<LineKeyBody>,
) -> Json<Value> {
    store.record("/favorites/add");
    let mut inner = store.lock();
    let favorites = inner.favorites.entry(body.user_id).or_default();
    if favorites.contains(&body.product_id) {
        return Json(json!({ "status": "already_exists" }));
    }
    favorites.push(body.product_id);
    Json(json!({ "status": "success" }))
}

async fn favorite_remove(
    State(store): State<MockStore>,
    Json(body): Json<LineKeyBody>,
) -> Json<Value> {
    store.record("/favorites/remove");
    let mut inner = store.lock();
    if let Some(favorites) = inner.favorites.get_mut(&body.user_id) {
        favorites.retain(|id| *id != body.product_id);
    }
    Json(json!({ "status": "success" }))
}

// =============================================================================
// Test context
// =============================================================================

/// A webapp instance wired to a fresh mock store, both on ephemeral ports.
pub struct TestContext {
    pub http: reqwest::Client,
    pub webapp_url: String,
    pub store: MockStore,
}

impl TestContext {
    /// Start a mock store and a webapp pointing at it.
    pub async fn new() -> Self {
        let store = MockStore::default();
        let store_url = spawn_server(store.router()).await;

        let config = WebAppConfig {
            host: "127.0.0.1".parse().expect("valid ip"),
            port: 0,
            store: StoreApiConfig {
                base_url: url::Url::parse(&store_url).expect("valid store url"),
            },
            fallback_shopper: ShopperId::new(123_456),
            sentry_dsn: None,
        };
        let app = routes::routes().with_state(AppState::new(config));
        let webapp_url = spawn_server(app).await;

        Self {
            http: reqwest::Client::new(),
            webapp_url,
            store,
        }
    }

    /// Absolute URL for a webapp path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.webapp_url)
    }

    /// GET a webapp path as the given shopper.
    pub async fn get_as(&self, shopper: i64, path: &str) -> reqwest::Response {
        self.http
            .get(self.url(path))
            .header("x-shopper-id", shopper.to_string())
            .send()
            .await
            .expect("GET request failed")
    }

    /// POST a form to a webapp path as the given shopper.
    pub async fn post_form_as(
        &self,
        shopper: i64,
        path: &str,
        form: &[(&str, String)],
    ) -> reqwest::Response {
        self.http
            .post(self.url(path))
            .header("x-shopper-id", shopper.to_string())
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }
}

/// Popup notifications carried on a response, as `(title, message)` pairs.
///
/// Non-popup trigger values (bare event names like `favorites-changed`) are
/// not JSON objects and are ignored.
#[must_use]
pub fn popups(response: &reqwest::Response) -> Vec<(String, String)> {
    response
        .headers()
        .get_all("hx-trigger")
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|raw| serde_json::from_str::<Value>(raw).ok())
        .filter_map(|payload| payload.get(POPUP_EVENT).cloned())
        .map(|popup| {
            (
                popup["title"].as_str().unwrap_or_default().to_string(),
                popup["message"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

/// Bind an ephemeral port and serve the router in the background.
async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind ephemeral port");
    let addr = listener.local_addr().expect("listener has no local addr");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("test server error");
    });
    format!("http://{addr}")
}
