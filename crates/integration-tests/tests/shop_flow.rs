//! Integration tests for the storefront shop flow.
//!
//! Each test boots a fresh webapp + mock store pair and drives the
//! storefront over HTTP, asserting on the rendered fragments and on the
//! store's observed state.

use sauda_integration_tests::TestContext;

const SHOPPER: i64 = 7;

fn seed_pen(ctx: &TestContext) {
    ctx.store.seed_product(1, "Pen", 500, "Stationery Co");
}

// =============================================================================
// Shell page
// =============================================================================

#[tokio::test]
async fn test_home_renders_all_sections() {
    let ctx = TestContext::new().await;
    seed_pen(&ctx);

    let response = ctx.get_as(SHOPPER, "/").await;
    assert_eq!(response.status(), 200);

    let body = response.text().await.expect("body");
    assert!(body.contains("Pen"), "catalog card should be rendered");
    assert!(body.contains("500 ₸"), "price should carry the currency suffix");
    assert!(body.contains("Stationery Co"), "seller should be rendered");
    assert!(body.contains("No favorites yet"), "favorites empty state");
    assert!(body.contains("Your cart is empty"), "cart empty state");
}

#[tokio::test]
async fn test_home_section_query_activates_tab() {
    let ctx = TestContext::new().await;

    let body = ctx
        .get_as(SHOPPER, "/?section=favorites")
        .await
        .text()
        .await
        .expect("body");
    assert!(body.contains(r#"id="section-favorites" class="section active""#));
    assert!(!body.contains(r#"id="section-catalog" class="section active""#));
}

#[tokio::test]
async fn test_empty_catalog_shows_empty_state() {
    let ctx = TestContext::new().await;

    let body = ctx
        .get_as(SHOPPER, "/shop/catalog")
        .await
        .text()
        .await
        .expect("body");
    assert!(body.contains("The catalog is empty"));
}

// =============================================================================
// Cart mutations
// =============================================================================

#[tokio::test]
async fn test_add_to_cart_renders_line_with_total() {
    let ctx = TestContext::new().await;
    seed_pen(&ctx);

    let response = ctx
        .post_form_as(SHOPPER, "/cart/add", &[("product_id", "1".to_string())])
        .await;
    assert_eq!(response.status(), 200);

    let body = response.text().await.expect("body");
    assert!(body.contains("Pen"));
    assert!(body.contains("500 ₸ × 1 = 500 ₸"));
    assert_eq!(ctx.store.cart_of(SHOPPER), vec![(1, 1)]);

    // A second add increments the same line; the delta is applied, not an
    // absolute quantity.
    let body = ctx
        .post_form_as(SHOPPER, "/cart/add", &[("product_id", "1".to_string())])
        .await
        .text()
        .await
        .expect("body");
    assert!(body.contains("500 ₸ × 2 = 1000 ₸"));
    assert!(body.contains("1000 ₸</span>"), "aggregate total is rendered");
    assert_eq!(ctx.store.cart_of(SHOPPER), vec![(1, 2)]);
}

#[tokio::test]
async fn test_update_cart_decrement_to_zero_removes_line() {
    let ctx = TestContext::new().await;
    seed_pen(&ctx);

    ctx.post_form_as(SHOPPER, "/cart/add", &[("product_id", "1".to_string())])
        .await;
    let body = ctx
        .post_form_as(
            SHOPPER,
            "/cart/update",
            &[
                ("product_id", "1".to_string()),
                ("delta", "-1".to_string()),
            ],
        )
        .await
        .text()
        .await
        .expect("body");

    assert!(body.contains("Your cart is empty"));
    assert_eq!(ctx.store.cart_of(SHOPPER), Vec::<(i64, i64)>::new());
    assert_eq!(ctx.store.hits("/cart/remove"), 1, "removal, not a zero-quantity write");
}

#[tokio::test]
async fn test_update_cart_full_quantity_removes_line() {
    let ctx = TestContext::new().await;
    seed_pen(&ctx);

    // Build a quantity-2 line, then remove it in one edit.
    ctx.post_form_as(SHOPPER, "/cart/add", &[("product_id", "1".to_string())])
        .await;
    ctx.post_form_as(SHOPPER, "/cart/add", &[("product_id", "1".to_string())])
        .await;
    ctx.post_form_as(
        SHOPPER,
        "/cart/update",
        &[
            ("product_id", "1".to_string()),
            ("delta", "-2".to_string()),
        ],
    )
    .await;

    assert_eq!(ctx.store.cart_of(SHOPPER), Vec::<(i64, i64)>::new());
}

#[tokio::test]
async fn test_update_cart_increment_applies_delta() {
    let ctx = TestContext::new().await;
    seed_pen(&ctx);

    ctx.post_form_as(SHOPPER, "/cart/add", &[("product_id", "1".to_string())])
        .await;
    let body = ctx
        .post_form_as(
            SHOPPER,
            "/cart/update",
            &[("product_id", "1".to_string()), ("delta", "1".to_string())],
        )
        .await
        .text()
        .await
        .expect("body");

    assert!(body.contains("500 ₸ × 2 = 1000 ₸"));
    assert_eq!(ctx.store.cart_of(SHOPPER), vec![(1, 2)]);
}

#[tokio::test]
async fn test_update_cart_absent_line_is_noop() {
    let ctx = TestContext::new().await;
    seed_pen(&ctx);

    let response = ctx
        .post_form_as(
            SHOPPER,
            "/cart/update",
            &[
                ("product_id", "99".to_string()),
                ("delta", "-1".to_string()),
            ],
        )
        .await;
    assert_eq!(response.status(), 200);

    assert_eq!(ctx.store.hits("/cart/add"), 0);
    assert_eq!(ctx.store.hits("/cart/remove"), 0);
}

#[tokio::test]
async fn test_remove_from_cart_drops_the_line() {
    let ctx = TestContext::new().await;
    seed_pen(&ctx);
    ctx.store.seed_product(2, "Notebook", 1200, "Paper Works");

    ctx.post_form_as(SHOPPER, "/cart/add", &[("product_id", "1".to_string())])
        .await;
    ctx.post_form_as(SHOPPER, "/cart/add", &[("product_id", "2".to_string())])
        .await;
    let body = ctx
        .post_form_as(
            SHOPPER,
            "/cart/remove",
            &[("product_id", "1".to_string())],
        )
        .await
        .text()
        .await
        .expect("body");

    assert!(!body.contains("Pen"));
    assert!(body.contains("Notebook"));
    assert_eq!(ctx.store.cart_of(SHOPPER), vec![(2, 1)]);
}

// =============================================================================
// Favorites
// =============================================================================

#[tokio::test]
async fn test_toggle_favorite_twice_restores_membership() {
    let ctx = TestContext::new().await;
    seed_pen(&ctx);

    let response = ctx
        .post_form_as(
            SHOPPER,
            "/favorites/toggle",
            &[("product_id", "1".to_string())],
        )
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response
            .headers()
            .get("hx-trigger")
            .and_then(|v| v.to_str().ok()),
        Some("favorites-changed")
    );
    assert_eq!(ctx.store.favorites_of(SHOPPER), vec![1]);

    // Toggling again is the inverse operation.
    ctx.post_form_as(
        SHOPPER,
        "/favorites/toggle",
        &[("product_id", "1".to_string())],
    )
    .await;
    assert_eq!(ctx.store.favorites_of(SHOPPER), Vec::<i64>::new());
    assert_eq!(ctx.store.hits("/favorites/add"), 1);
    assert_eq!(ctx.store.hits("/favorites/remove"), 1);
}

#[tokio::test]
async fn test_catalog_favorite_icon_tracks_membership() {
    let ctx = TestContext::new().await;
    seed_pen(&ctx);

    let body = ctx
        .get_as(SHOPPER, "/shop/catalog")
        .await
        .text()
        .await
        .expect("body");
    assert!(body.contains("🤍"));
    assert!(!body.contains("❤️"));

    ctx.post_form_as(
        SHOPPER,
        "/favorites/toggle",
        &[("product_id", "1".to_string())],
    )
    .await;

    // The catalog grid looks membership up in the favorites collection.
    let body = ctx
        .get_as(SHOPPER, "/shop/catalog")
        .await
        .text()
        .await
        .expect("body");
    assert!(body.contains("❤️"));

    let body = ctx
        .get_as(SHOPPER, "/shop/favorites")
        .await
        .text()
        .await
        .expect("body");
    assert!(body.contains("Pen"));
}

// =============================================================================
// Identity fallback
// =============================================================================

#[tokio::test]
async fn test_missing_shopper_header_uses_fallback_identity() {
    let ctx = TestContext::new().await;
    seed_pen(&ctx);

    // No x-shopper-id header at all.
    let response = ctx
        .http
        .post(ctx.url("/cart/add"))
        .form(&[("product_id", "1")])
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 200);

    // The mutation landed on the fallback shopper's cart.
    assert_eq!(ctx.store.cart_of(123_456), vec![(1, 1)]);
}
