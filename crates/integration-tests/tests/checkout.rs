//! Integration tests for checkout and its notification contract.

use sauda_integration_tests::{TestContext, popups};

const SHOPPER: i64 = 11;

// =============================================================================
// Empty-cart validation
// =============================================================================

#[tokio::test]
async fn test_checkout_empty_cart_shows_one_error_popup_and_no_clear() {
    let ctx = TestContext::new().await;

    let response = ctx.post_form_as(SHOPPER, "/cart/checkout", &[]).await;
    assert_eq!(response.status(), 200);

    let notices = popups(&response);
    assert_eq!(notices.len(), 1, "exactly one notification");
    assert_eq!(
        notices.first(),
        Some(&("Error".to_string(), "Your cart is empty".to_string()))
    );

    // Validation happened locally: the store saw no cart mutation.
    assert_eq!(ctx.store.hits("/cart/clear"), 0);
    assert_eq!(ctx.store.hits("/cart/add"), 0);
    assert_eq!(ctx.store.hits("/cart/remove"), 0);
}

// =============================================================================
// Successful checkout
// =============================================================================

#[tokio::test]
async fn test_checkout_clears_cart_then_confirms() {
    let ctx = TestContext::new().await;
    ctx.store.seed_product(1, "Pen", 500, "Stationery Co");
    ctx.post_form_as(SHOPPER, "/cart/add", &[("product_id", "1".to_string())])
        .await;

    let response = ctx.post_form_as(SHOPPER, "/cart/checkout", &[]).await;
    assert_eq!(response.status(), 200);

    let notices = popups(&response);
    assert_eq!(notices.len(), 1);
    assert_eq!(
        notices.first().map(|(title, _)| title.as_str()),
        Some("Order placed")
    );

    // The remote cart was cleared and the re-rendered panel reflects it.
    assert_eq!(ctx.store.hits("/cart/clear"), 1);
    assert_eq!(ctx.store.cart_of(SHOPPER), Vec::<(i64, i64)>::new());
    let body = response.text().await.expect("body");
    assert!(body.contains("Your cart is empty"));
}

// =============================================================================
// Failed clear
// =============================================================================

#[tokio::test]
async fn test_checkout_failure_shows_failure_popup_not_success() {
    let ctx = TestContext::new().await;
    ctx.store.seed_product(1, "Pen", 500, "Stationery Co");
    ctx.post_form_as(SHOPPER, "/cart/add", &[("product_id", "1".to_string())])
        .await;
    ctx.store.set_fail_clear(true);

    let response = ctx.post_form_as(SHOPPER, "/cart/checkout", &[]).await;
    assert_eq!(response.status(), 502);

    // The success notice is contingent on the clear succeeding; a failed
    // clear produces the generic failure notice instead.
    let notices = popups(&response);
    assert_eq!(notices.len(), 1);
    assert_eq!(
        notices.first(),
        Some(&(
            "Error".to_string(),
            "Something went wrong. Please try again.".to_string()
        ))
    );

    // The cart is untouched.
    assert_eq!(ctx.store.cart_of(SHOPPER), vec![(1, 1)]);
}
