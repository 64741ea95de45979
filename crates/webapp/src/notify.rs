//! Host-platform notifications.
//!
//! The chat platform exposes a modal popup (title + message). The server
//! cannot call the platform SDK directly, so a popup rides on the response
//! as an `HX-Trigger` event; the front-end shim listens for it and forwards
//! the payload to the SDK. Per the storefront contract, popups are raised
//! for checkout success/failure and for generic store-failure notices.

use serde::Serialize;

/// `HX-Trigger` event name the shim listens for.
pub const POPUP_EVENT: &str = "sauda:popup";

/// Event fired when favorites changed, so the sibling grid refreshes.
pub const FAVORITES_CHANGED_EVENT: &str = "favorites-changed";

/// Header name for HTMX trigger events.
pub const TRIGGER_HEADER: &str = "HX-Trigger";

/// A host-platform popup with title and message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Popup {
    pub title: String,
    pub message: String,
}

impl Popup {
    /// Build a popup with an arbitrary title and message.
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Checkout confirmation. Only shown after the remote clear succeeded.
    #[must_use]
    pub fn order_placed() -> Self {
        Self::new(
            "Order placed",
            "Thanks for your purchase! It will be processed shortly.",
        )
    }

    /// Checkout rejected locally: nothing to order.
    #[must_use]
    pub fn empty_cart() -> Self {
        Self::new("Error", "Your cart is empty")
    }

    /// Generic failure notice for store/network errors.
    #[must_use]
    pub fn store_failure() -> Self {
        Self::new("Error", "Something went wrong. Please try again.")
    }

    /// The `HX-Trigger` header pair carrying this popup.
    ///
    /// The payload is JSON keyed by [`POPUP_EVENT`]; popup text is plain
    /// ASCII so the value is always a valid header.
    #[must_use]
    pub fn trigger_header(&self) -> (&'static str, String) {
        let payload = serde_json::json!({ POPUP_EVENT: self });
        (TRIGGER_HEADER, payload.to_string())
    }
}

/// The `HX-Trigger` header pair for a bare named event.
#[must_use]
pub fn event_trigger_header(event: &str) -> (&'static str, String) {
    (TRIGGER_HEADER, event.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_header_carries_popup_payload() {
        let (name, value) = Popup::empty_cart().trigger_header();
        assert_eq!(name, "HX-Trigger");
        let payload: serde_json::Value = serde_json::from_str(&value).expect("valid json");
        assert_eq!(payload[POPUP_EVENT]["title"], "Error");
        assert_eq!(payload[POPUP_EVENT]["message"], "Your cart is empty");
    }

    #[test]
    fn test_trigger_header_value_is_ascii() {
        for popup in [
            Popup::order_placed(),
            Popup::empty_cart(),
            Popup::store_failure(),
        ] {
            let (_, value) = popup.trigger_header();
            assert!(value.is_ascii(), "header value must be ASCII: {value}");
        }
    }
}
