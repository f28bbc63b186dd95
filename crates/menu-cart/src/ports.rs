//! Capabilities the page supplies to the cart controller.
//!
//! The store never calls these. Only [`CartController`](crate::CartController)
//! does, after the store has finished its own state transition.

use crate::checkout::OrderSummary;

/// Toast-style message sink.
pub trait Notifier {
    fn success(&mut self, message: &str);
    fn error(&mut self, message: &str);
    fn info(&mut self, message: &str);
}

/// The add-to-cart modal and the checkout confirmation prompt.
pub trait Dialog {
    /// Show the add-to-cart modal.
    fn show(&mut self);
    /// Hide the add-to-cart modal.
    fn hide(&mut self);
    /// Ask the customer to confirm an order. `true` means confirmed.
    fn confirm(&mut self, summary: &OrderSummary) -> bool;
}

impl<T: Notifier + ?Sized> Notifier for &mut T {
    fn success(&mut self, message: &str) {
        (**self).success(message)
    }

    fn error(&mut self, message: &str) {
        (**self).error(message)
    }

    fn info(&mut self, message: &str) {
        (**self).info(message)
    }
}

impl<T: Dialog + ?Sized> Dialog for &mut T {
    fn show(&mut self) {
        (**self).show()
    }

    fn hide(&mut self) {
        (**self).hide()
    }

    fn confirm(&mut self, summary: &OrderSummary) -> bool {
        (**self).confirm(summary)
    }
}

/// Notifier that forwards messages to `tracing`, for headless embedders.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&mut self, message: &str) {
        tracing::info!(target: "menu_cart::notify", "{}", message);
    }

    fn error(&mut self, message: &str) {
        tracing::warn!(target: "menu_cart::notify", "{}", message);
    }

    fn info(&mut self, message: &str) {
        tracing::debug!(target: "menu_cart::notify", "{}", message);
    }
}
