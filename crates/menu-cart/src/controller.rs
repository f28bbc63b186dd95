//! Cart controller: the page's event handlers.
//!
//! Owns the [`CartStore`] together with the injected [`Notifier`] and
//! [`Dialog`]. Each handler runs one store operation, reports the outcome,
//! and returns a freshly rendered [`CartViewModel`].

use crate::cart::{CartStore, NewLineItem};
use crate::config::{CartConfig, UiConfig};
use crate::error::CartError;
use crate::ids::LineKey;
use crate::menu::{parse_quantity_input, MenuItem};
use crate::ports::{Dialog, Notifier};
use crate::view::{render, CartViewModel};
use tracing::debug;

pub struct CartController<N, D> {
    store: CartStore,
    notifier: N,
    dialog: D,
    ui: UiConfig,
    cart_open: bool,
    modal_open: bool,
    selected: Option<MenuItem>,
}

impl<N: Notifier, D: Dialog> CartController<N, D> {
    /// Controller around an empty default cart.
    pub fn new(notifier: N, dialog: D) -> Self {
        Self::with_store(CartStore::new(), UiConfig::default(), notifier, dialog)
    }

    /// Controller around an empty cart built from `config`.
    pub fn from_config(config: &CartConfig, notifier: N, dialog: D) -> Self {
        Self::with_store(CartStore::from_config(config), config.ui.clone(), notifier, dialog)
    }

    /// Controller around an existing store.
    pub fn with_store(store: CartStore, ui: UiConfig, notifier: N, dialog: D) -> Self {
        Self {
            store,
            notifier,
            dialog,
            ui,
            cart_open: false,
            modal_open: false,
            selected: None,
        }
    }

    /// Open the add-to-cart modal for a menu item.
    pub fn select_item(&mut self, item: MenuItem) -> CartViewModel {
        debug!(item_id = %item.id, "add-to-cart modal opened");
        self.selected = Some(item);
        self.modal_open = true;
        self.dialog.show();
        self.view()
    }

    /// Close the modal without adding anything.
    pub fn cancel_add(&mut self) -> CartViewModel {
        self.close_modal();
        self.view()
    }

    /// Confirm the modal: add the selected item with the typed quantity and note.
    pub fn confirm_add(&mut self, quantity_input: &str, note: &str) -> CartViewModel {
        let Some(item) = self.selected.clone() else {
            self.notifier.error("No menu item selected");
            return self.view();
        };

        let quantity = parse_quantity_input(quantity_input);
        if self.add_line(item.to_line(quantity, Some(note))).is_ok() {
            self.close_modal();
        }
        self.view()
    }

    /// Add a menu item directly, clamping the quantity to at least one.
    pub fn add_item(
        &mut self,
        item: &MenuItem,
        quantity: i64,
        note: Option<&str>,
    ) -> CartViewModel {
        match self.add_line(item.to_line(quantity.max(1), note)) {
            Ok(key) => debug!(key = %key, "item added"),
            Err(e) => debug!(item_id = %item.id, error = %e, "add rejected"),
        }
        self.view()
    }

    fn add_line(&mut self, line: NewLineItem) -> Result<LineKey, CartError> {
        let name = line.name.clone();
        let quantity = line.quantity;
        match self.store.add_item(line) {
            Ok(key) => {
                self.notifier
                    .success(&format!("Added {} x{} to your cart", name, quantity));
                if self.ui.open_cart_on_add {
                    self.cart_open = true;
                }
                Ok(key)
            }
            Err(e) => {
                self.notifier.error(&e.to_string());
                Err(e)
            }
        }
    }

    pub fn increment(&mut self, key: &LineKey) -> CartViewModel {
        self.store.change_quantity(key, 1);
        self.view()
    }

    /// Minus control; stays at one rather than removing the line.
    pub fn decrement(&mut self, key: &LineKey) -> CartViewModel {
        self.store.change_quantity(key, -1);
        self.view()
    }

    pub fn remove(&mut self, key: &LineKey) -> CartViewModel {
        if let Some(name) = self.store.get(key).map(|l| l.name.clone()) {
            self.store.remove_item(key);
            self.notifier.info(&format!("Removed {} from your cart", name));
        }
        self.view()
    }

    pub fn apply_promo(&mut self, code: &str) -> CartViewModel {
        let outcome = self.store.apply_promo(code);
        if outcome.is_applied() {
            self.notifier.success(&outcome.message());
        } else {
            self.notifier.error(&outcome.message());
        }
        self.view()
    }

    /// Show the order summary and, if confirmed, empty the cart.
    pub fn checkout(&mut self) -> CartViewModel {
        let summary = match self.store.checkout() {
            Ok(summary) => summary,
            Err(CartError::EmptyCart) => {
                self.notifier.error("Your cart is empty");
                return self.view();
            }
            Err(e) => {
                self.notifier.error(&e.to_string());
                return self.view();
            }
        };

        if !self.dialog.confirm(&summary) {
            self.notifier.info("Checkout cancelled");
            return self.view();
        }

        match self.store.confirm_checkout(&summary) {
            Ok(()) => {
                self.notifier.success(&format!(
                    "Order placed! Total: {}",
                    summary.grand_total().display()
                ));
                if self.ui.close_cart_on_checkout {
                    self.cart_open = false;
                }
            }
            Err(e) => self.notifier.error(&e.to_string()),
        }
        self.view()
    }

    pub fn open_cart(&mut self) -> CartViewModel {
        self.cart_open = true;
        self.view()
    }

    pub fn close_cart(&mut self) -> CartViewModel {
        self.cart_open = false;
        self.view()
    }

    pub fn toggle_cart(&mut self) -> CartViewModel {
        self.cart_open = !self.cart_open;
        self.view()
    }

    /// Escape key: close the cart panel and the add-to-cart modal.
    pub fn escape(&mut self) -> CartViewModel {
        self.cart_open = false;
        if self.modal_open {
            self.close_modal();
        }
        self.view()
    }

    fn close_modal(&mut self) {
        self.modal_open = false;
        self.selected = None;
        self.dialog.hide();
    }

    /// Current view-model.
    pub fn view(&self) -> CartViewModel {
        render(&self.store)
    }

    pub fn store(&self) -> &CartStore {
        &self.store
    }

    pub fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn selected_item(&self) -> Option<&MenuItem> {
        self.selected.as_ref()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn dialog(&self) -> &D {
        &self.dialog
    }

    /// Give back the injected capabilities and the store.
    pub fn into_parts(self) -> (CartStore, N, D) {
        (self.store, self.notifier, self.dialog)
    }
}
