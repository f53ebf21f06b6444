//! Event dispatcher for the single-page shop.
//!
//! [`Shop`] owns the cart, the visible screen and the checkout draft, and maps
//! each input [`Event`] to the operation that handles it. Every dispatch runs
//! to completion and reports an [`Outcome`] so the presentation layer knows
//! what to re-render.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::checkout::{CheckoutError, CheckoutForm, OrderSink, OrderSnapshot};
use crate::types::{OrderId, ProductId};
use crate::view::{Navigation, ViewController, ViewState};

/// Input events accepted by the shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    AddProduct(ProductId),
    RemoveProduct(ProductId),
    RequestCheckout,
    Back,
    SubmitOrder(CheckoutForm),
    ShopAgain,
}

impl Event {
    /// Stable name for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddProduct(_) => "add_product",
            Self::RemoveProduct(_) => "remove_product",
            Self::RequestCheckout => "request_checkout",
            Self::Back => "back",
            Self::SubmitOrder(_) => "submit_order",
            Self::ShopAgain => "shop_again",
        }
    }
}

/// What a dispatched event changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed.
    Unchanged,
    /// Cart contents changed; the cart needs re-rendering.
    CartChanged,
    /// A different screen is now visible.
    ViewChanged(ViewState),
    /// Checkout succeeded: snapshot emitted, cart cleared, confirmation shown.
    OrderPlaced(OrderId),
    /// Checkout form failed validation; the user stays on the form.
    Rejected(CheckoutError),
}

impl Outcome {
    /// Whether the presentation layer has anything to redraw.
    #[must_use]
    pub const fn needs_render(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Everything the shop remembers between events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopState {
    #[serde(default)]
    pub cart: Cart,
    #[serde(default)]
    pub view: ViewController,
    /// Checkout input kept after a rejected submission.
    #[serde(default)]
    pub form: CheckoutForm,
    /// Order shown on the confirmation screen.
    #[serde(default)]
    pub last_order: Option<OrderId>,
}

/// Owns shop state and routes events to the cart, checkout and view.
pub struct Shop<'a> {
    catalog: &'a Catalog,
    sink: &'a dyn OrderSink,
    state: ShopState,
}

impl<'a> Shop<'a> {
    /// Start a fresh session: empty cart, browsing screen.
    #[must_use]
    pub fn new(catalog: &'a Catalog, sink: &'a dyn OrderSink) -> Self {
        Self::with_state(catalog, sink, ShopState::default())
    }

    /// Resume from previously saved state.
    #[must_use]
    pub const fn with_state(
        catalog: &'a Catalog,
        sink: &'a dyn OrderSink,
        state: ShopState,
    ) -> Self {
        Self {
            catalog,
            sink,
            state,
        }
    }

    /// Handle one input event.
    pub fn dispatch(&mut self, event: Event) -> Outcome {
        let kind = event.kind();
        let outcome = match event {
            Event::AddProduct(id) => self.add_item(id),
            Event::RemoveProduct(id) => self.remove_item(id),
            Event::RequestCheckout => self.navigate(Navigation::RequestCheckout),
            Event::Back => self.navigate(Navigation::Back),
            Event::SubmitOrder(form) => self.submit(form),
            Event::ShopAgain => {
                let outcome = self.navigate(Navigation::ShopAgain);
                if outcome.needs_render() {
                    self.state.last_order = None;
                }
                outcome
            }
        };
        tracing::debug!(event = kind, ?outcome, view = %self.view(), "event dispatched");
        outcome
    }

    /// Cart edits are only accepted on the browsing screen, where the cart is
    /// shown.
    fn add_item(&mut self, id: ProductId) -> Outcome {
        if self.view() != ViewState::Browsing {
            return Outcome::Unchanged;
        }
        if self.state.cart.add_item(self.catalog, id) {
            Outcome::CartChanged
        } else {
            Outcome::Unchanged
        }
    }

    fn remove_item(&mut self, id: ProductId) -> Outcome {
        if self.view() != ViewState::Browsing {
            return Outcome::Unchanged;
        }
        if self.state.cart.remove_item(id) {
            Outcome::CartChanged
        } else {
            Outcome::Unchanged
        }
    }

    fn navigate(&mut self, navigation: Navigation) -> Outcome {
        self.state
            .view
            .navigate(navigation, self.state.cart.is_empty())
            .map_or(Outcome::Unchanged, Outcome::ViewChanged)
    }

    fn submit(&mut self, form: CheckoutForm) -> Outcome {
        if self.view() != ViewState::Checkout || self.state.cart.is_empty() {
            return Outcome::Unchanged;
        }

        if let Err(err) = form.validate() {
            self.state.form = form;
            return Outcome::Rejected(err);
        }

        let snapshot = OrderSnapshot::capture(&form, &self.state.cart);
        self.sink.emit(&snapshot);

        self.state.cart.clear();
        self.state.form = CheckoutForm::default();
        self.state.last_order = Some(snapshot.order_id);
        self.state
            .view
            .navigate(Navigation::OrderConfirmed, self.state.cart.is_empty());

        Outcome::OrderPlaced(snapshot.order_id)
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.state.cart
    }

    /// The visible screen.
    #[must_use]
    pub const fn view(&self) -> ViewState {
        self.state.view.current()
    }

    /// Draft checkout input.
    #[must_use]
    pub const fn form(&self) -> &CheckoutForm {
        &self.state.form
    }

    #[must_use]
    pub const fn last_order(&self) -> Option<OrderId> {
        self.state.last_order
    }

    #[must_use]
    pub const fn state(&self) -> &ShopState {
        &self.state
    }

    /// Give up the shop, keeping its state for the next event.
    #[must_use]
    pub fn into_state(self) -> ShopState {
        self.state
    }
}

impl core::fmt::Debug for Shop<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Shop")
            .field("catalog_len", &self.catalog.len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::checkout::MemorySink;

    fn id(n: i32) -> ProductId {
        ProductId::new(n)
    }

    fn form(name: &str, email: &str) -> CheckoutForm {
        CheckoutForm {
            name: name.to_string(),
            email: email.to_string(),
            address: "Calle Falsa 123".to_string(),
        }
    }

    fn quantities(shop: &Shop<'_>) -> Vec<(i32, u32)> {
        shop.cart()
            .lines()
            .iter()
            .map(|l| (l.product_id.as_i32(), l.quantity))
            .collect()
    }

    #[test]
    fn test_add_product_event() {
        let catalog = Catalog::builtin();
        let sink = MemorySink::new();
        let mut shop = Shop::new(&catalog, &sink);

        assert_eq!(shop.dispatch(Event::AddProduct(id(1))), Outcome::CartChanged);
        assert_eq!(quantities(&shop), vec![(1, 1)]);
        assert_eq!(shop.cart().total().display(), "$19.99");
    }

    #[test]
    fn test_unknown_product_events_are_unchanged() {
        let catalog = Catalog::builtin();
        let sink = MemorySink::new();
        let mut shop = Shop::new(&catalog, &sink);

        assert_eq!(shop.dispatch(Event::AddProduct(id(77))), Outcome::Unchanged);
        assert_eq!(shop.dispatch(Event::RemoveProduct(id(1))), Outcome::Unchanged);
        assert!(shop.cart().is_empty());
    }

    #[test]
    fn test_checkout_blocked_with_empty_cart() {
        let catalog = Catalog::builtin();
        let sink = MemorySink::new();
        let mut shop = Shop::new(&catalog, &sink);

        assert_eq!(shop.dispatch(Event::RequestCheckout), Outcome::Unchanged);
        assert_eq!(shop.view(), ViewState::Browsing);

        shop.dispatch(Event::AddProduct(id(1)));
        shop.dispatch(Event::RemoveProduct(id(1)));
        assert_eq!(shop.dispatch(Event::RequestCheckout), Outcome::Unchanged);
        assert_eq!(shop.view(), ViewState::Browsing);
    }

    #[test]
    fn test_back_keeps_cart() {
        let catalog = Catalog::builtin();
        let sink = MemorySink::new();
        let mut shop = Shop::new(&catalog, &sink);

        shop.dispatch(Event::AddProduct(id(4)));
        assert_eq!(
            shop.dispatch(Event::RequestCheckout),
            Outcome::ViewChanged(ViewState::Checkout)
        );
        assert_eq!(
            shop.dispatch(Event::Back),
            Outcome::ViewChanged(ViewState::Browsing)
        );
        assert_eq!(quantities(&shop), vec![(4, 1)]);
    }

    #[test]
    fn test_rejected_submission_changes_nothing() {
        let catalog = Catalog::builtin();
        let sink = MemorySink::new();
        let mut shop = Shop::new(&catalog, &sink);

        shop.dispatch(Event::AddProduct(id(2)));
        shop.dispatch(Event::AddProduct(id(3)));
        shop.dispatch(Event::RequestCheckout);

        let outcome = shop.dispatch(Event::SubmitOrder(form("", "a@b.com")));
        assert!(matches!(outcome, Outcome::Rejected(_)));
        assert_eq!(quantities(&shop), vec![(2, 1), (3, 1)]);
        assert_eq!(shop.view(), ViewState::Checkout);
        assert!(sink.is_empty());
        // Draft is kept so the form can be corrected.
        assert_eq!(shop.form().email, "a@b.com");
    }

    #[test]
    fn test_successful_submission() {
        let catalog = Catalog::builtin();
        let sink = MemorySink::new();
        let mut shop = Shop::new(&catalog, &sink);

        shop.dispatch(Event::AddProduct(id(2)));
        shop.dispatch(Event::RequestCheckout);
        let outcome = shop.dispatch(Event::SubmitOrder(form("Ana", "a@b.com")));

        let orders = sink.orders();
        let order = orders.first().unwrap();
        assert_eq!(outcome, Outcome::OrderPlaced(order.order_id));
        assert_eq!(order.total.display(), "$29.99");
        assert_eq!(order.name, "Ana");
        assert_eq!(order.lines.len(), 1);
        assert!(shop.cart().is_empty());
        assert_eq!(shop.view(), ViewState::Confirmation);
        assert_eq!(shop.form(), &CheckoutForm::default());
        assert_eq!(shop.last_order(), Some(order.order_id));
    }

    #[test]
    fn test_retry_after_rejection_succeeds() {
        let catalog = Catalog::builtin();
        let sink = MemorySink::new();
        let mut shop = Shop::new(&catalog, &sink);

        shop.dispatch(Event::AddProduct(id(6)));
        shop.dispatch(Event::RequestCheckout);
        shop.dispatch(Event::SubmitOrder(form("Ana", "  ")));
        let outcome = shop.dispatch(Event::SubmitOrder(form("Ana", "a@b.com")));

        assert!(matches!(outcome, Outcome::OrderPlaced(_)));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_submit_outside_checkout_is_ignored() {
        let catalog = Catalog::builtin();
        let sink = MemorySink::new();
        let mut shop = Shop::new(&catalog, &sink);

        shop.dispatch(Event::AddProduct(id(1)));
        assert_eq!(
            shop.dispatch(Event::SubmitOrder(form("Ana", "a@b.com"))),
            Outcome::Unchanged
        );
        assert!(sink.is_empty());
        assert_eq!(quantities(&shop), vec![(1, 1)]);
    }

    #[test]
    fn test_shop_again_returns_to_empty_browsing() {
        let catalog = Catalog::builtin();
        let sink = MemorySink::new();
        let mut shop = Shop::new(&catalog, &sink);

        shop.dispatch(Event::AddProduct(id(5)));
        shop.dispatch(Event::AddProduct(id(5)));
        shop.dispatch(Event::RequestCheckout);
        shop.dispatch(Event::SubmitOrder(form("Ana", "a@b.com")));

        assert_eq!(
            shop.dispatch(Event::ShopAgain),
            Outcome::ViewChanged(ViewState::Browsing)
        );
        assert!(shop.cart().is_empty());
        assert_eq!(shop.last_order(), None);
        // Checkout stays unreachable until something is added again.
        assert_eq!(shop.dispatch(Event::RequestCheckout), Outcome::Unchanged);
    }

    #[test]
    fn test_cart_edits_ignored_outside_browsing() {
        let catalog = Catalog::builtin();
        let sink = MemorySink::new();
        let mut shop = Shop::new(&catalog, &sink);

        shop.dispatch(Event::AddProduct(id(1)));
        shop.dispatch(Event::RequestCheckout);
        assert_eq!(shop.dispatch(Event::RemoveProduct(id(1))), Outcome::Unchanged);
        assert_eq!(shop.dispatch(Event::AddProduct(id(2))), Outcome::Unchanged);
        assert_eq!(quantities(&shop), vec![(1, 1)]);

        shop.dispatch(Event::SubmitOrder(form("Ana", "a@b.com")));
        assert_eq!(shop.view(), ViewState::Confirmation);
        assert_eq!(shop.dispatch(Event::AddProduct(id(3))), Outcome::Unchanged);
        assert!(shop.cart().is_empty());

        let orders = sink.orders();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders.first().unwrap().total.display(), "$19.99");
    }

    #[test]
    fn test_submit_with_empty_cart_places_no_order() {
        let catalog = Catalog::builtin();
        let sink = MemorySink::new();
        // Restored state can name the checkout screen with nothing in the cart.
        let state: ShopState = serde_json::from_str(r#"{"view": "checkout"}"#).unwrap();
        let mut shop = Shop::with_state(&catalog, &sink, state);
        assert_eq!(shop.view(), ViewState::Checkout);

        assert_eq!(
            shop.dispatch(Event::SubmitOrder(form("Ana", "a@b.com"))),
            Outcome::Unchanged
        );
        assert!(sink.is_empty());
        assert_eq!(shop.view(), ViewState::Checkout);
    }

    #[test]
    fn test_state_round_trips_between_events() {
        let catalog = Catalog::builtin();
        let sink = MemorySink::new();

        let mut shop = Shop::new(&catalog, &sink);
        shop.dispatch(Event::AddProduct(id(3)));
        shop.dispatch(Event::RequestCheckout);
        let saved = serde_json::to_string(&shop.into_state()).unwrap();

        let state: ShopState = serde_json::from_str(&saved).unwrap();
        let mut shop = Shop::with_state(&catalog, &sink, state);
        assert_eq!(shop.view(), ViewState::Checkout);
        assert_eq!(
            shop.dispatch(Event::Back),
            Outcome::ViewChanged(ViewState::Browsing)
        );
        assert_eq!(quantities(&shop), vec![(3, 1)]);
    }

    #[test]
    fn test_event_deserializes_from_snake_case() {
        let events: Vec<Event> = serde_json::from_str(
            r#"["request_checkout", {"add_product": 2}, {"submit_order": {"name": "Ana", "email": "a@b.com"}}]"#,
        )
        .unwrap();
        assert_eq!(events.first(), Some(&Event::RequestCheckout));
        assert_eq!(events.get(1), Some(&Event::AddProduct(id(2))));
        assert!(matches!(events.get(2), Some(Event::SubmitOrder(f)) if f.address.is_empty()));
    }
}
