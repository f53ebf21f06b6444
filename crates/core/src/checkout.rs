//! Simulated checkout: form validation and order snapshots.
//!
//! A successful submission produces an [`OrderSnapshot`] which is handed to an
//! [`OrderSink`] and then dropped. Nothing is stored and no payment is taken.

use std::cell::RefCell;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{Cart, CartLine};
use crate::types::{OrderId, Price};

/// Why a checkout submission was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Name or email is blank after trimming.
    #[error("Please fill in all required fields.")]
    MissingFields {
        /// Names of the blank fields, in form order.
        fields: Vec<&'static str>,
    },
}

/// Customer details entered on the checkout screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

impl CheckoutForm {
    /// Check that name and email are present.
    ///
    /// Only a presence check is made; the address is accepted as typed.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::MissingFields` listing each blank required field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let fields: Vec<&'static str> = [("name", &self.name), ("email", &self.email)]
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
            .collect();

        if fields.is_empty() {
            Ok(())
        } else {
            Err(CheckoutError::MissingFields { fields })
        }
    }
}

/// Record of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSnapshot {
    pub order_id: OrderId,
    pub placed_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub address: String,
    pub lines: Vec<CartLine>,
    pub item_count: u32,
    pub total: Price,
}

impl OrderSnapshot {
    /// Capture the cart and form as they are at submission time.
    ///
    /// Name and email are stored trimmed; the address is kept verbatim.
    #[must_use]
    pub fn capture(form: &CheckoutForm, cart: &Cart) -> Self {
        Self {
            order_id: OrderId::new_v4(),
            placed_at: Utc::now(),
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            address: form.address.clone(),
            lines: cart.lines().to_vec(),
            item_count: cart.item_count(),
            total: cart.total(),
        }
    }
}

/// Receives order snapshots. No response is awaited.
pub trait OrderSink {
    /// Accept a placed order.
    fn emit(&self, order: &OrderSnapshot);
}

/// Sink that keeps snapshots in memory, for tests and scripted runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    orders: RefCell<Vec<OrderSnapshot>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots received so far, oldest first.
    #[must_use]
    pub fn orders(&self) -> Vec<OrderSnapshot> {
        self.orders.borrow().clone()
    }

    /// Number of snapshots received.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.borrow().is_empty()
    }
}

impl OrderSink for MemorySink {
    fn emit(&self, order: &OrderSnapshot) {
        self.orders.borrow_mut().push(order.clone());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::types::ProductId;

    fn form(name: &str, email: &str) -> CheckoutForm {
        CheckoutForm {
            name: name.to_string(),
            email: email.to_string(),
            address: String::new(),
        }
    }

    #[test]
    fn test_validate_accepts_name_and_email() {
        assert!(form("Ana", "a@b.com").validate().is_ok());
    }

    #[test]
    fn test_validate_only_checks_presence() {
        assert!(form("x", "not-an-email").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_after_trim() {
        let err = form("   ", "a@b.com").validate().unwrap_err();
        assert_eq!(err, CheckoutError::MissingFields { fields: vec!["name"] });

        let err = form("", "\t\n").validate().unwrap_err();
        assert_eq!(
            err,
            CheckoutError::MissingFields {
                fields: vec!["name", "email"]
            }
        );
        assert_eq!(err.to_string(), "Please fill in all required fields.");
    }

    #[test]
    fn test_address_is_not_required() {
        let mut f = form("Ana", "a@b.com");
        f.address = "   ".to_string();
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_capture_copies_cart_and_trims() {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();
        cart.add_item(&catalog, ProductId::new(2));
        cart.add_item(&catalog, ProductId::new(2));

        let mut f = form("  Ana ", " a@b.com ");
        f.address = " Calle 1 ".to_string();
        let snapshot = OrderSnapshot::capture(&f, &cart);

        assert_eq!(snapshot.name, "Ana");
        assert_eq!(snapshot.email, "a@b.com");
        assert_eq!(snapshot.address, " Calle 1 ");
        assert_eq!(snapshot.lines, cart.lines());
        assert_eq!(snapshot.item_count, 2);
        assert_eq!(snapshot.total.display(), "$59.98");
    }

    #[test]
    fn test_memory_sink_records() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        let snapshot = OrderSnapshot::capture(&form("Ana", "a@b.com"), &Cart::new());
        sink.emit(&snapshot);

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.orders().first().unwrap().order_id, snapshot.order_id);
    }

    #[test]
    fn test_snapshot_serializes_total_as_string() {
        let snapshot = OrderSnapshot::capture(&form("Ana", "a@b.com"), &Cart::new());
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["total"]["amount"], "0");
        assert_eq!(json["name"], "Ana");
    }
}
