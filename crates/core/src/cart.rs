//! Shopping cart state.
//!
//! The cart is an ordered list of lines, one per distinct product, in the
//! order products were first added. A line only exists while its quantity is
//! at least one. Unknown products and removals of absent lines are no-ops.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product};
use crate::types::{CurrencyCode, Price, ProductId};

/// One product's aggregated quantity within the cart.
///
/// Product fields are copied in when the line is created so the line renders
/// on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub image: String,
    pub quantity: u32,
}

impl CartLine {
    fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Ordered collection of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line, or appends a new line with quantity 1.
    /// Returns `false` without touching the cart if the product is not in
    /// the catalog.
    pub fn add_item(&mut self, catalog: &Catalog, product_id: ProductId) -> bool {
        let Some(product) = catalog.find_product(product_id) else {
            return false;
        };

        match self.line_mut(product_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::from_product(product)),
        }
        true
    }

    /// Remove one unit of a product, deleting the line when it reaches zero.
    ///
    /// Returns `false` if the product has no line in the cart.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let Some(index) = self.lines.iter().position(|l| l.product_id == product_id) else {
            return false;
        };

        let emptied = self.lines.get_mut(index).is_some_and(|line| {
            line.quantity = line.quantity.saturating_sub(1);
            line.quantity == 0
        });
        if emptied {
            self.lines.remove(index);
        }
        true
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of unit price times quantity over all lines.
    ///
    /// Saturates rather than overflowing, so a total can always be rendered.
    #[must_use]
    pub fn total(&self) -> Price {
        let currency = self
            .lines
            .first()
            .map_or(CurrencyCode::default(), |l| l.unit_price.currency_code);
        let amount = self
            .lines
            .iter()
            .fold(Decimal::ZERO, |acc, l| acc.saturating_add(l.line_total().amount));
        Price::new(amount, currency)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |acc, l| acc.saturating_add(l.quantity))
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product_id == product_id)
    }
}
