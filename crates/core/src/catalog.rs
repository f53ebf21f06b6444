//! Read-only product catalog.
//!
//! The catalog is fixed at startup and never mutated. Lookups of unknown IDs
//! return `None` rather than an error; callers treat absence as a no-op.

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CurrencyCode, Price, ProductId};

/// Highest accepted unit price. Keeps cart totals far inside `Decimal` range.
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 2);

/// Errors raised while building a catalog from external data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two products share the same ID.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),

    /// A product has a price below zero.
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),

    /// A product's price is above [`MAX_UNIT_PRICE`].
    #[error("product {0} is priced above the limit of {max}", max = MAX_UNIT_PRICE)]
    PriceTooLarge(ProductId),

    /// Products are priced in more than one currency.
    #[error("product {id} is priced in {found}, catalog uses {expected}")]
    MixedCurrency {
        /// Offending product.
        id: ProductId,
        /// Currency of the offending product.
        found: &'static str,
        /// Currency of the first product.
        expected: &'static str,
    },

    /// The catalog file could not be read.
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not a valid JSON product list.
    #[error("failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),
}

/// A product offered in the shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stable unique identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Image path or URL shown on the product card.
    pub image: String,
}

impl Product {
    fn builtin(id: i32, name: &str, cents: i64, image: &str) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Price::usd(Decimal::new(cents, 2)),
            image: image.to_string(),
        }
    }
}

/// Immutable, ordered list of products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate IDs, negative or oversized prices
    /// and mixed currencies.
    ///
    /// # Errors
    ///
    /// Returns the first `CatalogError` found, in product order.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        let currency = products.first().map(|p| p.price.currency_code);

        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.price.is_negative() {
                return Err(CatalogError::NegativePrice(product.id));
            }
            if product.price.amount > MAX_UNIT_PRICE {
                return Err(CatalogError::PriceTooLarge(product.id));
            }
            if let Some(expected) = currency
                && product.price.currency_code != expected
            {
                return Err(CatalogError::MixedCurrency {
                    id: product.id,
                    found: product.price.currency_code.code(),
                    expected: expected.code(),
                });
            }
        }

        Ok(Self { products })
    }

    /// The demo toy catalog the storefront ships with.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            products: vec![
                Product::builtin(1, "Dragón de peluche", 1999, "imagenes/dragoncito.svg"),
                Product::builtin(2, "perro robot", 2999, "imagenes/perrito.svg"),
                Product::builtin(
                    3,
                    "Conjunto de bloques de construcción",
                    2450,
                    "imagenes/legos.svg",
                ),
                Product::builtin(4, "Carro control remoto", 3500, "imagenes/carrito.svg"),
                Product::builtin(5, "Art Kit", 1575, "imagenes/arte.svg"),
                Product::builtin(6, "Rompecabezas espacial", 1299, "imagenes/espacio.svg"),
            ],
        }
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the products fail
    /// validation (see [`Catalog::new`]).
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// All products, in definition order.
    #[must_use]
    pub fn list_products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn find_product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Currency every product is priced in.
    #[must_use]
    pub fn currency(&self) -> CurrencyCode {
        self.products
            .first()
            .map(|p| p.price.currency_code)
            .unwrap_or_default()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
