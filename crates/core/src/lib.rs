//! Toybox Core - storefront domain library.
//!
//! This crate holds everything the storefront knows about products, carts and
//! checkout, used by:
//! - `storefront` - Server-rendered single-page shop
//! - `cli` - Catalog listing and scripted event replay
//!
//! # Architecture
//!
//! The core crate contains only types and synchronous state machines - no I/O,
//! no HTTP, no async. Every operation runs to completion on an owned value, so
//! any presentation layer can drive it one event at a time.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices
//! - [`catalog`] - Read-only product list
//! - [`cart`] - Ordered cart lines and totals
//! - [`view`] - Which screen is visible
//! - [`checkout`] - Form validation and order snapshots
//! - [`shop`] - Event dispatcher tying the above together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod shop;
pub mod types;
pub mod view;

pub use cart::{Cart, CartLine};
pub use catalog::{Catalog, CatalogError, MAX_UNIT_PRICE, Product};
pub use checkout::{CheckoutError, CheckoutForm, MemorySink, OrderSink, OrderSnapshot};
pub use shop::{Event, Outcome, Shop, ShopState};
pub use types::*;
pub use view::{Navigation, ViewController, ViewState};
