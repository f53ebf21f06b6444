//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Shop page (catalog+cart, checkout form, or confirmation)
//!
//! # Cart
//! POST /cart/add               - Add one unit (form: product_id)
//! POST /cart/remove            - Remove one unit (form: product_id)
//!
//! # Checkout
//! POST /checkout               - Show the checkout form (cart must not be empty)
//! POST /checkout/back          - Return to the shop
//! POST /checkout/submit        - Place the simulated order (form: name, email, address)
//! POST /shop-again             - Leave the confirmation screen
//!
//! # API
//! GET  /api/products           - Catalog as JSON
//! ```
//!
//! Every POST redirects back to `/` except a rejected checkout submission,
//! which re-renders the form with a notice.

pub mod api;
pub mod cart;
pub mod checkout;
pub mod shop;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::start))
        .route("/back", post(checkout::back))
        .route("/submit", post(checkout::submit))
}

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/products", get(api::products::index))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shop::index))
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .route("/shop-again", post(checkout::shop_again))
        .nest("/api", api_routes())
}
