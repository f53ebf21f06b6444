//! Catalog listing.

use tracing::info;

use toybox_core::Catalog;

/// Log every product in display order.
pub fn list(catalog: &Catalog) {
    info!(
        products = catalog.len(),
        currency = catalog.currency().code(),
        "Catalog loaded"
    );
    for product in catalog.list_products() {
        info!(
            id = %product.id,
            price = %product.price,
            image = %product.image,
            "{}",
            product.name
        );
    }
}
