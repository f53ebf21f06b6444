//! Application state shared across handlers.

use std::sync::Arc;

use toybox_core::{Catalog, CatalogError, Event, Outcome, Shop, ShopState};

use crate::config::StorefrontConfig;
use crate::orders::TracingOrderSink;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog, the order sink and configuration. Per-visitor shop state lives in
/// the session, not here.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    orders: TracingOrderSink,
}

impl AppState {
    /// Create application state with an explicit catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                orders: TracingOrderSink,
            }),
        }
    }

    /// Create application state, loading the catalog named in the config or
    /// falling back to the builtin products.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured catalog file cannot be loaded.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, CatalogError> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                let catalog = Catalog::load(path)?;
                tracing::info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
                catalog
            }
            None => Catalog::builtin(),
        };
        Ok(Self::new(config, catalog))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Apply one event to a visitor's shop state.
    ///
    /// Runs synchronously; returns what changed and the state to save back to
    /// the session.
    #[must_use]
    pub fn dispatch(&self, state: ShopState, event: Event) -> (Outcome, ShopState) {
        let mut shop = Shop::with_state(&self.inner.catalog, &self.inner.orders, state);
        let outcome = shop.dispatch(event);
        (outcome, shop.into_state())
    }
}
