//! Cart route handlers.
//!
//! Both handlers apply a single cart event and redirect back to the shop page.
//! Product IDs that are malformed or not in the catalog are ignored.

use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use toybox_core::{Event, ProductId};

use crate::error::{Result, add_breadcrumb};
use crate::routes::shop::apply_event;
use crate::state::AppState;

/// Add/remove form data.
///
/// The ID is taken as text so a malformed value degrades to a no-op instead of
/// a rejected request.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub product_id: String,
}

impl ProductForm {
    fn product_id(&self) -> Option<ProductId> {
        self.product_id.parse().ok()
    }
}

/// Add one unit of a product to the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    if let Some(id) = form.product_id() {
        let (outcome, _) = apply_event(&state, &session, Event::AddProduct(id)).await?;
        if outcome.needs_render() {
            let product_id = id.to_string();
            add_breadcrumb(
                "cart",
                "Added product",
                Some(&[("product_id", product_id.as_str())][..]),
            );
        }
    }
    Ok(Redirect::to("/"))
}

/// Remove one unit of a product from the cart.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    if let Some(id) = form.product_id() {
        let (outcome, _) = apply_event(&state, &session, Event::RemoveProduct(id)).await?;
        if outcome.needs_render() {
            let product_id = id.to_string();
            add_breadcrumb(
                "cart",
                "Removed product",
                Some(&[("product_id", product_id.as_str())][..]),
            );
        }
    }
    Ok(Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_form_parses_id() {
        let form = ProductForm {
            product_id: "4".to_string(),
        };
        assert_eq!(form.product_id(), Some(ProductId::new(4)));
    }

    #[test]
    fn test_product_form_malformed_id_is_none() {
        for raw in ["", "abc", "1.5"] {
            let form = ProductForm {
                product_id: raw.to_string(),
            };
            assert_eq!(form.product_id(), None, "{raw:?}");
        }
    }
}
