//! Read-only catalog API.

use axum::{Json, extract::State};
use tracing::instrument;

use toybox_core::Product;

use crate::state::AppState;

/// List every product in catalog order.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog().list_products().to_vec())
}
