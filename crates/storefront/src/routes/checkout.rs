//! Checkout route handlers.
//!
//! Navigation between the shop, checkout form and confirmation screen, plus
//! the simulated order submission.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use toybox_core::{CheckoutForm, Event, Outcome};

use crate::error::{Result, add_breadcrumb};
use crate::routes::shop::{ShopPageTemplate, apply_event};
use crate::state::AppState;

/// Checkout form data.
///
/// The page also posts card fields; they are accepted and discarded, since no
/// payment is ever taken.
#[derive(Deserialize)]
pub struct SubmitOrderForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

impl std::fmt::Debug for SubmitOrderForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmitOrderForm")
            .field("name_present", &!self.name.trim().is_empty())
            .field("email_present", &!self.email.trim().is_empty())
            .finish_non_exhaustive()
    }
}

impl From<SubmitOrderForm> for CheckoutForm {
    fn from(form: SubmitOrderForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            address: form.address,
        }
    }
}

/// Move from the shop to the checkout form. Ignored while the cart is empty.
#[instrument(skip(state, session))]
pub async fn start(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    apply_event(&state, &session, Event::RequestCheckout).await?;
    Ok(Redirect::to("/"))
}

/// Leave the checkout form and return to the shop with the cart intact.
#[instrument(skip(state, session))]
pub async fn back(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    apply_event(&state, &session, Event::Back).await?;
    Ok(Redirect::to("/"))
}

/// Submit the checkout form.
///
/// Validation failures re-render the form with a notice and a 422 status;
/// success redirects to the confirmation screen.
#[instrument(skip(state, session))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SubmitOrderForm>,
) -> Result<Response> {
    let (outcome, shop_state) =
        apply_event(&state, &session, Event::SubmitOrder(form.into())).await?;

    match outcome {
        Outcome::Rejected(err) => {
            tracing::info!(error = %err, "Checkout rejected");
            let page = ShopPageTemplate::build(state.catalog(), &shop_state, Some(err.to_string()));
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Outcome::OrderPlaced(order_id) => {
            let order_id = order_id.to_string();
            add_breadcrumb(
                "checkout",
                "Order placed",
                Some(&[("order_id", order_id.as_str())][..]),
            );
            Ok(Redirect::to("/").into_response())
        }
        _ => Ok(Redirect::to("/").into_response()),
    }
}

/// Leave the confirmation screen and start shopping again.
#[instrument(skip(state, session))]
pub async fn shop_again(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    apply_event(&state, &session, Event::ShopAgain).await?;
    Ok(Redirect::to("/"))
}
