//! Scripted shop sessions.
//!
//! A script is a YAML list of events, applied in order to a fresh shop:
//!
//! ```yaml
//! - !add_product 1
//! - !add_product 3
//! - request_checkout
//! - !submit_order
//!   name: Ana
//!   email: ana@example.com
//! - shop_again
//! ```

use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use toybox_core::{Catalog, Event, MemorySink, OrderSnapshot, Outcome, Price, Shop, ViewState};

/// Errors that can occur while loading a script.
#[derive(Debug, Error)]
pub enum SimulateError {
    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid script: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// One applied event and its result.
#[derive(Debug, Clone)]
pub struct Step {
    pub event: &'static str,
    pub outcome: Outcome,
    pub view: ViewState,
}

/// Everything a scripted session produced.
#[derive(Debug)]
pub struct Report {
    pub steps: Vec<Step>,
    pub orders: Vec<OrderSnapshot>,
    pub final_view: ViewState,
    pub cart_total: Price,
}

impl Report {
    /// Log each step, each placed order and the final state.
    pub fn log(&self) {
        for (index, step) in self.steps.iter().enumerate() {
            match &step.outcome {
                Outcome::Rejected(err) => {
                    warn!(step = index + 1, event = step.event, view = %step.view, "{err}");
                }
                outcome => {
                    info!(step = index + 1, event = step.event, view = %step.view, ?outcome, "Applied");
                }
            }
        }
        for order in &self.orders {
            info!(
                order_id = %order.order_id,
                name = %order.name,
                items = order.item_count,
                total = %order.total,
                "Order placed"
            );
        }
        info!(
            view = %self.final_view,
            cart_total = %self.cart_total,
            orders = self.orders.len(),
            "Simulation finished"
        );
    }
}

/// Parse a YAML event list.
///
/// # Errors
///
/// Returns an error if the text is not a list of known events.
pub fn parse_script(yaml: &str) -> Result<Vec<Event>, SimulateError> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Apply events in order to a fresh shop.
#[must_use]
pub fn run(catalog: &Catalog, events: Vec<Event>) -> Report {
    let sink = MemorySink::new();
    let mut shop = Shop::new(catalog, &sink);

    let steps = events
        .into_iter()
        .map(|event| {
            let kind = event.kind();
            let outcome = shop.dispatch(event);
            Step {
                event: kind,
                outcome,
                view: shop.view(),
            }
        })
        .collect();

    Report {
        steps,
        orders: sink.orders(),
        final_view: shop.view(),
        cart_total: shop.cart().total(),
    }
}

/// Read a script file and run it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn run_file(catalog: &Catalog, path: &Path) -> Result<Report, SimulateError> {
    let content = std::fs::read_to_string(path)?;
    let events = parse_script(&content)?;
    info!(path = %path.display(), events = events.len(), "Loaded script");
    Ok(run(catalog, events))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use toybox_core::{CheckoutForm, ProductId};

    use super::*;

    const HAPPY_PATH: &str = "
- !add_product 1
- !add_product 1
- !add_product 3
- request_checkout
- !submit_order
  name: '  Ana  '
  email: ana@example.com
  address: Calle 1
";

    #[test]
    fn test_parse_script() {
        let events = parse_script(HAPPY_PATH).unwrap();
        assert_eq!(events.len(), 5);
        assert_eq!(events.first(), Some(&Event::AddProduct(ProductId::new(1))));
        assert_eq!(events.get(3), Some(&Event::RequestCheckout));
        assert!(matches!(events.get(4), Some(Event::SubmitOrder(form)) if form.email == "ana@example.com"));
    }

    #[test]
    fn test_parse_script_rejects_unknown_event() {
        assert!(parse_script("- teleport").is_err());
    }

    #[test]
    fn test_run_happy_path() {
        let catalog = Catalog::builtin();
        let report = run(&catalog, parse_script(HAPPY_PATH).unwrap());

        assert_eq!(report.final_view, ViewState::Confirmation);
        assert!(report.cart_total.amount.is_zero());
        assert_eq!(report.orders.len(), 1);

        let order = report.orders.first().unwrap();
        assert_eq!(order.name, "Ana");
        assert_eq!(order.item_count, 3);
        assert_eq!(order.total.display(), "$64.48");
        assert!(matches!(
            report.steps.last().map(|step| &step.outcome),
            Some(Outcome::OrderPlaced(_))
        ));
    }

    #[test]
    fn test_run_records_rejection_and_unchanged_steps() {
        let catalog = Catalog::builtin();
        let events = vec![
            Event::RequestCheckout,
            Event::AddProduct(ProductId::new(99)),
            Event::AddProduct(ProductId::new(2)),
            Event::RequestCheckout,
            Event::SubmitOrder(CheckoutForm::default()),
        ];
        let report = run(&catalog, events);

        let outcomes: Vec<&Outcome> = report.steps.iter().map(|step| &step.outcome).collect();
        assert_eq!(outcomes.first(), Some(&&Outcome::Unchanged));
        assert_eq!(outcomes.get(1), Some(&&Outcome::Unchanged));
        assert_eq!(outcomes.get(2), Some(&&Outcome::CartChanged));
        assert!(matches!(outcomes.get(4), Some(Outcome::Rejected(_))));
        assert_eq!(report.final_view, ViewState::Checkout);
        assert!(report.orders.is_empty());
        assert_eq!(report.cart_total.display(), "$29.99");
    }
}
