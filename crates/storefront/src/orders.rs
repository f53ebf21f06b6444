//! Order sink that writes placed orders to the log.

use toybox_core::{OrderSink, OrderSnapshot};

/// Emits each order snapshot as a structured `info` event.
///
/// Nothing is stored; the log line is the only record of the order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingOrderSink;

impl OrderSink for TracingOrderSink {
    fn emit(&self, order: &OrderSnapshot) {
        let items = serde_json::to_string(&order.lines).unwrap_or_default();
        tracing::info!(
            order_id = %order.order_id,
            placed_at = %order.placed_at.to_rfc3339(),
            name = %order.name,
            email = %order.email,
            address = %order.address,
            item_count = order.item_count,
            total = %order.total,
            items = %items,
            "Purchase details"
        );
    }
}
