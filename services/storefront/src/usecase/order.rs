use std::cmp::Ordering;

use rincon_domain::id::{CustomerId, OrderId};
use rincon_domain::order::{Order, OrderLine, OrderRequest, OrderStatus};

use crate::domain::repository::{OrderLineRepository, OrderRepository};
use crate::error::StorefrontError;

// ── ListOrders ───────────────────────────────────────────────────────────────

/// A customer's orders, newest first. Orders without a date go last.
pub struct ListOrdersUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> ListOrdersUseCase<O> {
    pub async fn execute(&self, customer: CustomerId) -> Result<Vec<Order>, StorefrontError> {
        if !customer.is_assigned() {
            return Err(StorefrontError::InvalidCustomerId);
        }
        let mut orders = self.orders.list_by_customer(customer).await?;
        orders.sort_by(|a, b| newest_first(a.ordered_at.as_deref(), b.ordered_at.as_deref()));
        Ok(orders)
    }
}

// Timestamps are ISO-8601 strings, so text order is time order.
fn newest_first(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ── GetOrder ─────────────────────────────────────────────────────────────────

pub struct GetOrderUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> GetOrderUseCase<O> {
    pub async fn execute(&self, id: OrderId) -> Result<Order, StorefrontError> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or(StorefrontError::OrderNotFound)
    }
}

// ── ListOrderLines ───────────────────────────────────────────────────────────

pub struct ListOrderLinesUseCase<L: OrderLineRepository> {
    pub order_lines: L,
}

impl<L: OrderLineRepository> ListOrderLinesUseCase<L> {
    pub async fn execute(&self, order: OrderId) -> Result<Vec<OrderLine>, StorefrontError> {
        self.order_lines.list_by_order(order).await
    }
}

// ── UpdateOrderStatus ────────────────────────────────────────────────────────

/// Sends the whole order back with a new status. Any status may follow any
/// other; the backend decides what is allowed.
pub struct UpdateOrderStatusUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> UpdateOrderStatusUseCase<O> {
    pub async fn execute(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, StorefrontError> {
        let order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or(StorefrontError::OrderNotFound)?;
        let mut request =
            OrderRequest::from_order(&order).ok_or(StorefrontError::CustomerNotFound)?;
        request.status = status;

        let updated = self.orders.update(id, &request).await?;
        tracing::info!(order_id = %id, from = %order.status, to = %status, "order status changed");
        Ok(updated)
    }
}
