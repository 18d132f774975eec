//! Order placement.
//!
//! Checkout is a sequence of independent backend calls with no transaction
//! around them. Stock is validated up front; once the order header exists,
//! later failures are collected as warnings and the order is left as is.
//! Only a failed product re-read while decrementing stock aborts after the
//! order was created.

use rust_decimal::Decimal;
use tokio::sync::watch;

use rincon_domain::cart::CartLine;
use rincon_domain::customer::CustomerRef;
use rincon_domain::id::{CustomerId, ProductId};
use rincon_domain::money::CartTotals;
use rincon_domain::order::{Order, OrderLineRequest, OrderRequest, ShippingAddress};
use rincon_domain::product::{ProductRef, ProductRequest};

use crate::domain::repository::{
    CartRepository, OrderLineRepository, OrderRepository, ProductRepository,
};
use crate::domain::types::{CheckoutReceipt, CheckoutState, CheckoutWarning};
use crate::error::StorefrontError;

pub struct CheckoutInput {
    pub customer: CustomerId,
    /// Cart lines as last loaded; prices and totals come from these.
    pub lines: Vec<CartLine>,
    pub ship_to: ShippingAddress,
}

/// A validated cart line.
struct Item {
    product: ProductId,
    quantity: i32,
    unit_price: Decimal,
}

pub struct CheckoutUseCase<P, O, L, C>
where
    P: ProductRepository,
    O: OrderRepository,
    L: OrderLineRepository,
    C: CartRepository,
{
    pub products: P,
    pub orders: O,
    pub order_lines: L,
    pub cart: C,
    state: watch::Sender<CheckoutState>,
}

impl<P, O, L, C> CheckoutUseCase<P, O, L, C>
where
    P: ProductRepository,
    O: OrderRepository,
    L: OrderLineRepository,
    C: CartRepository,
{
    pub fn new(products: P, orders: O, order_lines: L, cart: C) -> Self {
        Self {
            products,
            orders,
            order_lines,
            cart,
            state: watch::Sender::new(CheckoutState::Idle),
        }
    }

    pub fn state(&self) -> CheckoutState {
        *self.state.borrow()
    }

    /// Receiver that observes every state transition.
    pub fn subscribe(&self) -> watch::Receiver<CheckoutState> {
        self.state.subscribe()
    }

    fn enter(&self, next: CheckoutState) {
        let previous = self.state.send_replace(next);
        tracing::info!(from = %previous, to = %next, "checkout step");
    }

    fn abort(&self, step: CheckoutState, error: StorefrontError) -> StorefrontError {
        tracing::warn!(%step, error = %error, kind = error.kind(), "checkout aborted");
        self.enter(CheckoutState::Error);
        StorefrontError::checkout(step, error)
    }

    pub async fn execute(&self, input: CheckoutInput) -> Result<CheckoutReceipt, StorefrontError> {
        let CheckoutInput {
            customer,
            lines,
            ship_to,
        } = input;

        self.state.send_replace(CheckoutState::Idle);
        if !ship_to.is_complete() {
            return Err(StorefrontError::IncompleteShippingData);
        }
        if !customer.is_assigned() {
            return Err(StorefrontError::InvalidCustomerId);
        }
        if lines.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }

        self.enter(CheckoutState::ValidatingStock);
        let items = match self.validate_stock(&lines).await {
            Ok(items) => items,
            Err(e) => return Err(self.abort(CheckoutState::ValidatingStock, e)),
        };

        self.enter(CheckoutState::CreatingOrder);
        let totals = CartTotals::from_lines(&lines);
        let request = OrderRequest::pending(CustomerRef { id: customer }, &totals, &ship_to);
        let order = match self.orders.create(&request).await {
            Ok(order) => order,
            Err(e) => return Err(self.abort(CheckoutState::CreatingOrder, e)),
        };
        tracing::info!(order_id = %order.id, %customer, total = %totals.total, "order created");

        let mut warnings = Vec::new();

        self.enter(CheckoutState::CreatingLines);
        self.create_lines(&order, &items, &mut warnings).await;

        self.enter(CheckoutState::DecrementingStock);
        if let Err(e) = self.decrement_stock(&items, &mut warnings).await {
            return Err(self.abort(CheckoutState::DecrementingStock, e));
        }

        self.enter(CheckoutState::ClearingCart);
        if let Err(e) = self.cart.clear(customer).await {
            warn(&mut warnings, CheckoutState::ClearingCart, e);
        }

        self.enter(CheckoutState::Done);
        Ok(CheckoutReceipt {
            order,
            totals,
            warnings,
        })
    }

    /// Re-reads every product; the first line that cannot be served aborts.
    async fn validate_stock(&self, lines: &[CartLine]) -> Result<Vec<Item>, StorefrontError> {
        let mut items = Vec::with_capacity(lines.len());
        for line in lines {
            let Some(cart_product) = &line.product else {
                return Err(StorefrontError::StockValidation(format!(
                    "cart line {} has no product",
                    line.id
                )));
            };
            if line.quantity <= 0 {
                return Err(StorefrontError::StockValidation(format!(
                    "cart line {} has quantity {}",
                    line.id, line.quantity
                )));
            }
            let current = self
                .products
                .find_by_id(cart_product.id)
                .await
                .map_err(|e| StorefrontError::StockValidation(e.to_string()))?
                .ok_or_else(|| {
                    StorefrontError::StockValidation(format!(
                        "product {} not found",
                        cart_product.id
                    ))
                })?;
            if !current.has_stock_for(line.quantity) {
                return Err(StorefrontError::InsufficientStock {
                    product: current.name,
                });
            }
            items.push(Item {
                product: cart_product.id,
                quantity: line.quantity,
                unit_price: cart_product.price,
            });
        }
        Ok(items)
    }

    async fn create_lines(
        &self,
        order: &Order,
        items: &[Item],
        warnings: &mut Vec<CheckoutWarning>,
    ) {
        for item in items {
            let request = OrderLineRequest::priced(
                order.id,
                ProductRef { id: item.product },
                item.quantity,
                item.unit_price,
            );
            if let Err(e) = self.order_lines.create(&request).await {
                warn(warnings, CheckoutState::CreatingLines, e);
            }
        }
    }

    async fn decrement_stock(
        &self,
        items: &[Item],
        warnings: &mut Vec<CheckoutWarning>,
    ) -> Result<(), StorefrontError> {
        for item in items {
            let product = self
                .products
                .find_by_id(item.product)
                .await?
                .ok_or(StorefrontError::ProductNotFound)?;
            let request =
                ProductRequest::from_product(&product).with_stock_decremented(item.quantity);
            if let Err(e) = self.products.update(product.id, &request).await {
                warn(warnings, CheckoutState::DecrementingStock, e);
            }
        }
        Ok(())
    }
}

fn warn(warnings: &mut Vec<CheckoutWarning>, step: CheckoutState, error: StorefrontError) {
    tracing::warn!(%step, error = %error, "checkout step failed, continuing");
    warnings.push(CheckoutWarning {
        step,
        detail: error.to_string(),
    });
}
