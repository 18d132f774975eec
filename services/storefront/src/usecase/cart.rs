use rincon_domain::cart::CartLineRequest;
use rincon_domain::customer::CustomerRef;
use rincon_domain::id::{CartLineId, CustomerId, ProductId};
use rincon_domain::product::ProductRef;
use rincon_domain::validation::ValidationError;

use crate::domain::repository::{CartRepository, ProductRepository};
use crate::domain::types::CartView;
use crate::error::StorefrontError;

fn require_customer(customer: CustomerId) -> Result<(), StorefrontError> {
    if !customer.is_assigned() {
        return Err(StorefrontError::InvalidCustomerId);
    }
    Ok(())
}

async fn reload<C: CartRepository>(
    cart: &C,
    customer: CustomerId,
) -> Result<CartView, StorefrontError> {
    let lines = cart.list(customer).await?;
    Ok(CartView::from_lines(lines))
}

// ── LoadCart ─────────────────────────────────────────────────────────────────

pub struct LoadCartUseCase<C: CartRepository> {
    pub cart: C,
}

impl<C: CartRepository> LoadCartUseCase<C> {
    pub async fn execute(&self, customer: CustomerId) -> Result<CartView, StorefrontError> {
        require_customer(customer)?;
        reload(&self.cart, customer).await
    }
}

// ── AddToCart ────────────────────────────────────────────────────────────────

pub struct AddToCartInput {
    pub customer: CustomerId,
    pub product: ProductId,
    pub quantity: i32,
}

/// Puts `quantity` units of a product in the cart.
///
/// An existing line for the same product is deleted first and a new one
/// inserted, so the second add sets the quantity rather than adding to it.
/// Between the two calls the product is briefly absent from the cart.
pub struct AddToCartUseCase<P: ProductRepository, C: CartRepository> {
    pub products: P,
    pub cart: C,
}

impl<P: ProductRepository, C: CartRepository> AddToCartUseCase<P, C> {
    pub async fn execute(&self, input: AddToCartInput) -> Result<CartView, StorefrontError> {
        let AddToCartInput {
            customer,
            product,
            quantity,
        } = input;
        require_customer(customer)?;
        if quantity <= 0 {
            return Err(ValidationError::NonPositiveQuantity.into());
        }

        let found = match self.products.find_by_id(product).await {
            Ok(Some(found)) => found,
            Ok(None) => {
                return Err(StorefrontError::StockValidation(format!(
                    "product {product} not found"
                )));
            }
            Err(e) => return Err(StorefrontError::StockValidation(e.to_string())),
        };
        if !found.has_stock_for(quantity) {
            return Err(StorefrontError::InsufficientStock {
                product: found.name,
            });
        }

        let existing = self.cart.list(customer).await.unwrap_or_else(|e| {
            tracing::warn!(%customer, error = %e, "could not read cart before add");
            Vec::new()
        });
        if let Some(line) = existing.iter().find(|l| l.is_for(product)) {
            if let Err(e) = self.cart.remove(line.id).await {
                tracing::warn!(
                    line_id = %line.id,
                    error = %e,
                    "could not remove previous cart line"
                );
            }
        }

        self.cart
            .add(&CartLineRequest {
                customer: CustomerRef { id: customer },
                product: ProductRef { id: product },
                quantity,
            })
            .await?;
        tracing::info!(%customer, product_id = %product, quantity, "cart line set");

        reload(&self.cart, customer).await
    }
}

// ── RemoveCartLine ───────────────────────────────────────────────────────────

pub struct RemoveCartLineUseCase<C: CartRepository> {
    pub cart: C,
}

impl<C: CartRepository> RemoveCartLineUseCase<C> {
    pub async fn execute(
        &self,
        line: CartLineId,
        customer: CustomerId,
    ) -> Result<CartView, StorefrontError> {
        require_customer(customer)?;
        self.cart.remove(line).await?;
        reload(&self.cart, customer).await
    }
}
