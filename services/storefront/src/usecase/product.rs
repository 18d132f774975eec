use rincon_domain::id::ProductId;
use rincon_domain::product::Product;

use crate::domain::repository::ProductRepository;
use crate::domain::types::ProductDraft;
use crate::error::StorefrontError;

// ── ListProducts ─────────────────────────────────────────────────────────────

/// Every product, including inactive and sold-out ones.
pub struct ListProductsUseCase<P: ProductRepository> {
    pub products: P,
}

impl<P: ProductRepository> ListProductsUseCase<P> {
    pub async fn execute(&self) -> Result<Vec<Product>, StorefrontError> {
        self.products.list().await
    }
}

// ── CreateProduct ────────────────────────────────────────────────────────────

pub struct CreateProductUseCase<P: ProductRepository> {
    pub products: P,
}

impl<P: ProductRepository> CreateProductUseCase<P> {
    pub async fn execute(&self, draft: ProductDraft) -> Result<Product, StorefrontError> {
        let request = draft.into_request()?;
        let product = self.products.create(&request).await?;
        tracing::info!(product_id = %product.id, name = %product.name, "product created");
        Ok(product)
    }
}

// ── UpdateProduct ────────────────────────────────────────────────────────────

pub struct UpdateProductUseCase<P: ProductRepository> {
    pub products: P,
}

impl<P: ProductRepository> UpdateProductUseCase<P> {
    pub async fn execute(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Product, StorefrontError> {
        let request = draft.into_request()?;
        let product = self.products.update(id, &request).await?;
        tracing::info!(product_id = %id, "product updated");
        Ok(product)
    }
}

// ── DeleteProduct ────────────────────────────────────────────────────────────

pub struct DeleteProductUseCase<P: ProductRepository> {
    pub products: P,
}

impl<P: ProductRepository> DeleteProductUseCase<P> {
    pub async fn execute(&self, id: ProductId) -> Result<(), StorefrontError> {
        self.products.delete(id).await?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }
}
