use rincon_domain::id::ProductId;
use rincon_domain::master_data::{Brand, Category, Gender, MasterRecord};
use rincon_domain::product::Product;

use crate::domain::repository::{MasterDataRepository, ProductRepository};
use crate::domain::types::Catalog;
use crate::error::StorefrontError;

// ── LoadCatalog ──────────────────────────────────────────────────────────────

/// Loads the storefront catalog: purchasable products and filter choices.
///
/// The four lists are fetched concurrently. A list that fails to load is
/// shown as empty; the catalog itself never fails.
pub struct LoadCatalogUseCase<P: ProductRepository, M: MasterDataRepository> {
    pub products: P,
    pub master: M,
}

impl<P: ProductRepository, M: MasterDataRepository> LoadCatalogUseCase<P, M> {
    pub async fn execute(&self) -> Catalog {
        let (products, categories, brands, genders) = tokio::join!(
            self.products.list(),
            self.master.list::<Category>(),
            self.master.list::<Brand>(),
            self.master.list::<Gender>(),
        );

        let products: Vec<Product> = or_empty("products", products)
            .into_iter()
            .filter(Product::is_purchasable)
            .collect();
        tracing::debug!(count = products.len(), "catalog loaded");

        Catalog {
            products,
            categories: or_empty(Category::KIND.segment(), categories),
            brands: or_empty(Brand::KIND.segment(), brands),
            genders: or_empty(Gender::KIND.segment(), genders),
        }
    }
}

fn or_empty<T>(list: &str, result: Result<Vec<T>, StorefrontError>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::warn!(list, error = %e, kind = e.kind(), "list unavailable, showing none");
        Vec::new()
    })
}

// ── GetProduct ───────────────────────────────────────────────────────────────

pub struct GetProductUseCase<P: ProductRepository> {
    pub products: P,
}

impl<P: ProductRepository> GetProductUseCase<P> {
    pub async fn execute(&self, id: ProductId) -> Result<Product, StorefrontError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or(StorefrontError::ProductNotFound)
    }
}
