#![allow(async_fn_in_trait)]

use rincon_domain::auth::{LoginRequest, LoginResponse};
use rincon_domain::cart::{CartLine, CartLineRequest};
use rincon_domain::customer::{Customer, CustomerRequest};
use rincon_domain::id::{CartLineId, CustomerId, OrderId, ProductId, UserId};
use rincon_domain::master_data::{MasterDataKind, MasterRecord};
use rincon_domain::order::{Order, OrderLine, OrderLineRequest, OrderRequest};
use rincon_domain::product::{Product, ProductRequest};
use rincon_domain::user::User;

use crate::error::StorefrontError;

/// Credential check against `POST /api/auth/login`.
pub trait AuthPort: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, StorefrontError>;
}

/// Login accounts.
///
/// `create` and `delete` mirror the backend's `/api/usuarios` surface; no
/// storefront flow calls them, so `tests/integration/repository_test.rs`
/// pins their wire behaviour.
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, StorefrontError>;
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StorefrontError>;
    async fn create(&self, user: &User) -> Result<User, StorefrontError>;
    /// Full-record replacement.
    async fn update(&self, id: UserId, user: &User) -> Result<User, StorefrontError>;
    async fn delete(&self, id: UserId) -> Result<(), StorefrontError>;
}

/// Customer profiles.
///
/// Registration goes through `create`. `find_by_id` and `update` have no
/// storefront flow and are pinned by `tests/integration/repository_test.rs`.
pub trait CustomerRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Customer>, StorefrontError>;
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, StorefrontError>;
    async fn create(&self, customer: &CustomerRequest) -> Result<Customer, StorefrontError>;
    async fn update(
        &self,
        id: CustomerId,
        customer: &CustomerRequest,
    ) -> Result<Customer, StorefrontError>;
}

/// Catalog products.
pub trait ProductRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, StorefrontError>;
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StorefrontError>;
    async fn create(&self, product: &ProductRequest) -> Result<Product, StorefrontError>;
    /// Full-record replacement; there is no version check.
    async fn update(
        &self,
        id: ProductId,
        product: &ProductRequest,
    ) -> Result<Product, StorefrontError>;
    async fn delete(&self, id: ProductId) -> Result<(), StorefrontError>;
}

/// The four master-data tables, addressed by record type.
pub trait MasterDataRepository: Send + Sync {
    async fn list<T: MasterRecord>(&self) -> Result<Vec<T>, StorefrontError>;
    async fn find<T: MasterRecord>(&self, key: i64) -> Result<Option<T>, StorefrontError>;
    async fn create<T: MasterRecord>(&self, body: &T::Request) -> Result<T, StorefrontError>;
    async fn update<T: MasterRecord>(
        &self,
        key: i64,
        body: &T::Request,
    ) -> Result<T, StorefrontError>;
    async fn delete(&self, kind: MasterDataKind, key: i64) -> Result<(), StorefrontError>;
}

/// Cart lines of a customer.
pub trait CartRepository: Send + Sync {
    async fn list(&self, customer: CustomerId) -> Result<Vec<CartLine>, StorefrontError>;
    async fn add(&self, line: &CartLineRequest) -> Result<CartLine, StorefrontError>;
    async fn remove(&self, line: CartLineId) -> Result<(), StorefrontError>;
    /// Delete every line of the customer.
    async fn clear(&self, customer: CustomerId) -> Result<(), StorefrontError>;
}

/// Order headers.
pub trait OrderRepository: Send + Sync {
    async fn list_by_customer(&self, customer: CustomerId) -> Result<Vec<Order>, StorefrontError>;
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, StorefrontError>;
    async fn create(&self, order: &OrderRequest) -> Result<Order, StorefrontError>;
    async fn update(&self, id: OrderId, order: &OrderRequest) -> Result<Order, StorefrontError>;
}

/// Order lines.
pub trait OrderLineRepository: Send + Sync {
    async fn list_by_order(&self, order: OrderId) -> Result<Vec<OrderLine>, StorefrontError>;
    async fn create(&self, line: &OrderLineRequest) -> Result<OrderLine, StorefrontError>;
}
