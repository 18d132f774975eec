//! REST adapter: implements every port over the storefront backend's JSON API.

use std::time::{Duration, Instant};

use anyhow::Context as _;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use rincon_core::http::{REQUEST_ID_HEADER, build_client, new_request_id};
use rincon_domain::auth::{LoginRequest, LoginResponse};
use rincon_domain::cart::{CartLine, CartLineRequest};
use rincon_domain::customer::{Customer, CustomerRequest};
use rincon_domain::id::{CartLineId, CustomerId, OrderId, ProductId, UserId};
use rincon_domain::master_data::{MasterDataKind, MasterRecord};
use rincon_domain::order::{Order, OrderLine, OrderLineRequest, OrderRequest};
use rincon_domain::product::{Product, ProductRequest};
use rincon_domain::user::User;

use crate::config::StorefrontConfig;
use crate::domain::repository::{
    AuthPort, CartRepository, CustomerRepository, MasterDataRepository, OrderLineRepository,
    OrderRepository, ProductRepository, UserRepository,
};
use crate::error::StorefrontError;

/// HTTP client bound to one backend base URL. Cheap to clone.
#[derive(Clone)]
pub struct RestBackend {
    client: Client,
    base_url: String,
}

impl RestBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StorefrontError> {
        let client = build_client(timeout).context("build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn from_config(config: &StorefrontConfig) -> Result<Self, StorefrontError> {
        Self::new(&config.base_url, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, StorefrontError> {
        let request_id = new_request_id();
        let mut request = self
            .client
            .request(method.clone(), format!("{}{}", self.base_url, path))
            .header(REQUEST_ID_HEADER, &request_id);
        if let Some(body) = body {
            request = request.json(body);
        }

        let started = Instant::now();
        let response = request.send().await.map_err(|source| {
            tracing::warn!(%method, path, request_id, error = %source, "request failed");
            StorefrontError::Transport {
                path: path.to_owned(),
                source,
            }
        })?;
        let status = response.status();
        tracing::info!(
            %method,
            path,
            request_id,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "backend call"
        );
        if !status.is_success() {
            return Err(StorefrontError::Status {
                status: status.as_u16(),
                path: path.to_owned(),
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, StorefrontError> {
        let bytes = response
            .bytes().await
            .map_err(|source| StorefrontError::Transport {
                path: path.to_owned(),
                source,
            })?;
        let value = serde_json::from_slice(&bytes).with_context(|| format!("decode {path}"))?;
        Ok(value)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, StorefrontError> {
        let response = self.send::<()>(Method::GET, path, None).await?;
        Self::decode(path, response).await
    }

    /// Like [`get_json`](Self::get_json), with `404` mapped to `None`.
    async fn find_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, StorefrontError> {
        match self.get_json(path).await {
            Ok(value) => Ok(Some(value)),
            Err(StorefrontError::Status { status, .. })
                if status == StatusCode::NOT_FOUND.as_u16() =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, StorefrontError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::POST, path, Some(body)).await?;
        Self::decode(path, response).await
    }

    async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, StorefrontError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::PUT, path, Some(body)).await?;
        Self::decode(path, response).await
    }

    async fn delete_path(&self, path: &str) -> Result<(), StorefrontError> {
        self.send::<()>(Method::DELETE, path, None).await?;
        Ok(())
    }
}

// ── Auth ─────────────────────────────────────────────────────────────────────

impl AuthPort for RestBackend {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, StorefrontError> {
        self.post_json("/api/auth/login", request).await
    }
}

// ── Users ────────────────────────────────────────────────────────────────────
//
// Single-user reads, creation and deletion live outside `/api` on the backend.

impl UserRepository for RestBackend {
    async fn list(&self) -> Result<Vec<User>, StorefrontError> {
        self.get_json("/api/usuarios").await
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StorefrontError> {
        self.find_json(&format!("/usuarios/{id}")).await
    }

    async fn create(&self, user: &User) -> Result<User, StorefrontError> {
        self.post_json("/usuarios", user).await
    }

    async fn update(&self, id: UserId, user: &User) -> Result<User, StorefrontError> {
        self.put_json(&format!("/api/usuarios/{id}"), user).await
    }

    async fn delete(&self, id: UserId) -> Result<(), StorefrontError> {
        self.delete_path(&format!("/usuarios/{id}")).await
    }
}

// ── Customers ────────────────────────────────────────────────────────────────

impl CustomerRepository for RestBackend {
    async fn list(&self) -> Result<Vec<Customer>, StorefrontError> {
        self.get_json("/api/clientes").await
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, StorefrontError> {
        self.find_json(&format!("/api/clientes/{id}")).await
    }

    async fn create(&self, customer: &CustomerRequest) -> Result<Customer, StorefrontError> {
        self.post_json("/api/clientes", customer).await
    }

    async fn update(
        &self,
        id: CustomerId,
        customer: &CustomerRequest,
    ) -> Result<Customer, StorefrontError> {
        self.put_json(&format!("/api/clientes/{id}"), customer).await
    }
}

// ── Products ─────────────────────────────────────────────────────────────────

impl ProductRepository for RestBackend {
    async fn list(&self) -> Result<Vec<Product>, StorefrontError> {
        self.get_json("/api/productos").await
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StorefrontError> {
        self.find_json(&format!("/api/productos/{id}")).await
    }

    async fn create(&self, product: &ProductRequest) -> Result<Product, StorefrontError> {
        self.post_json("/api/productos", product).await
    }

    async fn update(
        &self,
        id: ProductId,
        product: &ProductRequest,
    ) -> Result<Product, StorefrontError> {
        self.put_json(&format!("/api/productos/{id}"), product).await
    }

    async fn delete(&self, id: ProductId) -> Result<(), StorefrontError> {
        self.delete_path(&format!("/api/productos/{id}")).await
    }
}

// ── Master data ──────────────────────────────────────────────────────────────

fn master_path(kind: MasterDataKind) -> String {
    format!("/api/{}", kind.segment())
}

impl MasterDataRepository for RestBackend {
    async fn list<T: MasterRecord>(&self) -> Result<Vec<T>, StorefrontError> {
        self.get_json(&master_path(T::KIND)).await
    }

    async fn find<T: MasterRecord>(&self, key: i64) -> Result<Option<T>, StorefrontError> {
        self.find_json(&format!("{}/{key}", master_path(T::KIND))).await
    }

    async fn create<T: MasterRecord>(&self, body: &T::Request) -> Result<T, StorefrontError> {
        self.post_json(&master_path(T::KIND), body).await
    }

    async fn update<T: MasterRecord>(
        &self,
        key: i64,
        body: &T::Request,
    ) -> Result<T, StorefrontError> {
        self.put_json(&format!("{}/{key}", master_path(T::KIND)), body).await
    }

    async fn delete(&self, kind: MasterDataKind, key: i64) -> Result<(), StorefrontError> {
        self.delete_path(&format!("{}/{key}", master_path(kind))).await
    }
}

// ── Cart ─────────────────────────────────────────────────────────────────────

impl CartRepository for RestBackend {
    async fn list(&self, customer: CustomerId) -> Result<Vec<CartLine>, StorefrontError> {
        self.get_json(&format!("/api/carrito/cliente/{customer}")).await
    }

    async fn add(&self, line: &CartLineRequest) -> Result<CartLine, StorefrontError> {
        self.post_json("/api/carrito", line).await
    }

    async fn remove(&self, line: CartLineId) -> Result<(), StorefrontError> {
        self.delete_path(&format!("/api/carrito/{line}")).await
    }

    async fn clear(&self, customer: CustomerId) -> Result<(), StorefrontError> {
        self.delete_path(&format!("/api/carrito/vaciar/{customer}")).await
    }
}

// ── Orders ───────────────────────────────────────────────────────────────────

impl OrderRepository for RestBackend {
    async fn list_by_customer(&self, customer: CustomerId) -> Result<Vec<Order>, StorefrontError> {
        self.get_json(&format!("/api/pedidos/cliente/{customer}")).await
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, StorefrontError> {
        self.find_json(&format!("/api/pedidos/{id}")).await
    }

    async fn create(&self, order: &OrderRequest) -> Result<Order, StorefrontError> {
        self.post_json("/api/pedidos", order).await
    }

    async fn update(&self, id: OrderId, order: &OrderRequest) -> Result<Order, StorefrontError> {
        self.put_json(&format!("/api/pedidos/{id}"), order).await
    }
}

impl OrderLineRepository for RestBackend {
    async fn list_by_order(&self, order: OrderId) -> Result<Vec<OrderLine>, StorefrontError> {
        self.get_json(&format!("/api/detalles-pedido/pedido/{order}")).await
    }

    async fn create(&self, line: &OrderLineRequest) -> Result<OrderLine, StorefrontError> {
        self.post_json("/api/detalles-pedido", line).await
    }
}
