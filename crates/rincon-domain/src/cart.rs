//! Shopping-cart lines.

use serde::{Deserialize, Serialize};

use crate::customer::CustomerRef;
use crate::id::{CartLineId, ProductId};
use crate::product::{Product, ProductRef};

/// One cart line as returned by `GET /api/carrito/cliente/{clienteId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(default)]
    pub id: CartLineId,
    #[serde(rename = "cliente", default)]
    pub customer: Option<CustomerRef>,
    #[serde(rename = "producto", default)]
    pub product: Option<Product>,
    #[serde(rename = "cantidad", default)]
    pub quantity: i32,
    #[serde(rename = "fechaAgregado", default)]
    pub added_at: Option<String>,
    #[serde(rename = "activo", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl CartLine {
    pub fn product_id(&self) -> Option<ProductId> {
        self.product.as_ref().map(|p| p.id)
    }

    pub fn is_for(&self, product: ProductId) -> bool {
        self.product_id() == Some(product)
    }
}

/// Body of `POST /api/carrito`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineRequest {
    #[serde(rename = "cliente")]
    pub customer: CustomerRef,
    #[serde(rename = "producto")]
    pub product: ProductRef,
    #[serde(rename = "cantidad")]
    pub quantity: i32,
}
