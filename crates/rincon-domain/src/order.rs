//! Orders, order lines and shipping data.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::customer::CustomerRef;
use crate::id::{OrderId, OrderLineId};
use crate::money::CartTotals;
use crate::product::{Product, ProductRef};

/// Region pre-filled in shipping and registration forms.
pub const DEFAULT_REGION: &str = "Metropolitana";

/// Order lifecycle status.
///
/// The backend stores status as free text; values outside the known set
/// deserialize to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "PENDIENTE")]
    Pending,
    #[serde(rename = "PROCESANDO")]
    Processing,
    #[serde(rename = "ENVIADO")]
    Shipped,
    #[serde(rename = "ENTREGADO")]
    Delivered,
    #[serde(rename = "CANCELADO")]
    Cancelled,
    #[serde(other, rename = "DESCONOCIDO")]
    Unknown,
}

impl OrderStatus {
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Pending => "PENDIENTE",
            Self::Processing => "PROCESANDO",
            Self::Shipped => "ENVIADO",
            Self::Delivered => "ENTREGADO",
            Self::Cancelled => "CANCELADO",
            Self::Unknown => "DESCONOCIDO",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

#[derive(Debug, Error)]
#[error("unknown order status: {0:?}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDIENTE" | "PENDING" => Ok(Self::Pending),
            "PROCESANDO" | "PROCESSING" => Ok(Self::Processing),
            "ENVIADO" | "SHIPPED" => Ok(Self::Shipped),
            "ENTREGADO" | "DELIVERED" => Ok(Self::Delivered),
            "CANCELADO" | "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(UnknownOrderStatus(s.to_owned())),
        }
    }
}

/// Reference to an order by key (`{"id": n}` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRef {
    pub id: OrderId,
}

/// Where an order is shipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingAddress {
    pub address: String,
    pub commune: String,
    pub region: String,
}

impl Default for ShippingAddress {
    fn default() -> Self {
        Self {
            address: String::new(),
            commune: String::new(),
            region: DEFAULT_REGION.to_owned(),
        }
    }
}

impl ShippingAddress {
    pub fn is_complete(&self) -> bool {
        [&self.address, &self.commune, &self.region]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub id: OrderId,
    #[serde(rename = "cliente", default)]
    pub customer: Option<CustomerRef>,
    #[serde(rename = "fechaPedido", default)]
    pub ordered_at: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(rename = "descuento", default, with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    #[serde(rename = "iva", default, with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(rename = "estado", default)]
    pub status: OrderStatus,
    #[serde(rename = "direccionEnvio", default)]
    pub shipping_address: String,
    #[serde(rename = "comunaEnvio", default)]
    pub shipping_commune: String,
    #[serde(rename = "regionEnvio", default)]
    pub shipping_region: String,
    #[serde(rename = "numeroSeguimiento", default)]
    pub tracking_number: Option<String>,
    #[serde(rename = "fechaActualizacion", default)]
    pub updated_at: Option<String>,
}

/// Body of `POST /api/pedidos` and `PUT /api/pedidos/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(rename = "cliente")]
    pub customer: CustomerRef,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(rename = "descuento", with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    #[serde(rename = "iva", with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(rename = "estado")]
    pub status: OrderStatus,
    #[serde(rename = "direccionEnvio")]
    pub shipping_address: String,
    #[serde(rename = "comunaEnvio")]
    pub shipping_commune: String,
    #[serde(rename = "regionEnvio")]
    pub shipping_region: String,
}

impl OrderRequest {
    /// New pending order for `customer` with the given totals.
    pub fn pending(customer: CustomerRef, totals: &CartTotals, ship_to: &ShippingAddress) -> Self {
        Self {
            customer,
            subtotal: totals.subtotal,
            discount: totals.discount,
            tax: totals.tax,
            total: totals.total,
            status: OrderStatus::Pending,
            shipping_address: ship_to.address.clone(),
            shipping_commune: ship_to.commune.clone(),
            shipping_region: ship_to.region.clone(),
        }
    }

    /// Copy a fetched order into an update body. `None` when the order has
    /// no customer reference to send back.
    pub fn from_order(order: &Order) -> Option<Self> {
        Some(Self {
            customer: order.customer?,
            subtotal: order.subtotal,
            discount: order.discount,
            tax: order.tax,
            total: order.total,
            status: order.status,
            shipping_address: order.shipping_address.clone(),
            shipping_commune: order.shipping_commune.clone(),
            shipping_region: order.shipping_region.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(default)]
    pub id: OrderLineId,
    #[serde(rename = "pedido", default)]
    pub order: Option<OrderRef>,
    #[serde(rename = "producto", default)]
    pub product: Option<Product>,
    #[serde(rename = "cantidad", default)]
    pub quantity: i32,
    #[serde(rename = "precioUnitario", default, with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(rename = "descuentoAplicado", default, with = "rust_decimal::serde::float")]
    pub discount_applied: Decimal,
}

/// Body of `POST /api/detalles-pedido`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineRequest {
    #[serde(rename = "pedido")]
    pub order: OrderRef,
    #[serde(rename = "producto")]
    pub product: ProductRef,
    #[serde(rename = "cantidad")]
    pub quantity: i32,
    #[serde(rename = "precioUnitario", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(rename = "descuentoAplicado", with = "rust_decimal::serde::float")]
    pub discount_applied: Decimal,
}

impl OrderLineRequest {
    /// Line for `quantity` units at `unit_price`, no discount.
    pub fn priced(order: OrderId, product: ProductRef, quantity: i32, unit_price: Decimal) -> Self {
        Self {
            order: OrderRef { id: order },
            product,
            quantity,
            unit_price,
            subtotal: unit_price * Decimal::from(quantity),
            discount_applied: Decimal::ZERO,
        }
    }
}
