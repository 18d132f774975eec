//! Catalog products and their create/update body.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::id::{BrandId, CategoryId, GenderId, ProductId, ProductTypeId};
use crate::master_data::{Brand, Category, Gender, ProductType};
use crate::validation::{ValidationError, require_non_blank};

/// A perfume as returned by `GET /api/productos`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "idProducto", default)]
    pub id: ProductId,
    #[serde(rename = "nombreProducto", default)]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "precio", default, with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(rename = "volumenML", default)]
    pub volume_ml: i32,
    #[serde(rename = "marca", default)]
    pub brand: Option<Brand>,
    #[serde(rename = "categoria", default)]
    pub category: Option<Category>,
    #[serde(rename = "tipoProducto", default)]
    pub product_type: Option<ProductType>,
    #[serde(rename = "genero", default)]
    pub gender: Option<Gender>,
    #[serde(rename = "aroma", default)]
    pub aroma: Option<String>,
    #[serde(rename = "familiaOlfativa", default)]
    pub olfactory_family: Option<String>,
    #[serde(rename = "imagenUrl", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub stock: i32,
    #[serde(rename = "activo", default = "default_active")]
    pub active: bool,
    #[serde(rename = "fechaCreacion", default)]
    pub created_at: Option<String>,
    #[serde(rename = "fechaActualizacion", default)]
    pub updated_at: Option<String>,
}

fn default_active() -> bool {
    true
}

impl Product {
    /// Listed in the storefront catalog: active and in stock.
    pub fn is_purchasable(&self) -> bool {
        self.active && self.stock > 0
    }

    pub fn has_stock_for(&self, quantity: i32) -> bool {
        self.stock >= quantity
    }
}

/// Reference to a product by key, as embedded in other request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    #[serde(rename = "idProducto")]
    pub id: ProductId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandRef {
    #[serde(rename = "idMarca")]
    pub id: BrandId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    #[serde(rename = "idCategoria")]
    pub id: CategoryId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTypeRef {
    #[serde(rename = "idTipoProducto")]
    pub id: ProductTypeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderRef {
    #[serde(rename = "idGenero")]
    pub id: GenderId,
}

/// Body of `POST /api/productos` and `PUT /api/productos/{id}`.
///
/// Updates are full-record replacements: every field is sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRequest {
    #[serde(rename = "nombreProducto")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "precio", with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(rename = "volumenML")]
    pub volume_ml: i32,
    #[serde(rename = "marca")]
    pub brand: BrandRef,
    #[serde(rename = "categoria")]
    pub category: CategoryRef,
    #[serde(rename = "tipoProducto")]
    pub product_type: ProductTypeRef,
    #[serde(rename = "genero")]
    pub gender: GenderRef,
    pub aroma: Option<String>,
    #[serde(rename = "familiaOlfativa")]
    pub olfactory_family: Option<String>,
    #[serde(rename = "imagenUrl")]
    pub image_url: Option<String>,
    pub stock: i32,
    #[serde(rename = "activo")]
    pub active: bool,
}

impl ProductRequest {
    /// Copy a fetched product into an update body.
    ///
    /// Missing references are sent as key `0`, which is what the backend
    /// receives when a product was stored without that classification.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            volume_ml: product.volume_ml,
            brand: BrandRef {
                id: product.brand.as_ref().map(|b| b.id).unwrap_or_default(),
            },
            category: CategoryRef {
                id: product.category.as_ref().map(|c| c.id).unwrap_or_default(),
            },
            product_type: ProductTypeRef {
                id: product
                    .product_type
                    .as_ref()
                    .map(|t| t.id)
                    .unwrap_or_default(),
            },
            gender: GenderRef {
                id: product.gender.as_ref().map(|g| g.id).unwrap_or_default(),
            },
            aroma: product.aroma.clone(),
            olfactory_family: product.olfactory_family.clone(),
            image_url: product.image_url.clone(),
            stock: product.stock,
            active: product.active,
        }
    }

    /// Same record with `quantity` units taken out of stock.
    pub fn with_stock_decremented(mut self, quantity: i32) -> Self {
        self.stock = self.stock.saturating_sub(quantity);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("name", &self.name)?;
        if self.price.is_sign_negative() {
            return Err(ValidationError::Negative { field: "price" });
        }
        if self.stock < 0 {
            return Err(ValidationError::Negative { field: "stock" });
        }
        if self.volume_ml < 0 {
            return Err(ValidationError::Negative { field: "volume_ml" });
        }
        Ok(())
    }
}
