//! Reference tables used to classify products: brand, category, gender and
//! product type.
//!
//! The four tables share one create/edit form ([`MasterDataForm`]) keyed by
//! [`MasterDataKind`]; each kind maps the form onto its own request body.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::{BrandId, CategoryId, GenderId, ProductTypeId};
use crate::validation::{ValidationError, non_blank, require_max_len, require_non_blank};

/// Maximum length of free-text descriptions and the country of origin.
pub const DESCRIPTION_MAX_LEN: usize = 255;

/// Entity-type tag of a master-data table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MasterDataKind {
    Brand,
    Category,
    Gender,
    ProductType,
}

impl MasterDataKind {
    pub const ALL: [MasterDataKind; 4] = [
        Self::Brand,
        Self::Category,
        Self::Gender,
        Self::ProductType,
    ];

    /// Path segment under `/api/` on the backend.
    pub fn segment(self) -> &'static str {
        match self {
            Self::Brand => "marcas",
            Self::Category => "categorias",
            Self::Gender => "generos",
            Self::ProductType => "tipos-producto",
        }
    }

    /// JSON name of the record key.
    pub fn key_field(self) -> &'static str {
        match self {
            Self::Brand => "idMarca",
            Self::Category => "idCategoria",
            Self::Gender => "idGenero",
            Self::ProductType => "idTipoProducto",
        }
    }

    /// Upper bound on the `name` column.
    pub fn name_max_len(self) -> usize {
        match self {
            Self::Gender => 50,
            Self::Brand | Self::Category | Self::ProductType => 100,
        }
    }

    pub fn has_description(self) -> bool {
        !matches!(self, Self::Gender)
    }

    pub fn has_country(self) -> bool {
        matches!(self, Self::Brand)
    }
}

impl fmt::Display for MasterDataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Brand => "brand",
            Self::Category => "category",
            Self::Gender => "gender",
            Self::ProductType => "product-type",
        };
        f.write_str(s)
    }
}

/// Error returned when a string cannot be parsed as a [`MasterDataKind`].
#[derive(Debug, Error)]
#[error("unknown master data kind: {0:?}")]
pub struct UnknownMasterDataKind(pub String);

impl FromStr for MasterDataKind {
    type Err = UnknownMasterDataKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brand" => Ok(Self::Brand),
            "category" => Ok(Self::Category),
            "gender" => Ok(Self::Gender),
            "product-type" => Ok(Self::ProductType),
            other => Err(UnknownMasterDataKind(other.to_owned())),
        }
    }
}

/// A record from one of the master-data tables.
pub trait MasterRecord: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Create/update body accepted by the backend for this table.
    type Request: Serialize + Send + Sync;

    const KIND: MasterDataKind;

    fn key(&self) -> i64;
    fn name(&self) -> &str;
    fn request_from_form(form: &MasterDataForm) -> Self::Request;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    #[serde(rename = "idMarca", default)]
    pub id: BrandId,
    #[serde(rename = "nombreMarca", default)]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "paisOrigen", default)]
    pub country_of_origin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandRequest {
    #[serde(rename = "nombreMarca")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "paisOrigen")]
    pub country_of_origin: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "idCategoria", default)]
    pub id: CategoryId,
    #[serde(rename = "nombreCategoria", default)]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRequest {
    #[serde(rename = "nombreCategoria")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gender {
    #[serde(rename = "idGenero", default)]
    pub id: GenderId,
    #[serde(rename = "nombreGenero", default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderRequest {
    #[serde(rename = "nombreGenero")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductType {
    #[serde(rename = "idTipoProducto", default)]
    pub id: ProductTypeId,
    #[serde(rename = "nombreTipo", default)]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductTypeRequest {
    #[serde(rename = "nombreTipo")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
}

impl MasterRecord for Brand {
    type Request = BrandRequest;
    const KIND: MasterDataKind = MasterDataKind::Brand;

    fn key(&self) -> i64 {
        self.id.0
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn request_from_form(form: &MasterDataForm) -> BrandRequest {
        BrandRequest {
            name: form.name.trim().to_owned(),
            description: non_blank(form.description.as_deref()),
            country_of_origin: non_blank(form.country_of_origin.as_deref()),
        }
    }
}

impl MasterRecord for Category {
    type Request = CategoryRequest;
    const KIND: MasterDataKind = MasterDataKind::Category;

    fn key(&self) -> i64 {
        self.id.0
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn request_from_form(form: &MasterDataForm) -> CategoryRequest {
        CategoryRequest {
            name: form.name.trim().to_owned(),
            description: non_blank(form.description.as_deref()),
        }
    }
}

impl MasterRecord for Gender {
    type Request = GenderRequest;
    const KIND: MasterDataKind = MasterDataKind::Gender;

    fn key(&self) -> i64 {
        self.id.0
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn request_from_form(form: &MasterDataForm) -> GenderRequest {
        GenderRequest {
            name: form.name.trim().to_owned(),
        }
    }
}

impl MasterRecord for ProductType {
    type Request = ProductTypeRequest;
    const KIND: MasterDataKind = MasterDataKind::ProductType;

    fn key(&self) -> i64 {
        self.id.0
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn request_from_form(form: &MasterDataForm) -> ProductTypeRequest {
        ProductTypeRequest {
            name: form.name.trim().to_owned(),
            description: non_blank(form.description.as_deref()),
        }
    }
}

/// Any master-data record, tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum MasterDataRecord {
    Brand(Brand),
    Category(Category),
    Gender(Gender),
    ProductType(ProductType),
}

impl MasterDataRecord {
    pub fn kind(&self) -> MasterDataKind {
        match self {
            Self::Brand(_) => MasterDataKind::Brand,
            Self::Category(_) => MasterDataKind::Category,
            Self::Gender(_) => MasterDataKind::Gender,
            Self::ProductType(_) => MasterDataKind::ProductType,
        }
    }

    pub fn key(&self) -> i64 {
        match self {
            Self::Brand(r) => r.key(),
            Self::Category(r) => r.key(),
            Self::Gender(r) => r.key(),
            Self::ProductType(r) => r.key(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Brand(r) => r.name(),
            Self::Category(r) => r.name(),
            Self::Gender(r) => r.name(),
            Self::ProductType(r) => r.name(),
        }
    }
}

/// Shared create/edit form for every master-data kind.
///
/// Fields a kind does not have are ignored when building its request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MasterDataForm {
    pub name: String,
    pub description: Option<String>,
    pub country_of_origin: Option<String>,
}

impl MasterDataForm {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Check the column limits enforced by the backend for `kind`.
    pub fn validate(&self, kind: MasterDataKind) -> Result<(), ValidationError> {
        require_non_blank("name", &self.name)?;
        require_max_len("name", self.name.trim(), kind.name_max_len())?;
        if kind.has_description() {
            if let Some(description) = &self.description {
                require_max_len("description", description.trim(), DESCRIPTION_MAX_LEN)?;
            }
        }
        if kind.has_country() {
            if let Some(country) = &self.country_of_origin {
                require_max_len("country_of_origin", country.trim(), DESCRIPTION_MAX_LEN)?;
            }
        }
        Ok(())
    }
}
