use std::fmt;

use rust_decimal::Decimal;

use rincon_domain::cart::CartLine;
use rincon_domain::customer::Customer;
use rincon_domain::id::{BrandId, CategoryId, GenderId, ProductTypeId};
use rincon_domain::master_data::{Brand, Category, Gender, ProductType};
use rincon_domain::money::CartTotals;
use rincon_domain::order::Order;
use rincon_domain::product::{
    BrandRef, CategoryRef, GenderRef, Product, ProductRequest, ProductTypeRef,
};
use rincon_domain::user::{RoleName, User};
use rincon_domain::validation::{ValidationError, non_blank};

// ── Session ──────────────────────────────────────────────────────────────────

/// The signed-in user. Nothing here is sent back to the backend; later
/// calls identify the customer by id alone.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub role: RoleName,
    /// Customer profile linked by email. Staff accounts usually have none.
    pub customer: Option<Customer>,
}

impl Session {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.user.name, self.user.surname)
            .trim()
            .to_owned()
    }
}

// ── Catalog ──────────────────────────────────────────────────────────────────

/// Client-side catalog filter. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    /// Case-insensitive substring of the name or description.
    pub text: Option<String>,
    pub category: Option<CategoryId>,
    pub brand: Option<BrandId>,
    pub gender: Option<GenderId>,
}

impl CatalogFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(needle) = self
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            let needle = needle.to_lowercase();
            let in_name = product.name.to_lowercase().contains(&needle);
            let in_description = product
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_name && !in_description {
                return false;
            }
        }
        if let Some(id) = self.category {
            if product.category.as_ref().map(|c| c.id) != Some(id) {
                return false;
            }
        }
        if let Some(id) = self.brand {
            if product.brand.as_ref().map(|b| b.id) != Some(id) {
                return false;
            }
        }
        if let Some(id) = self.gender {
            if product.gender.as_ref().map(|g| g.id) != Some(id) {
                return false;
            }
        }
        true
    }
}

/// Purchasable products plus the lists used to build filter choices.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
    pub genders: Vec<Gender>,
}

impl Catalog {
    pub fn filtered(&self, filter: &CatalogFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }
}

// ── Product administration ───────────────────────────────────────────────────

/// Product create/edit form as entered by an administrator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub volume_ml: i32,
    pub brand: BrandId,
    pub category: CategoryId,
    pub product_type: ProductTypeId,
    pub gender: GenderId,
    pub aroma: Option<String>,
    pub olfactory_family: Option<String>,
    pub image_url: Option<String>,
    pub stock: i32,
    pub active: bool,
}

impl ProductDraft {
    /// Normalise blank optional text to `None` and validate.
    pub fn into_request(self) -> Result<ProductRequest, ValidationError> {
        let request = ProductRequest {
            name: self.name.trim().to_owned(),
            description: non_blank(self.description.as_deref()),
            price: self.price,
            volume_ml: self.volume_ml,
            brand: BrandRef { id: self.brand },
            category: CategoryRef { id: self.category },
            product_type: ProductTypeRef {
                id: self.product_type,
            },
            gender: GenderRef { id: self.gender },
            aroma: non_blank(self.aroma.as_deref()),
            olfactory_family: non_blank(self.olfactory_family.as_deref()),
            image_url: non_blank(self.image_url.as_deref()),
            stock: self.stock,
            active: self.active,
        };
        request.validate()?;
        Ok(request)
    }
}

// ── Cart ─────────────────────────────────────────────────────────────────────

/// A customer's cart with its computed totals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

impl CartView {
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let totals = CartTotals::from_lines(&lines);
        Self { lines, totals }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// ── Checkout ─────────────────────────────────────────────────────────────────

/// Steps of the order placement workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutState {
    #[default]
    Idle,
    ValidatingStock,
    CreatingOrder,
    CreatingLines,
    DecrementingStock,
    ClearingCart,
    Done,
    Error,
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::ValidatingStock => "validating stock",
            Self::CreatingOrder => "creating order",
            Self::CreatingLines => "creating order lines",
            Self::DecrementingStock => "decrementing stock",
            Self::ClearingCart => "clearing cart",
            Self::Done => "done",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

/// A step that failed without aborting the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutWarning {
    pub step: CheckoutState,
    pub detail: String,
}

/// Outcome of a completed checkout.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    pub order: Order,
    pub totals: CartTotals,
    /// Partial failures after the order was created. The order is not rolled
    /// back when these occur.
    pub warnings: Vec<CheckoutWarning>,
}

// ── Master data ──────────────────────────────────────────────────────────────

/// All four master-data tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MasterData {
    pub brands: Vec<Brand>,
    pub categories: Vec<Category>,
    pub genders: Vec<Gender>,
    pub product_types: Vec<ProductType>,
}

// ── User administration ──────────────────────────────────────────────────────

/// Every user, plus the two views shown to administrators.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    pub all: Vec<User>,
    /// Inactive managers waiting for approval.
    pub pending: Vec<User>,
    pub active: Vec<User>,
}

impl UserDirectory {
    pub fn from_users(all: Vec<User>) -> Self {
        let pending = all
            .iter()
            .filter(|u| u.is_pending_approval())
            .cloned()
            .collect();
        let active = all.iter().filter(|u| u.active).cloned().collect();
        Self {
            all,
            pending,
            active,
        }
    }
}
