//! A small, fixed storefront dataset for tests and contract runs.

use rust_decimal::Decimal;

use rincon_domain::customer::Customer;
use rincon_domain::id::{
    BrandId, CategoryId, CustomerId, GenderId, ProductId, ProductTypeId, RoleId, UserId,
};
use rincon_domain::master_data::{Brand, Category, Gender, ProductType};
use rincon_domain::order::DEFAULT_REGION;
use rincon_domain::product::Product;
use rincon_domain::user::{Role, RoleName, User};

use crate::backend::MockBackend;

pub const ADMIN_EMAIL: &str = "admin@rincon.cl";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const CUSTOMER_EMAIL: &str = "cliente@test.com";
pub const CUSTOMER_PASSWORD: &str = "cliente123";
pub const MANAGER_EMAIL: &str = "encargado@rincon.cl";

/// Everything [`seed_demo`] inserted, with assigned keys.
#[derive(Debug, Clone)]
pub struct DemoData {
    pub admin: User,
    pub manager: User,
    pub customer_user: User,
    pub customer: Customer,
    pub brand: Brand,
    pub category: Category,
    pub gender: Gender,
    pub product_type: ProductType,
    /// Active, stock 10, price 89.990.
    pub sauvage: Product,
    /// Active, stock 2, price 12.990.
    pub light_blue: Product,
    /// Active but out of stock.
    pub sold_out: Product,
    /// Inactive with stock.
    pub retired: Product,
}

pub fn role(id: i64, name: RoleName) -> Role {
    Role {
        id: RoleId(id),
        name,
        description: None,
    }
}

/// Seed keys are fixed so contract fixtures can address records by id:
/// users 1-3, customer 10, master data 20-23, products 30-33.
pub fn seed_demo(backend: &MockBackend) -> DemoData {
    let admin = backend.seed_user(User {
        id: UserId(1),
        name: "Admin".into(),
        surname: "Rincón".into(),
        email: ADMIN_EMAIL.into(),
        password: ADMIN_PASSWORD.into(),
        active: true,
        roles: vec![role(1, RoleName::Admin)],
    });
    let manager = backend.seed_user(User {
        id: UserId(2),
        name: "Pedro".into(),
        surname: "Encargado".into(),
        email: MANAGER_EMAIL.into(),
        password: "encargado123".into(),
        active: false,
        roles: vec![role(2, RoleName::Manager)],
    });
    let customer_user = backend.seed_user(User {
        id: UserId(3),
        name: "Ana".into(),
        surname: "Rojas".into(),
        email: CUSTOMER_EMAIL.into(),
        password: CUSTOMER_PASSWORD.into(),
        active: true,
        roles: vec![Role::customer()],
    });
    let customer = backend.seed_customer(Customer {
        id: CustomerId(10),
        user: Some(customer_user.clone()),
        rut: "12345678-5".into(),
        first_name: "Ana".into(),
        second_name: None,
        first_surname: "Rojas".into(),
        second_surname: Some("Soto".into()),
        birth_date: "1990-04-12".into(),
        address: "Av. Providencia 1234".into(),
        commune: "Providencia".into(),
        region: DEFAULT_REGION.into(),
        phone: "+56912345678".into(),
        created_at: None,
    });

    let brand = backend.seed_master(Brand {
        id: BrandId(20),
        name: "Dior".into(),
        description: Some("Casa francesa".into()),
        country_of_origin: Some("Francia".into()),
    });
    let category = backend.seed_master(Category {
        id: CategoryId(21),
        name: "Amaderadas".into(),
        description: None,
    });
    let gender = backend.seed_master(Gender {
        id: GenderId(22),
        name: "Masculino".into(),
    });
    let product_type = backend.seed_master(ProductType {
        id: ProductTypeId(23),
        name: "Eau de Parfum".into(),
        description: None,
    });

    let perfume = |id: i64, name: &str, price: i64, stock: i32, active: bool| Product {
        id: ProductId(id),
        name: name.into(),
        description: Some(format!("{name} eau de parfum")),
        price: Decimal::new(price, 0),
        volume_ml: 100,
        brand: Some(brand.clone()),
        category: Some(category.clone()),
        product_type: Some(product_type.clone()),
        gender: Some(gender.clone()),
        stock,
        active,
        ..Default::default()
    };
    let sauvage = backend.seed_product(perfume(30, "Sauvage", 89_990, 10, true));
    let light_blue = backend.seed_product(perfume(31, "Light Blue", 12_990, 2, true));
    let sold_out = backend.seed_product(perfume(32, "Acqua di Gio", 74_990, 0, true));
    let retired = backend.seed_product(perfume(33, "Fahrenheit", 59_990, 5, false));

    DemoData {
        admin,
        manager,
        customer_user,
        customer,
        brand,
        category,
        gender,
        product_type,
        sauvage,
        light_blue,
        sold_out,
        retired,
    }
}
