//! Wire and domain types for the Rincón storefront.
//!
//! Pure types, money arithmetic and field validators. No I/O: the REST
//! adapter and use cases live in the `storefront` service crate.

pub mod auth;
pub mod cart;
pub mod customer;
pub mod id;
pub mod master_data;
pub mod money;
pub mod order;
pub mod product;
pub mod user;
pub mod validation;
