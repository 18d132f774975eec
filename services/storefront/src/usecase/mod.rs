pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod master_data;
pub mod order;
pub mod product;
pub mod registration;
pub mod user;

#[cfg(test)]
mod fake;
