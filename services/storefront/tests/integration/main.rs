
mod admin_test;
mod auth_test;
mod cart_test;
mod catalog_test;
mod cli_test;
mod order_test;
