use rincon_storefront::cli::{self, Command, OrderCommand, ProductCommand};

use crate::helpers::{request_log, start};

#[tokio::test]
async fn should_list_products_through_cli() {
    let env = start().await;

    cli::run(Command::Product(ProductCommand::List), &env.backend)
        .await
        .unwrap();

    assert_eq!(request_log(&env.mock), vec!["GET /api/productos"]);
}

#[tokio::test]
async fn should_list_customer_orders_through_cli() {
    let env = start().await;
    let customer = env.demo.customer.id;

    cli::run(Command::Orders(OrderCommand::List { customer }), &env.backend)
        .await
        .unwrap();

    assert_eq!(
        request_log(&env.mock),
        vec![format!("GET /api/pedidos/cliente/{customer}")]
    );
}
