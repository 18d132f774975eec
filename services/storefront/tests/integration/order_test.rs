use rust_decimal::Decimal;

use rincon_domain::customer::CustomerRef;
use rincon_domain::id::{CustomerId, OrderId};
use rincon_domain::order::{Order, OrderLine, OrderRef, OrderStatus};
use rincon_storefront::error::StorefrontError;
use rincon_storefront::usecase::order::{
    GetOrderUseCase, ListOrderLinesUseCase, ListOrdersUseCase, UpdateOrderStatusUseCase,
};

use crate::helpers::{TestEnv, request_log, start};

fn seed_order(env: &TestEnv, id: i64, ordered_at: Option<&str>) -> Order {
    env.mock.seed_order(Order {
        id: OrderId(id),
        customer: Some(CustomerRef {
            id: env.demo.customer.id,
        }),
        ordered_at: ordered_at.map(str::to_owned),
        subtotal: Decimal::new(12_990, 0),
        total: Decimal::new(15_458, 0),
        shipping_address: "Av. Providencia 1234".into(),
        shipping_commune: "Providencia".into(),
        shipping_region: "Metropolitana".into(),
        ..Default::default()
    })
}

#[tokio::test]
async fn should_list_customer_orders_newest_first() {
    let env = start().await;
    seed_order(&env, 100, Some("2025-01-10T10:00:00"));
    seed_order(&env, 101, None);
    seed_order(&env, 102, Some("2025-03-02T09:30:00"));
    env.mock.seed_order(Order {
        id: OrderId(103),
        customer: Some(CustomerRef { id: CustomerId(99) }),
        ..Default::default()
    });
    let uc = ListOrdersUseCase {
        orders: env.backend.clone(),
    };

    let orders = uc.execute(env.demo.customer.id).await.unwrap();

    let ids: Vec<_> = orders.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![OrderId(102), OrderId(100), OrderId(101)]);
    assert_eq!(request_log(&env.mock), vec!["GET /api/pedidos/cliente/10"]);
}

#[tokio::test]
async fn should_send_whole_order_back_with_new_status() {
    let env = start().await;
    let order = seed_order(&env, 100, Some("2025-01-10T10:00:00"));
    let uc = UpdateOrderStatusUseCase {
        orders: env.backend.clone(),
    };

    let updated = uc.execute(order.id, OrderStatus::Shipped).await.unwrap();

    assert_eq!(updated.status, OrderStatus::Shipped);
    assert_eq!(updated.total, order.total);
    assert_eq!(updated.shipping_commune, "Providencia");
    assert!(updated.updated_at.is_some());
    assert_eq!(
        request_log(&env.mock),
        vec!["GET /api/pedidos/100", "PUT /api/pedidos/100"]
    );
}

#[tokio::test]
async fn should_report_missing_order() {
    let env = start().await;

    let get = GetOrderUseCase {
        orders: env.backend.clone(),
    };
    assert!(matches!(
        get.execute(OrderId(404)).await,
        Err(StorefrontError::OrderNotFound)
    ));

    let update = UpdateOrderStatusUseCase {
        orders: env.backend.clone(),
    };
    assert!(matches!(
        update.execute(OrderId(404), OrderStatus::Cancelled).await,
        Err(StorefrontError::OrderNotFound)
    ));
    assert!(env.mock.mutations().is_empty());
}

#[tokio::test]
async fn should_list_lines_of_one_order() {
    let env = start().await;
    let order = seed_order(&env, 100, None);
    let other = seed_order(&env, 101, None);
    for (target, quantity) in [(&order, 2), (&other, 1), (&order, 1)] {
        env.mock.seed_order_line(OrderLine {
            order: Some(OrderRef { id: target.id }),
            product: Some(env.demo.sauvage.clone()),
            quantity,
            unit_price: env.demo.sauvage.price,
            ..Default::default()
        });
    }
    let uc = ListOrderLinesUseCase {
        order_lines: env.backend.clone(),
    };

    let lines = uc.execute(order.id).await.unwrap();

    let quantities: Vec<_> = lines.iter().map(|l| l.quantity).collect();
    assert_eq!(quantities, vec![2, 1]);
    assert_eq!(
        request_log(&env.mock),
        vec!["GET /api/detalles-pedido/pedido/100"]
    );
}
