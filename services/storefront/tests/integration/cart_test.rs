use reqwest::Method;
use rust_decimal::Decimal;

use rincon_domain::id::{CartLineId, CustomerId};
use rincon_storefront::error::StorefrontError;
use rincon_storefront::usecase::cart::{
    AddToCartInput, AddToCartUseCase, LoadCartUseCase, RemoveCartLineUseCase,
};

use crate::helpers::{TestEnv, request_log, start};

fn add_to_cart(env: &TestEnv) -> AddToCartUseCase<
    rincon_storefront::infra::http::RestBackend,
    rincon_storefront::infra::http::RestBackend,
> {
    AddToCartUseCase {
        products: env.backend.clone(),
        cart: env.backend.clone(),
    }
}

#[tokio::test]
async fn should_add_line_and_return_reloaded_cart() {
    let env = start().await;
    let customer = env.demo.customer.id;

    let view = add_to_cart(&env)
        .execute(AddToCartInput {
            customer,
            product: env.demo.sauvage.id,
            quantity: 2,
        })
        .await
        .unwrap();

    assert_eq!(view.lines.len(), 1);
    assert_eq!(view.lines[0].quantity, 2);
    assert_eq!(view.totals.subtotal, Decimal::new(179_980, 0));
    assert_eq!(env.mock.cart_lines(customer).len(), 1);
}

#[tokio::test]
async fn should_replace_existing_line_for_same_product() {
    let env = start().await;
    let customer = env.demo.customer.id;
    let uc = add_to_cart(&env);
    let input = |quantity| AddToCartInput {
        customer,
        product: env.demo.light_blue.id,
        quantity,
    };

    uc.execute(input(1)).await.unwrap();
    env.mock.clear_requests();
    let view = uc.execute(input(2)).await.unwrap();

    assert_eq!(view.lines.len(), 1);
    assert_eq!(view.lines[0].quantity, 2);
    let previous = request_log(&env.mock)
        .into_iter()
        .find(|r| r.starts_with("DELETE /api/carrito/"))
        .expect("previous line deleted");
    assert!(!previous.contains("vaciar"));
    assert_eq!(
        request_log(&env.mock),
        vec![
            "GET /api/productos/31".to_owned(),
            "GET /api/carrito/cliente/10".to_owned(),
            previous,
            "POST /api/carrito".to_owned(),
            "GET /api/carrito/cliente/10".to_owned(),
        ]
    );
}

#[tokio::test]
async fn should_reject_quantity_above_stock_without_touching_cart() {
    let env = start().await;

    let result = add_to_cart(&env)
        .execute(AddToCartInput {
            customer: env.demo.customer.id,
            product: env.demo.light_blue.id,
            quantity: 3,
        })
        .await;

    match result {
        Err(StorefrontError::InsufficientStock { product }) => assert_eq!(product, "Light Blue"),
        other => panic!("expected InsufficientStock, got {other:?}"),
    }
    assert!(env.mock.mutations().is_empty());
}

#[tokio::test]
async fn should_still_add_when_previous_line_delete_fails() {
    let env = start().await;
    let customer = env.demo.customer.id;
    let uc = add_to_cart(&env);
    let first = uc
        .execute(AddToCartInput {
            customer,
            product: env.demo.sauvage.id,
            quantity: 1,
        })
        .await
        .unwrap();
    env.mock.fail(
        Method::DELETE,
        format!("/api/carrito/{}", first.lines[0].id),
    );

    let view = uc
        .execute(AddToCartInput {
            customer,
            product: env.demo.sauvage.id,
            quantity: 3,
        })
        .await
        .unwrap();

    // The stale line survives next to the new one.
    let quantities: Vec<_> = view.lines.iter().map(|l| l.quantity).collect();
    assert_eq!(quantities, vec![1, 3]);
}

#[tokio::test]
async fn should_reject_invalid_customer_before_any_request() {
    let env = start().await;
    let uc = LoadCartUseCase {
        cart: env.backend.clone(),
    };

    let result = uc.execute(CustomerId(-1)).await;

    assert!(matches!(result, Err(StorefrontError::InvalidCustomerId)));
    assert!(env.mock.requests().is_empty());
}

#[tokio::test]
async fn should_remove_line_and_reload() {
    let env = start().await;
    let customer = env.demo.customer.id;
    let view = add_to_cart(&env)
        .execute(AddToCartInput {
            customer,
            product: env.demo.sauvage.id,
            quantity: 1,
        })
        .await
        .unwrap();
    let uc = RemoveCartLineUseCase {
        cart: env.backend.clone(),
    };

    let view = uc.execute(view.lines[0].id, customer).await.unwrap();

    assert!(view.is_empty());
    assert_eq!(view.totals.total, Decimal::ZERO);
}

#[tokio::test]
async fn should_fail_removing_unknown_line() {
    let env = start().await;
    let uc = RemoveCartLineUseCase {
        cart: env.backend.clone(),
    };

    let error = uc
        .execute(CartLineId(12_345), env.demo.customer.id)
        .await
        .unwrap_err();

    assert!(matches!(error, StorefrontError::Status { status: 404, .. }));
}
