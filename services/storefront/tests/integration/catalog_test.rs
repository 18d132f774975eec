use reqwest::Method;

use rincon_domain::id::ProductId;
use rincon_storefront::domain::types::CatalogFilter;
use rincon_storefront::error::StorefrontError;
use rincon_storefront::usecase::catalog::{GetProductUseCase, LoadCatalogUseCase};

use crate::helpers::start;

#[tokio::test]
async fn should_hide_sold_out_and_inactive_products() {
    let env = start().await;
    let uc = LoadCatalogUseCase {
        products: env.backend.clone(),
        master: env.backend.clone(),
    };

    let catalog = uc.execute().await;

    let names: Vec<_> = catalog.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Sauvage", "Light Blue"]);
    assert_eq!(catalog.brands.len(), 1);
    assert_eq!(catalog.categories.len(), 1);
    assert_eq!(catalog.genders.len(), 1);
}

#[tokio::test]
async fn should_filter_catalog_by_text_and_brand() {
    let env = start().await;
    let uc = LoadCatalogUseCase {
        products: env.backend.clone(),
        master: env.backend.clone(),
    };
    let catalog = uc.execute().await;

    let by_text = CatalogFilter {
        text: Some("LIGHT".into()),
        ..Default::default()
    };
    let found: Vec<_> = catalog.filtered(&by_text).iter().map(|p| p.id).collect();
    assert_eq!(found, vec![env.demo.light_blue.id]);

    let by_brand = CatalogFilter {
        brand: Some(env.demo.brand.id),
        ..Default::default()
    };
    assert_eq!(catalog.filtered(&by_brand).len(), 2);
}

#[tokio::test]
async fn should_keep_products_when_a_filter_list_fails() {
    let env = start().await;
    env.mock.fail(Method::GET, "/api/marcas");
    let uc = LoadCatalogUseCase {
        products: env.backend.clone(),
        master: env.backend.clone(),
    };

    let catalog = uc.execute().await;

    assert!(catalog.brands.is_empty());
    assert_eq!(catalog.products.len(), 2);
    assert_eq!(catalog.genders.len(), 1);
}

#[tokio::test]
async fn should_show_empty_catalog_when_products_fail() {
    let env = start().await;
    env.mock.fail(Method::GET, "/api/productos");
    let uc = LoadCatalogUseCase {
        products: env.backend.clone(),
        master: env.backend.clone(),
    };

    let catalog = uc.execute().await;

    assert!(catalog.products.is_empty());
    assert_eq!(catalog.categories.len(), 1);
}

#[tokio::test]
async fn should_fetch_product_detail_with_embedded_master_data() {
    let env = start().await;
    let uc = GetProductUseCase {
        products: env.backend.clone(),
    };

    let product = uc.execute(env.demo.sauvage.id).await.unwrap();

    assert_eq!(product.brand.map(|b| b.name), Some("Dior".to_owned()));
    assert_eq!(product.price, env.demo.sauvage.price);
}

#[tokio::test]
async fn should_map_missing_product_to_not_found() {
    let env = start().await;
    let uc = GetProductUseCase {
        products: env.backend.clone(),
    };

    let result = uc.execute(ProductId(404)).await;

    assert!(matches!(result, Err(StorefrontError::ProductNotFound)));
}
