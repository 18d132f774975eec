use rust_decimal::Decimal;

use rincon_domain::id::{RoleId, UserId};
use rincon_domain::master_data::{Brand, Gender, MasterDataForm, MasterDataKind};
use rincon_domain::user::{Role, RoleName, User};
use rincon_storefront::domain::types::ProductDraft;
use rincon_storefront::error::StorefrontError;
use rincon_storefront::usecase::master_data::{
    CreateMasterRecordUseCase, DeleteMasterRecordUseCase, LoadMasterDataUseCase,
    UpdateMasterRecordUseCase,
};
use rincon_storefront::usecase::product::{
    CreateProductUseCase, DeleteProductUseCase, ListProductsUseCase, UpdateProductUseCase,
};
use rincon_storefront::usecase::registration::{RegisterCustomerUseCase, RegistrationForm};
use rincon_storefront::usecase::user::{ListUsersUseCase, SetUserActiveUseCase};

use crate::helpers::{TestEnv, request_log, start};

fn draft(env: &TestEnv, name: &str, stock: i32) -> ProductDraft {
    ProductDraft {
        name: name.into(),
        description: Some("  ".into()),
        price: Decimal::new(54_990, 0),
        volume_ml: 90,
        brand: env.demo.brand.id,
        category: env.demo.category.id,
        product_type: env.demo.product_type.id,
        gender: env.demo.gender.id,
        stock,
        active: true,
        ..Default::default()
    }
}

fn registration() -> RegistrationForm {
    RegistrationForm {
        rut: "11111111-1".into(),
        first_name: "Camila".into(),
        first_surname: "Pérez".into(),
        email: "camila@test.com".into(),
        password: "camila123".into(),
        password_confirmation: "camila123".into(),
        birth_date: "1995-08-20".into(),
        phone: "+56933334444".into(),
        address: "Los Leones 55".into(),
        commune: "Ñuñoa".into(),
        ..Default::default()
    }
}

// ── Products ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_update_and_delete_product() {
    let env = start().await;

    let created = CreateProductUseCase {
        products: env.backend.clone(),
    }
    .execute(draft(&env, " Sauvage Elixir ", 5))
    .await
    .unwrap();
    assert_eq!(created.name, "Sauvage Elixir");
    assert!(created.description.is_none());
    assert_eq!(created.brand.as_ref().map(|b| b.id), Some(env.demo.brand.id));

    let updated = UpdateProductUseCase {
        products: env.backend.clone(),
    }
    .execute(created.id, draft(&env, "Sauvage Elixir", 0))
    .await
    .unwrap();
    assert_eq!(updated.stock, 0);
    assert!(!updated.is_purchasable());

    DeleteProductUseCase {
        products: env.backend.clone(),
    }
    .execute(created.id)
    .await
    .unwrap();

    let all = ListProductsUseCase {
        products: env.backend.clone(),
    }
    .execute()
    .await
    .unwrap();
    assert_eq!(all.len(), 4, "inactive and sold-out products are listed for admins");
    assert!(env.mock.product(created.id).is_none());
    let id = created.id;
    assert_eq!(
        request_log(&env.mock),
        vec![
            "POST /api/productos".to_owned(),
            format!("PUT /api/productos/{id}"),
            format!("DELETE /api/productos/{id}"),
            "GET /api/productos".to_owned(),
        ]
    );
}

#[tokio::test]
async fn should_reject_invalid_product_draft_locally() {
    let env = start().await;
    let uc = CreateProductUseCase {
        products: env.backend.clone(),
    };

    let result = uc.execute(draft(&env, "   ", 1)).await;

    assert_eq!(result.unwrap_err().kind(), "VALIDATION");
    assert!(env.mock.requests().is_empty());
}

// ── Master data ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_manage_master_records_by_kind() {
    let env = start().await;

    let brand: Brand = CreateMasterRecordUseCase {
        master: env.backend.clone(),
    }
    .execute(&MasterDataForm {
        name: "Dolce & Gabbana".into(),
        description: None,
        country_of_origin: Some("Italia".into()),
    })
    .await
    .unwrap();
    assert!(brand.id.is_assigned());

    let gender: Gender = UpdateMasterRecordUseCase {
        master: env.backend.clone(),
    }
    .execute(env.demo.gender.id.0, &MasterDataForm::named("Unisex"))
    .await
    .unwrap();
    assert_eq!(gender.id, env.demo.gender.id);

    DeleteMasterRecordUseCase {
        master: env.backend.clone(),
    }
    .execute(MasterDataKind::Category, env.demo.category.id.0)
    .await
    .unwrap();

    let data = LoadMasterDataUseCase {
        master: env.backend.clone(),
    }
    .execute()
    .await;
    let brands: Vec<_> = data.brands.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(brands, vec!["Dior", "Dolce & Gabbana"]);
    assert_eq!(data.genders[0].name, "Unisex");
    assert!(data.categories.is_empty());
    assert_eq!(data.product_types.len(), 1);
    assert!(
        env.mock
            .master(MasterDataKind::Brand)
            .iter()
            .any(|v| v["paisOrigen"] == "Italia")
    );
}

#[tokio::test]
async fn should_surface_not_found_when_deleting_missing_record() {
    let env = start().await;
    let uc = DeleteMasterRecordUseCase {
        master: env.backend.clone(),
    };

    let error = uc.execute(MasterDataKind::Gender, 999).await.unwrap_err();

    assert!(matches!(error, StorefrontError::Status { status: 404, .. }));
    assert_eq!(request_log(&env.mock), vec!["DELETE /api/generos/999"]);
}

// ── Users ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_approve_pending_manager() {
    let env = start().await;
    let directory = ListUsersUseCase {
        users: env.backend.clone(),
    }
    .execute()
    .await
    .unwrap();
    let pending: Vec<_> = directory.pending.iter().map(|u| u.id).collect();
    assert_eq!(pending, vec![env.demo.manager.id]);
    env.mock.clear_requests();

    let approved = SetUserActiveUseCase {
        users: env.backend.clone(),
    }
    .approve(env.demo.manager.id)
    .await
    .unwrap();

    assert!(approved.active);
    assert_eq!(approved.primary_role(), RoleName::Manager);
    assert_eq!(
        request_log(&env.mock),
        vec!["GET /usuarios/2", "PUT /api/usuarios/2"]
    );
    let stored = env.mock.users();
    assert!(stored.iter().any(|u| u.id == UserId(2) && u.active));
}

#[tokio::test]
async fn should_keep_unrecognized_role_when_deactivating_user() {
    let env = start().await;
    let supervisor = env.mock.seed_user(User {
        name: "Supervisora".into(),
        email: "supervisora@rincon.cl".into(),
        active: true,
        roles: vec![Role {
            id: RoleId(5),
            name: RoleName::Unknown("SUPERVISOR".into()),
            description: None,
        }],
        ..Default::default()
    });

    SetUserActiveUseCase {
        users: env.backend.clone(),
    }
    .deactivate(supervisor.id)
    .await
    .unwrap();

    let stored = env
        .mock
        .users()
        .into_iter()
        .find(|u| u.id == supervisor.id)
        .unwrap();
    assert!(!stored.active);
    assert_eq!(stored.roles[0].name.as_wire(), "SUPERVISOR");
    assert_eq!(stored.roles[0].id, RoleId(5));
}

// ── Registration ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_customer_with_linked_account() {
    let env = start().await;
    let uc = RegisterCustomerUseCase {
        customers: env.backend.clone(),
    };

    let customer = uc.execute(registration()).await.unwrap();

    assert!(customer.id.is_assigned());
    assert_eq!(customer.region, "Metropolitana");
    assert_eq!(customer.email(), Some("camila@test.com"));
    assert_eq!(request_log(&env.mock), vec!["POST /api/clientes"]);
    assert_eq!(env.mock.customers().len(), 2);
}

#[tokio::test]
async fn should_surface_conflict_for_duplicate_rut() {
    let env = start().await;
    let uc = RegisterCustomerUseCase {
        customers: env.backend.clone(),
    };
    let duplicate = RegistrationForm {
        rut: env.demo.customer.rut.clone(),
        email: "otra@test.com".into(),
        ..registration()
    };

    let error = uc.execute(duplicate).await.unwrap_err();

    assert!(matches!(error, StorefrontError::Status { status: 409, .. }));
    assert_eq!(env.mock.customers().len(), 1);
}
