use std::time::Duration;

use rincon_domain::id::{CustomerId, UserId};
use rincon_domain::user::RoleName;
use rincon_storefront::error::StorefrontError;
use rincon_storefront::infra::http::RestBackend;
use rincon_storefront::usecase::auth::{GetProfileUseCase, LoginInput, LoginUseCase};
use rincon_testing::seed::{
    ADMIN_EMAIL, ADMIN_PASSWORD, CUSTOMER_EMAIL, CUSTOMER_PASSWORD, MANAGER_EMAIL,
};

use crate::helpers::{request_log, start};

fn login_input(email: &str, password: &str) -> LoginInput {
    LoginInput {
        email: email.into(),
        password: password.into(),
    }
}

// ── LoginUseCase ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_sign_in_customer_and_link_profile() {
    let env = start().await;
    let uc = LoginUseCase {
        auth: env.backend.clone(),
        users: env.backend.clone(),
        customers: env.backend.clone(),
    };

    let session = uc
        .execute(login_input(CUSTOMER_EMAIL, CUSTOMER_PASSWORD))
        .await
        .unwrap();

    assert_eq!(session.role, RoleName::Customer);
    assert_eq!(session.user.id, UserId(3));
    assert_eq!(session.customer.map(|c| c.id), Some(CustomerId(10)));
    assert_eq!(
        request_log(&env.mock),
        vec!["POST /api/auth/login", "GET /api/usuarios", "GET /api/clientes"]
    );
}

#[tokio::test]
async fn should_sign_in_admin_without_customer_profile() {
    let env = start().await;
    let uc = LoginUseCase {
        auth: env.backend.clone(),
        users: env.backend.clone(),
        customers: env.backend.clone(),
    };

    let session = uc
        .execute(login_input(ADMIN_EMAIL, ADMIN_PASSWORD))
        .await
        .unwrap();

    assert_eq!(session.role, RoleName::Admin);
    assert!(session.role.is_staff());
    assert!(session.customer.is_none());
}

#[tokio::test]
async fn should_reject_wrong_password_with_backend_message() {
    let env = start().await;
    let uc = LoginUseCase {
        auth: env.backend.clone(),
        users: env.backend.clone(),
        customers: env.backend.clone(),
    };

    let result = uc.execute(login_input(CUSTOMER_EMAIL, "nope")).await;

    match result {
        Err(StorefrontError::InvalidCredentials(message)) => {
            assert_eq!(message, "Credenciales inválidas")
        }
        other => panic!("expected InvalidCredentials, got {other:?}"),
    }
}

#[tokio::test]
async fn should_reject_inactive_manager() {
    let env = start().await;
    let uc = LoginUseCase {
        auth: env.backend.clone(),
        users: env.backend.clone(),
        customers: env.backend.clone(),
    };

    let result = uc.execute(login_input(MANAGER_EMAIL, "encargado123")).await;

    assert!(matches!(result, Err(StorefrontError::InvalidCredentials(_))));
}

#[tokio::test]
async fn should_surface_login_endpoint_failure_as_status_error() {
    let env = start().await;
    env.mock.fail(reqwest::Method::POST, "/api/auth/login");
    let uc = LoginUseCase {
        auth: env.backend.clone(),
        users: env.backend.clone(),
        customers: env.backend.clone(),
    };

    let error = uc
        .execute(login_input(CUSTOMER_EMAIL, CUSTOMER_PASSWORD))
        .await
        .unwrap_err();

    assert_eq!(error.kind(), "HTTP_STATUS");
    assert_eq!(error.to_string(), "/api/auth/login answered HTTP 500");
}

// ── GetProfileUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_fetch_profile_outside_api_prefix() {
    let env = start().await;
    let uc = GetProfileUseCase {
        users: env.backend.clone(),
    };

    let user = uc.execute(env.demo.admin.id).await.unwrap();

    assert_eq!(user.email, ADMIN_EMAIL);
    assert_eq!(request_log(&env.mock), vec!["GET /usuarios/1"]);
}

#[tokio::test]
async fn should_map_missing_profile_to_user_not_found() {
    let env = start().await;
    let uc = GetProfileUseCase {
        users: env.backend.clone(),
    };

    let result = uc.execute(UserId(999)).await;

    assert!(matches!(result, Err(StorefrontError::UserNotFound)));
}

// ── Transport ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_send_a_fresh_request_id_on_every_call() {
    let env = start().await;
    let uc = GetProfileUseCase {
        users: env.backend.clone(),
    };

    uc.execute(UserId(1)).await.unwrap();
    uc.execute(UserId(1)).await.unwrap();

    let ids: Vec<_> = env
        .mock
        .requests()
        .into_iter()
        .map(|r| r.request_id.expect("x-request-id header"))
        .collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
    assert!(uuid_like(&ids[0]), "{}", ids[0]);
}

#[tokio::test]
async fn should_report_transport_error_when_backend_is_down() {
    // Reserve a port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let backend = RestBackend::new(&format!("http://{addr}"), Duration::from_secs(2)).unwrap();
    let uc = GetProfileUseCase { users: backend };

    let error = uc.execute(UserId(1)).await.unwrap_err();

    assert_eq!(error.kind(), "TRANSPORT");
    assert!(error.to_string().starts_with("request to /usuarios/1 failed"));
}

fn uuid_like(s: &str) -> bool {
    s.len() == 36 && s.chars().filter(|c| *c == '-').count() == 4
}
