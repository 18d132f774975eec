use rincon_domain::auth::LoginRequest;
use rincon_domain::id::UserId;
use rincon_domain::user::User;

use crate::domain::repository::{AuthPort, CustomerRepository, UserRepository};
use crate::domain::types::Session;
use crate::error::StorefrontError;

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<A: AuthPort, U: UserRepository, C: CustomerRepository> {
    pub auth: A,
    pub users: U,
    pub customers: C,
}

impl<A: AuthPort, U: UserRepository, C: CustomerRepository> LoginUseCase<A, U, C> {
    pub async fn execute(&self, input: LoginInput) -> Result<Session, StorefrontError> {
        let email = input.email.trim();
        if email.is_empty() || input.password.trim().is_empty() {
            return Err(StorefrontError::IncompleteCredentials);
        }

        let response = self
            .auth
            .login(&LoginRequest {
                email: email.to_owned(),
                password: input.password,
            })
            .await?;
        if !response.authenticated {
            return Err(StorefrontError::InvalidCredentials(response.message));
        }

        // The login response carries no id or role; look the account up.
        let user = self
            .users
            .list()
            .await?
            .into_iter()
            .find(|u| u.email == email)
            .ok_or(StorefrontError::UserNotFound)?;
        let role = user.primary_role();

        let customer = match self.customers.list().await {
            Ok(customers) => customers
                .into_iter()
                .find(|c| c.email() == Some(user.email.as_str())),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    user_id = %user.id,
                    "could not resolve customer profile"
                );
                None
            }
        };

        tracing::info!(user_id = %user.id, %role, has_customer = customer.is_some(), "signed in");
        Ok(Session {
            user,
            role,
            customer,
        })
    }
}

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetProfileUseCase<U> {
    pub async fn execute(&self, id: UserId) -> Result<User, StorefrontError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(StorefrontError::UserNotFound)
    }
}
