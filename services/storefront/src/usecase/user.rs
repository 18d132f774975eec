use rincon_domain::id::UserId;
use rincon_domain::user::User;

use crate::domain::repository::UserRepository;
use crate::domain::types::UserDirectory;
use crate::error::StorefrontError;

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListUsersUseCase<U> {
    pub async fn execute(&self) -> Result<UserDirectory, StorefrontError> {
        let users = self.users.list().await?;
        Ok(UserDirectory::from_users(users))
    }
}

// ── ApproveUser / DeactivateUser ─────────────────────────────────────────────

/// Sets the `activo` flag of a user, sending the full record back.
pub struct SetUserActiveUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SetUserActiveUseCase<U> {
    pub async fn approve(&self, id: UserId) -> Result<User, StorefrontError> {
        self.execute(id, true).await
    }

    pub async fn deactivate(&self, id: UserId) -> Result<User, StorefrontError> {
        self.execute(id, false).await
    }

    pub async fn execute(&self, id: UserId, active: bool) -> Result<User, StorefrontError> {
        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(StorefrontError::UserNotFound)?;
        user.active = active;
        let updated = self.users.update(id, &user).await?;
        tracing::info!(user_id = %id, active, "user activation changed");
        Ok(updated)
    }
}
