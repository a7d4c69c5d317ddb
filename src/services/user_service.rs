use std::sync::Arc;

use crate::errors::internal::UserError;
use crate::services::cascade::CascadeService;
use crate::services::crypto;
use crate::stores::UserStore;
use crate::types::db::user;
use crate::types::internal::Role;

/// Registration, login verification and user administration.
pub struct UserService {
    user_store: Arc<UserStore>,
    cascade: Arc<CascadeService>,
}

impl UserService {
    pub fn new(user_store: Arc<UserStore>, cascade: Arc<CascadeService>) -> Self {
        Self {
            user_store,
            cascade,
        }
    }

    /// Create a user with a hashed password and the default role.
    /// Duplicate emails are rejected before any insert.
    pub async fn register(
        &self,
        name: String,
        email: String,
        password: &str,
    ) -> Result<user::Model, UserError> {
        if self.user_store.find_by_email(&email).await?.is_some() {
            return Err(UserError::DuplicateEmail);
        }

        let password_hash = crypto::hash_password(password)?;

        let user = self
            .user_store
            .create(name, email, password_hash, Role::StandardUser.as_str().to_string())
            .await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Verify email + password. Unknown email and wrong password produce
    /// the same `InvalidCredentials` error so the two cases cannot be told
    /// apart by a caller probing for accounts.
    pub async fn login(&self, email: &str, password: &str) -> Result<user::Model, UserError> {
        let user = self
            .user_store
            .find_by_email(email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !crypto::verify_password(password, &user.password_hash) {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn get_user(&self, user_id: &str) -> Result<user::Model, UserError> {
        self.user_store
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound)
    }

    pub async fn list_users(&self) -> Result<Vec<user::Model>, UserError> {
        Ok(self.user_store.find_all().await?)
    }

    /// Delete a user: cascade over owned lists first, then the record.
    pub async fn delete_user(&self, user_id: &str) -> Result<(), UserError> {
        let user = self
            .user_store
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound)?;

        self.cascade.delete_user_lists(&user.id).await?;
        self.user_store.delete(&user.id).await?;

        tracing::info!(user_id = %user.id, "user deleted");
        Ok(())
    }
}
