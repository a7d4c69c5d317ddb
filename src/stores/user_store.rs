use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::user::{self, Entity as User};

/// UserStore manages user records in the database
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a new user. The password must already be hashed.
    pub async fn create(
        &self,
        name: String,
        email: String,
        password_hash: String,
        role: String,
    ) -> Result<user::Model, InternalError> {
        let new_user = user::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(name),
            email: Set(email),
            password_hash: Set(password_hash),
            role: Set(role),
            created_at: Set(chrono::Utc::now().timestamp_micros()),
        };

        new_user
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("create_user", e))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_email", e))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<user::Model>, InternalError> {
        User::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_id", e))
    }

    pub async fn find_all(&self) -> Result<Vec<user::Model>, InternalError> {
        User::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_all_users", e))
    }

    /// Load several users at once, used to resolve member references.
    pub async fn find_many_by_ids(
        &self,
        ids: &[String],
    ) -> Result<Vec<user::Model>, InternalError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        User::find()
            .filter(user::Column::Id.is_in(ids.iter().cloned()))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_users_by_ids", e))
    }

    /// Delete the user record only. Cascading to owned lists is the
    /// responsibility of the cascade service, which must run first.
    pub async fn delete(&self, id: &str) -> Result<u64, InternalError> {
        let result = User::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_user", e))?;
        Ok(result.rows_affected)
    }
}
