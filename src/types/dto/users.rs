use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::user;

/// Request model for user registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Display name
    pub name: String,

    /// Unique email address
    pub email: String,

    /// Plaintext password (hashed before storage, never persisted)
    pub password: String,
}

/// Request model for login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,

    /// Plaintext password
    pub password: String,
}

/// Full user representation. Never includes the password hash.
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID (UUID)
    pub id: String,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Role name
    pub role: String,

    /// Creation time (ISO 8601 format)
    pub created_at: String,
}

impl UserResponse {
    pub fn from_model(user: &user::Model) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            created_at: crate::types::dto::to_rfc3339(user.created_at),
        }
    }
}

/// Compact user representation embedded in list responses.
/// Built from the entity without the password hash by construction.
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UserSummary {
    /// User ID (UUID)
    pub id: String,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,
}

impl UserSummary {
    pub fn from_model(user: &user::Model) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Identity of the currently authenticated user
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct IdentityResponse {
    /// User ID (UUID)
    pub id: String,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Role name
    pub role: String,
}

/// Response model for user deletion
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    /// Success message
    pub message: String,

    /// ID of the deleted user
    pub id: String,
}
