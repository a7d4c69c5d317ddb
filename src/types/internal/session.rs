use serde::{Deserialize, Serialize};

/// Identity attached to an authenticated session.
///
/// Stored in the server-side session at login and consumed by the access
/// policy and ownership rules on every protected request. Never contains
/// the password hash.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionUser {
    /// User ID (UUID)
    pub id: String,

    /// Display name
    pub name: String,

    /// Unique email address
    pub email: String,

    /// Role name (see `Role`)
    pub role: String,
}

impl SessionUser {
    pub fn from_user(user: &crate::types::db::user::Model) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}
