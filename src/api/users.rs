use poem::session::Session;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{guard, SESSION_USER_KEY};
use crate::errors::api::UserApiError;
use crate::policy::AccessPolicy;
use crate::services::UserService;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::users::{
    DeleteUserResponse, IdentityResponse, LoginRequest, RegisterRequest, UserResponse,
};
use crate::types::internal::session::SessionUser;

/// User account and session API endpoints
pub struct UserApi {
    user_service: Arc<UserService>,
    policy: Arc<AccessPolicy>,
}

impl UserApi {
    /// Create a new UserApi with the given UserService and AccessPolicy
    pub fn new(user_service: Arc<UserService>, policy: Arc<AccessPolicy>) -> Self {
        Self {
            user_service,
            policy,
        }
    }
}

/// API tags for user endpoints
#[derive(Tags)]
enum UserTags {
    /// User account endpoints
    Users,
}

#[OpenApi(prefix_path = "/users")]
impl UserApi {
    /// Register a new account. Always created as a StandardUser; no
    /// session is required.
    #[oai(path = "/register", method = "post", tag = "UserTags::Users")]
    async fn register(
        &self,
        body: Json<RegisterRequest>,
    ) -> Result<Json<UserResponse>, UserApiError> {
        let name = body.0.name.trim().to_string();
        let email = body.0.email.trim().to_lowercase();

        if name.is_empty() {
            return Err(UserApiError::bad_request("Name must not be empty"));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(UserApiError::bad_request("A valid email is required"));
        }
        if body.0.password.is_empty() {
            return Err(UserApiError::bad_request("Password must not be empty"));
        }

        let user = self
            .user_service
            .register(name, email, &body.0.password)
            .await?;

        Ok(Json(UserResponse::from_model(&user)))
    }

    /// Login with email and password. On success the identity is stored
    /// in the cookie session.
    #[oai(path = "/login", method = "post", tag = "UserTags::Users")]
    async fn login(
        &self,
        session: &Session,
        body: Json<LoginRequest>,
    ) -> Result<Json<UserResponse>, UserApiError> {
        let email = body.0.email.trim().to_lowercase();
        let user = self.user_service.login(&email, &body.0.password).await?;

        session.set(SESSION_USER_KEY, SessionUser::from_user(&user));
        tracing::info!(user_id = %user.id, "user logged in");

        Ok(Json(UserResponse::from_model(&user)))
    }

    /// Return the identity of the currently authenticated user
    #[oai(path = "/me", method = "get", tag = "UserTags::Users")]
    async fn me(&self, session: &Session) -> Result<Json<IdentityResponse>, UserApiError> {
        let actor = guard(&self.policy, session, "GET", "/api/users/me")?;

        Ok(Json(IdentityResponse {
            id: actor.id,
            name: actor.name,
            email: actor.email,
            role: actor.role,
        }))
    }

    /// Logout and destroy the session
    #[oai(path = "/logout", method = "post", tag = "UserTags::Users")]
    async fn logout(&self, session: &Session) -> Result<Json<MessageResponse>, UserApiError> {
        let actor = guard(&self.policy, session, "POST", "/api/users/logout")?;

        session.purge();
        tracing::info!(user_id = %actor.id, "user logged out");

        Ok(Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }))
    }

    /// List all users
    #[oai(path = "/", method = "get", tag = "UserTags::Users")]
    async fn list_users(
        &self,
        session: &Session,
    ) -> Result<Json<Vec<UserResponse>>, UserApiError> {
        guard(&self.policy, session, "GET", "/api/users")?;

        let users = self.user_service.list_users().await?;
        Ok(Json(users.iter().map(UserResponse::from_model).collect()))
    }

    /// Fetch a single user by id
    #[oai(path = "/:id", method = "get", tag = "UserTags::Users")]
    async fn get_user(
        &self,
        session: &Session,
        id: Path<String>,
    ) -> Result<Json<UserResponse>, UserApiError> {
        guard(
            &self.policy,
            session,
            "GET",
            &format!("/api/users/{}", id.0),
        )?;

        let user = self.user_service.get_user(&id.0).await?;
        Ok(Json(UserResponse::from_model(&user)))
    }

    /// Delete a user together with every list they own
    #[oai(path = "/:id", method = "delete", tag = "UserTags::Users")]
    async fn delete_user(
        &self,
        session: &Session,
        id: Path<String>,
    ) -> Result<Json<DeleteUserResponse>, UserApiError> {
        let actor = guard(
            &self.policy,
            session,
            "DELETE",
            &format!("/api/users/{}", id.0),
        )?;

        self.user_service.delete_user(&id.0).await?;

        // Deleting one's own account also ends the session.
        if actor.id == id.0 {
            session.purge();
        }

        Ok(Json(DeleteUserResponse {
            message: "User deleted".to_string(),
            id: id.0,
        }))
    }
}
