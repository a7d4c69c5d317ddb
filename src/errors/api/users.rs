use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::internal::UserError;
use crate::policy::AccessError;
use crate::types::dto::common::ErrorResponse;

/// Error responses for the user endpoints
#[derive(ApiResponse, Debug)]
pub enum UserApiError {
    /// Malformed request body
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// No valid session
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Authenticated but not admitted by the access policy
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// User does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Email already registered
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl UserApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        UserApiError::BadRequest(Json(ErrorResponse {
            error: "validation_error".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    pub fn unauthenticated() -> Self {
        UserApiError::Unauthorized(Json(ErrorResponse {
            error: "not_authenticated".to_string(),
            message: "Not authenticated".to_string(),
            status_code: 401,
        }))
    }

    pub fn invalid_credentials() -> Self {
        UserApiError::Unauthorized(Json(ErrorResponse {
            error: "invalid_credentials".to_string(),
            message: "Invalid email or password".to_string(),
            status_code: 401,
        }))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        UserApiError::Forbidden(Json(ErrorResponse {
            error: "access_denied".to_string(),
            message: message.into(),
            status_code: 403,
        }))
    }

    pub fn not_found() -> Self {
        UserApiError::NotFound(Json(ErrorResponse {
            error: "user_not_found".to_string(),
            message: "User not found".to_string(),
            status_code: 404,
        }))
    }

    pub fn conflict() -> Self {
        UserApiError::Conflict(Json(ErrorResponse {
            error: "duplicate_email".to_string(),
            message: "User already exists with this email".to_string(),
            status_code: 409,
        }))
    }

    pub fn internal_error() -> Self {
        UserApiError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: "Internal server error".to_string(),
            status_code: 500,
        }))
    }

    pub fn message(&self) -> &str {
        match self {
            UserApiError::BadRequest(json) => &json.0.message,
            UserApiError::Unauthorized(json) => &json.0.message,
            UserApiError::Forbidden(json) => &json.0.message,
            UserApiError::NotFound(json) => &json.0.message,
            UserApiError::Conflict(json) => &json.0.message,
            UserApiError::InternalError(json) => &json.0.message,
        }
    }
}

impl fmt::Display for UserApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<UserError> for UserApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateEmail => UserApiError::conflict(),
            UserError::InvalidCredentials => UserApiError::invalid_credentials(),
            UserError::NotFound => UserApiError::not_found(),
            UserError::Internal(internal) => {
                tracing::error!(error = %internal, "internal error in user endpoint");
                UserApiError::internal_error()
            }
        }
    }
}

impl From<AccessError> for UserApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated => UserApiError::unauthenticated(),
            AccessError::UnknownRole(role) => {
                UserApiError::forbidden(format!("Unknown role: {}", role))
            }
            AccessError::Denied { .. } => UserApiError::forbidden("Access denied"),
        }
    }
}
