use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::internal::ListError;
use crate::policy::AccessError;
use crate::types::dto::common::ErrorResponse;

/// Error responses for the list and item endpoints
#[derive(ApiResponse, Debug)]
pub enum ListApiError {
    /// Malformed request body
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// No valid session
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Denied by the access policy or the ownership rules
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// List, item or referenced user does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl ListApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ListApiError::BadRequest(Json(ErrorResponse {
            error: "validation_error".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    pub fn unauthenticated() -> Self {
        ListApiError::Unauthorized(Json(ErrorResponse {
            error: "not_authenticated".to_string(),
            message: "Not authenticated".to_string(),
            status_code: 401,
        }))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ListApiError::Forbidden(Json(ErrorResponse {
            error: "access_denied".to_string(),
            message: message.into(),
            status_code: 403,
        }))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ListApiError::NotFound(Json(ErrorResponse {
            error: "not_found".to_string(),
            message: message.into(),
            status_code: 404,
        }))
    }

    pub fn internal_error() -> Self {
        ListApiError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: "Internal server error".to_string(),
            status_code: 500,
        }))
    }

    pub fn message(&self) -> &str {
        match self {
            ListApiError::BadRequest(json) => &json.0.message,
            ListApiError::Unauthorized(json) => &json.0.message,
            ListApiError::Forbidden(json) => &json.0.message,
            ListApiError::NotFound(json) => &json.0.message,
            ListApiError::InternalError(json) => &json.0.message,
        }
    }
}

impl fmt::Display for ListApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<ListError> for ListApiError {
    fn from(err: ListError) -> Self {
        match err {
            ListError::NotFound => ListApiError::not_found("List not found"),
            ListError::ItemNotInList => {
                ListApiError::not_found("Item does not belong to this list")
            }
            ListError::NotAMember => {
                ListApiError::not_found("User is not a member of this list")
            }
            ListError::MemberNotFound => ListApiError::not_found("User not found"),
            ListError::Ownership(denial) => ListApiError::forbidden(denial.to_string()),
            ListError::Internal(internal) => {
                tracing::error!(error = %internal, "internal error in list endpoint");
                ListApiError::internal_error()
            }
        }
    }
}

impl From<AccessError> for ListApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated => ListApiError::unauthenticated(),
            AccessError::UnknownRole(role) => {
                ListApiError::forbidden(format!("Unknown role: {}", role))
            }
            AccessError::Denied { .. } => ListApiError::forbidden("Access denied"),
        }
    }
}
