use thiserror::Error;

use crate::errors::internal::InternalError;

/// Domain errors for user registration, login and administration.
#[derive(Error, Debug)]
pub enum UserError {
    #[error("User already exists with this email")]
    DuplicateEmail,

    // Identical message for unknown email and wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    NotFound,

    #[error(transparent)]
    Internal(#[from] InternalError),
}
