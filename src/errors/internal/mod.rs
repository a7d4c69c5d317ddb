use thiserror::Error;

pub mod database;
pub mod list;
pub mod user;

pub use database::DatabaseError;
pub use list::ListError;
pub use user::UserError;

/// Internal error type for store and service infrastructure failures.
///
/// Not exposed via the API - endpoints convert these to generic 500
/// responses and log the details server-side.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto { operation: String, message: String },

    /// A stored reference points at a record that no longer exists
    #[error("Referential integrity violation: {0}")]
    Integrity(String),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn crypto(operation: &str, message: impl Into<String>) -> InternalError {
        InternalError::Crypto {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}
