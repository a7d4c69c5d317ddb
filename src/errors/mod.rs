// Errors layer - Error type definitions
pub mod api;
pub mod internal;

// Re-exports for convenience
pub use api::{ListApiError, UserApiError};
pub use internal::{InternalError, ListError, UserError};
