// API error responses - status-mapped poem-openapi enums
pub mod lists;
pub mod users;

pub use lists::ListApiError;
pub use users::UserApiError;
