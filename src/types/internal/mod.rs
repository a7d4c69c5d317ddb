// Internal types - not exposed over the API
pub mod role;
pub mod session;

pub use role::Role;
pub use session::SessionUser;
