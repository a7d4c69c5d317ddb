// Policy layer - access admission and ownership rules
pub mod access;
pub mod ownership;

pub use access::{AccessError, AccessPolicy, PolicyConfigError};
pub use ownership::{ListAction, OwnershipError};
