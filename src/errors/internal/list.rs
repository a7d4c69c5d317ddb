use thiserror::Error;

use crate::errors::internal::InternalError;
use crate::policy::OwnershipError;

/// Domain errors for list and item operations.
#[derive(Error, Debug)]
pub enum ListError {
    #[error("List not found")]
    NotFound,

    #[error("Item does not belong to this list")]
    ItemNotInList,

    #[error("User is not a member of this list")]
    NotAMember,

    /// Add-member target user id does not exist in the store
    #[error("User not found")]
    MemberNotFound,

    #[error(transparent)]
    Ownership(#[from] OwnershipError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}
