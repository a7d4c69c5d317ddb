use thiserror::Error;

use crate::types::internal::Role;

/// List operations gated by the ownership rules.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ListAction {
    View,
    Delete,
    AddMember,
    RemoveMember,
    Update,
    CreateItem,
    UpdateItem,
    DeleteItem,
}

/// Relationship a StandardUser must have with the list for an action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Requirement {
    OwnerOnly,
    OwnerOrMember,
}

impl ListAction {
    /// Capability table: one row per list operation.
    pub fn requirement(&self) -> Requirement {
        match self {
            ListAction::View => Requirement::OwnerOrMember,
            ListAction::Delete => Requirement::OwnerOnly,
            ListAction::AddMember => Requirement::OwnerOnly,
            ListAction::RemoveMember => Requirement::OwnerOnly,
            ListAction::Update => Requirement::OwnerOnly,
            ListAction::CreateItem => Requirement::OwnerOrMember,
            ListAction::UpdateItem => Requirement::OwnerOrMember,
            ListAction::DeleteItem => Requirement::OwnerOrMember,
        }
    }

    /// Verb used in owner-only denial messages.
    fn describe(&self) -> &'static str {
        match self {
            ListAction::View => "view the list",
            ListAction::Delete => "delete the list",
            ListAction::AddMember => "add members",
            ListAction::RemoveMember => "remove members",
            ListAction::Update => "edit this list",
            ListAction::CreateItem => "add items",
            ListAction::UpdateItem => "edit items",
            ListAction::DeleteItem => "remove items",
        }
    }
}

/// Denials produced by the ownership rules.
#[derive(Error, Debug, PartialEq)]
pub enum OwnershipError {
    #[error("Only the owner can {action}")]
    NotOwner { action: &'static str },

    #[error("Access denied - you are not a member or owner of this list")]
    NotOwnerOrMember,

    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

/// Decide whether an actor may perform `action` on a list.
///
/// `role` is the stored role string of the actor; `is_owner` / `is_member`
/// describe the actor's relationship to the target list. Executives and
/// Authorities always pass; StandardUsers must satisfy the capability table;
/// any other role value is rejected outright.
pub fn authorize(
    role: &str,
    action: ListAction,
    is_owner: bool,
    is_member: bool,
) -> Result<(), OwnershipError> {
    let role = Role::parse(role).ok_or_else(|| OwnershipError::UnknownRole(role.to_string()))?;

    if role.has_full_list_access() {
        return Ok(());
    }

    match action.requirement() {
        Requirement::OwnerOnly if is_owner => Ok(()),
        Requirement::OwnerOnly => Err(OwnershipError::NotOwner {
            action: action.describe(),
        }),
        Requirement::OwnerOrMember if is_owner || is_member => Ok(()),
        Requirement::OwnerOrMember => Err(OwnershipError::NotOwnerOrMember),
    }
}
