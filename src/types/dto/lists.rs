use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::services::list_service::ListDetail;
use crate::types::db::{item, shopping_list};
use crate::types::dto::users::UserSummary;

/// Request model for list creation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateListRequest {
    /// List name (must be non-empty)
    pub name: String,
}

/// Request model for list update; absent fields are left unchanged
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateListRequest {
    /// New list name
    pub name: Option<String>,

    /// Archived flag
    pub is_archived: Option<bool>,
}

/// Request model for adding a member to a list
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AddMemberRequest {
    /// ID of the user to add as a member
    pub user_id: String,
}

/// Request model for item creation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateItemRequest {
    /// Item name (must be non-empty)
    pub name: String,
}

/// Request model for item update; absent fields are left unchanged.
/// An empty `solved_by` string clears the solved marker.
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateItemRequest {
    /// New item name
    pub name: Option<String>,

    /// ID of the user who solved the item; empty string to clear
    pub solved_by: Option<String>,
}

/// Compact list representation used by listing endpoints
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ListResponse {
    /// List ID (UUID)
    pub id: String,

    /// List name
    pub name: String,

    /// Owner user ID
    pub owner_id: String,

    /// Archived flag
    pub is_archived: bool,

    /// Creation time (ISO 8601 format)
    pub created_at: String,

    /// Last modification time (ISO 8601 format)
    pub updated_at: String,
}

impl ListResponse {
    pub fn from_model(list: &shopping_list::Model) -> Self {
        Self {
            id: list.id.clone(),
            name: list.name.clone(),
            owner_id: list.owner_id.clone(),
            is_archived: list.is_archived,
            created_at: crate::types::dto::to_rfc3339(list.created_at),
            updated_at: crate::types::dto::to_rfc3339(list.updated_at),
        }
    }
}

/// Item representation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ItemResponse {
    /// Item ID (UUID)
    pub id: String,

    /// Item name
    pub name: String,

    /// ID of the user who added the item
    pub added_by: String,

    /// ID of the user who solved the item, if any
    pub solved_by: Option<String>,

    /// Creation time (ISO 8601 format)
    pub created_at: String,

    /// Last modification time (ISO 8601 format)
    pub updated_at: String,
}

impl ItemResponse {
    pub fn from_model(item: &item::Model) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            added_by: item.added_by.clone(),
            solved_by: item.solved_by.clone(),
            created_at: crate::types::dto::to_rfc3339(item.created_at),
            updated_at: crate::types::dto::to_rfc3339(item.updated_at),
        }
    }
}

/// Full list representation with embedded owner, members and items.
/// Embedded users are summaries, so password hashes can never leak.
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ListDetailResponse {
    /// List ID (UUID)
    pub id: String,

    /// List name
    pub name: String,

    /// Owner of the list
    pub owner: UserSummary,

    /// Archived flag
    pub is_archived: bool,

    /// Members of the list, in the order they were added
    pub members: Vec<UserSummary>,

    /// Items of the list, in creation order
    pub items: Vec<ItemResponse>,

    /// Creation time (ISO 8601 format)
    pub created_at: String,

    /// Last modification time (ISO 8601 format)
    pub updated_at: String,
}

impl ListDetailResponse {
    pub fn from_detail(detail: &ListDetail) -> Self {
        Self {
            id: detail.list.id.clone(),
            name: detail.list.name.clone(),
            owner: UserSummary::from_model(&detail.owner),
            is_archived: detail.list.is_archived,
            members: detail.members.iter().map(UserSummary::from_model).collect(),
            items: detail.items.iter().map(ItemResponse::from_model).collect(),
            created_at: crate::types::dto::to_rfc3339(detail.list.created_at),
            updated_at: crate::types::dto::to_rfc3339(detail.list.updated_at),
        }
    }
}

/// Response model for member add/remove operations
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MembersResponse {
    /// List ID (UUID)
    pub id: String,

    /// Current member user IDs, in the order they were added
    pub members: Vec<String>,
}

/// Response model for item deletion
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct DeleteItemResponse {
    /// List ID (UUID)
    pub list_id: String,

    /// Remaining item IDs in the list
    pub items: Vec<String>,
}
