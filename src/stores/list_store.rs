use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::list_member::{self, Entity as ListMember};
use crate::types::db::shopping_list::{self, Entity as ShoppingList};

/// ListStore manages shopping list records and their membership references.
///
/// Membership is mutated through explicit add/remove operations at the
/// store boundary instead of read-modify-write on an embedded collection.
pub struct ListStore {
    db: DatabaseConnection,
}

impl ListStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        name: String,
        owner_id: String,
    ) -> Result<shopping_list::Model, InternalError> {
        let now = chrono::Utc::now().timestamp_micros();
        let new_list = shopping_list::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(name),
            owner_id: Set(owner_id),
            is_archived: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        new_list
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("create_list", e))
    }

    pub async fn find_by_id(
        &self,
        id: &str,
    ) -> Result<Option<shopping_list::Model>, InternalError> {
        ShoppingList::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_list_by_id", e))
    }

    /// Every list in the store, for Executive/Authority listing.
    pub async fn find_all(&self) -> Result<Vec<shopping_list::Model>, InternalError> {
        ShoppingList::find()
            .order_by_asc(shopping_list::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_all_lists", e))
    }

    pub async fn find_owned_by(
        &self,
        user_id: &str,
    ) -> Result<Vec<shopping_list::Model>, InternalError> {
        ShoppingList::find()
            .filter(shopping_list::Column::OwnerId.eq(user_id))
            .order_by_asc(shopping_list::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_lists_owned_by", e))
    }

    /// Lists where the user is owner or member, for StandardUser listing.
    pub async fn find_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<shopping_list::Model>, InternalError> {
        let mut lists = self.find_owned_by(user_id).await?;

        let memberships = ListMember::find()
            .filter(list_member::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_memberships", e))?;

        let member_list_ids: Vec<String> =
            memberships.into_iter().map(|m| m.list_id).collect();

        if !member_list_ids.is_empty() {
            let member_lists = ShoppingList::find()
                .filter(shopping_list::Column::Id.is_in(member_list_ids))
                .all(&self.db)
                .await
                .map_err(|e| InternalError::database("find_member_lists", e))?;
            lists.extend(member_lists);
        }

        lists.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        lists.dedup_by(|a, b| a.id == b.id);
        Ok(lists)
    }

    /// Update name and/or archived flag, returning the updated row.
    pub async fn update_fields(
        &self,
        list: shopping_list::Model,
        name: Option<String>,
        is_archived: Option<bool>,
    ) -> Result<shopping_list::Model, InternalError> {
        let mut active: shopping_list::ActiveModel = list.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(is_archived) = is_archived {
            active.is_archived = Set(is_archived);
        }
        active.updated_at = Set(chrono::Utc::now().timestamp_micros());

        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_list", e))
    }

    /// Delete the list record only; the cascade service removes items and
    /// membership references first.
    pub async fn delete(&self, id: &str) -> Result<u64, InternalError> {
        let result = ShoppingList::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_list", e))?;
        Ok(result.rows_affected)
    }

    /// Add a membership reference. Adding an existing member is a no-op,
    /// mirroring an add-to-set semantics.
    pub async fn add_member(&self, list_id: &str, user_id: &str) -> Result<(), InternalError> {
        if self.is_member(list_id, user_id).await? {
            return Ok(());
        }

        let membership = list_member::ActiveModel {
            list_id: Set(list_id.to_string()),
            user_id: Set(user_id.to_string()),
            added_at: Set(chrono::Utc::now().timestamp_micros()),
        };

        membership
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("add_member", e))?;
        Ok(())
    }

    pub async fn remove_member(
        &self,
        list_id: &str,
        user_id: &str,
    ) -> Result<u64, InternalError> {
        let result = ListMember::delete_many()
            .filter(list_member::Column::ListId.eq(list_id))
            .filter(list_member::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("remove_member", e))?;
        Ok(result.rows_affected)
    }

    /// Member user ids of a list, in the order they were added.
    pub async fn member_ids(&self, list_id: &str) -> Result<Vec<String>, InternalError> {
        let members = ListMember::find()
            .filter(list_member::Column::ListId.eq(list_id))
            .order_by_asc(list_member::Column::AddedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_members", e))?;
        Ok(members.into_iter().map(|m| m.user_id).collect())
    }

    pub async fn is_member(&self, list_id: &str, user_id: &str) -> Result<bool, InternalError> {
        let membership = ListMember::find_by_id((list_id.to_string(), user_id.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("is_member", e))?;
        Ok(membership.is_some())
    }

    /// Drop all membership references of a list (list deletion cleanup).
    pub async fn remove_all_members(&self, list_id: &str) -> Result<u64, InternalError> {
        let result = ListMember::delete_many()
            .filter(list_member::Column::ListId.eq(list_id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("remove_all_members", e))?;
        Ok(result.rows_affected)
    }
}
