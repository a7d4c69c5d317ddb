use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::item::{self, Entity as Item};

/// ItemStore manages shopping list items in the database
pub struct ItemStore {
    db: DatabaseConnection,
}

impl ItemStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        list_id: String,
        name: String,
        added_by: String,
    ) -> Result<item::Model, InternalError> {
        let now = chrono::Utc::now().timestamp_micros();
        let new_item = item::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            list_id: Set(list_id),
            name: Set(name),
            added_by: Set(added_by),
            solved_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        new_item
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("create_item", e))
    }

    /// Load an item only if it belongs to the given list; the containment
    /// check for every item operation.
    pub async fn find_in_list(
        &self,
        list_id: &str,
        item_id: &str,
    ) -> Result<Option<item::Model>, InternalError> {
        Item::find_by_id(item_id)
            .filter(item::Column::ListId.eq(list_id))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_item_in_list", e))
    }

    /// Items of a list in creation order.
    pub async fn find_for_list(&self, list_id: &str) -> Result<Vec<item::Model>, InternalError> {
        Item::find()
            .filter(item::Column::ListId.eq(list_id))
            .order_by_asc(item::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_items_for_list", e))
    }

    /// Update name and/or solved marker, returning the updated row.
    /// `solved_by` of `Some(None)` clears the marker.
    pub async fn update_fields(
        &self,
        item: item::Model,
        name: Option<String>,
        solved_by: Option<Option<String>>,
    ) -> Result<item::Model, InternalError> {
        let mut active: item::ActiveModel = item.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(solved_by) = solved_by {
            active.solved_by = Set(solved_by);
        }
        active.updated_at = Set(chrono::Utc::now().timestamp_micros());

        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_item", e))
    }

    pub async fn delete(&self, id: &str) -> Result<u64, InternalError> {
        let result = Item::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_item", e))?;
        Ok(result.rows_affected)
    }

    /// Batch-delete every item of a list (list deletion cascade).
    pub async fn delete_for_list(&self, list_id: &str) -> Result<u64, InternalError> {
        let result = Item::delete_many()
            .filter(item::Column::ListId.eq(list_id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_items_for_list", e))?;
        Ok(result.rows_affected)
    }
}
