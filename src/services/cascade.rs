use std::sync::Arc;

use crate::errors::InternalError;
use crate::stores::{ItemStore, ListStore};

/// Application-level referential cleanup for deletions.
///
/// Cascades run before the parent record is removed so children are never
/// orphaned by a successful delete. They are not wrapped in a transaction:
/// a crash mid-cascade can leave orphans, which is an accepted limitation.
pub struct CascadeService {
    list_store: Arc<ListStore>,
    item_store: Arc<ItemStore>,
}

impl CascadeService {
    pub fn new(list_store: Arc<ListStore>, item_store: Arc<ItemStore>) -> Self {
        Self {
            list_store,
            item_store,
        }
    }

    /// Delete a list: items in one batch, then membership references,
    /// then the list record itself.
    pub async fn delete_list(&self, list_id: &str) -> Result<(), InternalError> {
        let items_removed = self.item_store.delete_for_list(list_id).await?;
        self.list_store.remove_all_members(list_id).await?;
        self.list_store.delete(list_id).await?;

        tracing::info!(
            list_id = %list_id,
            items_removed = items_removed,
            "cascade delete removed list and its items"
        );
        Ok(())
    }

    /// Delete every list the user owns, each through the list cascade.
    ///
    /// Best-effort: a failing list cascade is logged and the remaining
    /// lists are still attempted, so the caller can proceed with deleting
    /// the user record.
    pub async fn delete_user_lists(&self, user_id: &str) -> Result<usize, InternalError> {
        let owned = self.list_store.find_owned_by(user_id).await?;
        let total = owned.len();

        let mut removed = 0;
        for list in owned {
            match self.delete_list(&list.id).await {
                Ok(()) => removed += 1,
                Err(e) => {
                    tracing::error!(
                        user_id = %user_id,
                        list_id = %list.id,
                        error = %e,
                        "cascade delete of owned list failed"
                    );
                }
            }
        }

        tracing::info!(
            user_id = %user_id,
            removed = removed,
            total = total,
            "cascade delete removed lists owned by user"
        );
        Ok(removed)
    }
}
