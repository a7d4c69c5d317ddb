use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::policy::AccessPolicy;
use crate::services::{CascadeService, ListService, UserService};
use crate::stores::{ItemStore, ListStore, UserStore};

/// Centralized application data following the main-owned stores pattern.
///
/// All stores and services are created once in main.rs and shared across
/// the API structs, so there is a single instance of each store.
pub struct AppData {
    pub db: DatabaseConnection,
    pub user_store: Arc<UserStore>,
    pub list_store: Arc<ListStore>,
    pub item_store: Arc<ItemStore>,
    pub user_service: Arc<UserService>,
    pub list_service: Arc<ListService>,
    pub policy: Arc<AccessPolicy>,
}

impl AppData {
    /// Wire up all stores and services.
    ///
    /// The database should be connected and migrated before calling this.
    pub fn init(db: DatabaseConnection, policy: AccessPolicy) -> Self {
        tracing::debug!("Creating stores and services...");

        let user_store = Arc::new(UserStore::new(db.clone()));
        let list_store = Arc::new(ListStore::new(db.clone()));
        let item_store = Arc::new(ItemStore::new(db.clone()));

        let cascade = Arc::new(CascadeService::new(list_store.clone(), item_store.clone()));

        let user_service = Arc::new(UserService::new(user_store.clone(), cascade.clone()));
        let list_service = Arc::new(ListService::new(
            list_store.clone(),
            item_store.clone(),
            user_store.clone(),
            cascade,
        ));

        tracing::debug!("Stores and services created");

        Self {
            db,
            user_store,
            list_store,
            item_store,
            user_service,
            list_service,
            policy: Arc::new(policy),
        }
    }
}
