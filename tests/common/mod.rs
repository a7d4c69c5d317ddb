// Common test utilities for integration tests
#![allow(dead_code)]

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;

use shoplist_backend::services::{crypto, CascadeService, ListService, UserService};
use shoplist_backend::stores::{ItemStore, ListStore, UserStore};
use shoplist_backend::types::internal::session::SessionUser;

/// Creates a test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Fully wired service stack over an in-memory database
pub struct TestApp {
    pub user_store: Arc<UserStore>,
    pub list_store: Arc<ListStore>,
    pub item_store: Arc<ItemStore>,
    pub user_service: UserService,
    pub list_service: ListService,
}

/// Creates the full store/service stack the way main.rs wires it
pub async fn setup_test_app() -> TestApp {
    let db = setup_test_db().await;

    let user_store = Arc::new(UserStore::new(db.clone()));
    let list_store = Arc::new(ListStore::new(db.clone()));
    let item_store = Arc::new(ItemStore::new(db));

    let cascade = Arc::new(CascadeService::new(list_store.clone(), item_store.clone()));

    let user_service = UserService::new(user_store.clone(), cascade.clone());
    let list_service = ListService::new(
        list_store.clone(),
        item_store.clone(),
        user_store.clone(),
        cascade,
    );

    TestApp {
        user_store,
        list_store,
        item_store,
        user_service,
        list_service,
    }
}

impl TestApp {
    /// Registers a user through the service and returns its session identity.
    /// Registration always yields a StandardUser.
    pub async fn register(&self, name: &str, password: &str) -> SessionUser {
        let user = self
            .user_service
            .register(
                name.to_string(),
                format!("{}@example.com", name.to_lowercase()),
                password,
            )
            .await
            .expect("registration should succeed");
        SessionUser::from_user(&user)
    }

    /// Creates a user with an arbitrary role directly in the store
    pub async fn create_user_with_role(&self, name: &str, role: &str) -> SessionUser {
        let hash = crypto::hash_password("password123").expect("hashing should succeed");
        let user = self
            .user_store
            .create(
                name.to_string(),
                format!("{}@example.com", name.to_lowercase()),
                hash,
                role.to_string(),
            )
            .await
            .expect("user creation should succeed");
        SessionUser::from_user(&user)
    }
}
