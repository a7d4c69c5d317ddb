// Stores layer - Data access and repository pattern
pub mod item_store;
pub mod list_store;
pub mod user_store;

pub use item_store::ItemStore;
pub use list_store::ListStore;
pub use user_store::UserStore;
