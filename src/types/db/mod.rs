// Database entities - SeaORM models
pub mod item;
pub mod list_member;
pub mod shopping_list;
pub mod user;
