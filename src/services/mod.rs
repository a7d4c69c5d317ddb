// Services layer - Business logic and orchestration
pub mod cascade;
pub mod crypto;
pub mod list_service;
pub mod user_service;

pub use cascade::CascadeService;
pub use list_service::{ListDetail, ListService};
pub use user_service::UserService;
