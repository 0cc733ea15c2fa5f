// User CRUD module
// Authenticated list/get/update/delete over the user store

pub mod error;
pub mod handlers;
pub mod models;

pub use error::UserError;
pub use handlers::{
    delete_user_handler, get_user_handler, list_users_handler, update_user_handler,
};
pub use models::UpdateUserRequest;
