use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

pub use repo::UserRepository;
pub use repo_types::{Credentials, Model, User};
pub use services::UserService;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::login_routes())
}
