use crate::state::AppState;
use axum::Router;

pub mod claims;
pub mod dto;
pub mod extract;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod service;
pub mod validation;

pub use service::AuthService;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::auth_routes())
}
