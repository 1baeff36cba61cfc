use std::sync::Arc;

use axum::Router;
use userdesk_server::config::Config;
use userdesk_server::repository::InMemoryUserRepository;
use userdesk_server::routes::create_routes;
use userdesk_server::state::AppState;

/// Router over a fresh in-memory store.
pub fn test_app() -> Router {
    let users = Arc::new(InMemoryUserRepository::new());
    create_routes(AppState::new(users), &Config::default())
}
