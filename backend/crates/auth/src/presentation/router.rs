//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::config::AuthConfig;
use crate::domain::repository::AccountRepository;
use crate::infra::postgres::PgAccountRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAccountRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: AccountRepository + Send + Sync + 'static,
{
    auth_router_with_state(AuthAppState::new(repo, config))
}

/// Create the Auth router from prepared state (shares the issuer with
/// `require_bearer_auth` elsewhere)
pub fn auth_router_with_state<R>(state: AuthAppState<R>) -> Router
where
    R: AccountRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/login", post(handlers::login::<R>))
        .route("/refresh", post(handlers::refresh::<R>))
        .route("/profile", get(handlers::profile::<R>))
        .route("/me", get(handlers::me::<R>))
        .with_state(state)
}
