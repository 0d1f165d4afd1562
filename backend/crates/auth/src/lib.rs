//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, lockout policy, token claims, repository traits
//! - `application/` - Use cases (login, profile, refresh)
//! - `infra/` - PostgreSQL and in-memory stores, JWT issuer
//! - `presentation/` - HTTP handlers, DTOs, router, bearer middleware
//!
//! ## Features
//! - Login by username or email + password
//! - Stateless HS256 access tokens carrying role and company ids
//! - Token refresh that re-reads role, company and status
//!
//! ## Security Model
//! - Passwords stored as bcrypt hashes, verified on a blocking thread
//! - Automatic lockout after 5 failed attempts (15 minutes)
//! - Unknown user, wrong password and locked account are indistinguishable
//!   to the caller
//! - Password hashes never leave the crate (`AccountView` has no hash field)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::memory::InMemoryAccountRepository;
pub use infra::postgres::PgAccountRepository;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::memory::InMemoryAccountRepository as MemoryAccountStore;
    pub use crate::infra::postgres::PgAccountRepository as AccountStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
