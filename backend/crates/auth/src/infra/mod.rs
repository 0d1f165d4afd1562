//! Infrastructure Layer
//!
//! Database implementations and external service integrations.

pub mod jwt;
pub mod memory;
pub mod postgres;

pub use jwt::JwtTokenIssuer;
pub use memory::InMemoryAccountRepository;
pub use postgres::PgAccountRepository;
