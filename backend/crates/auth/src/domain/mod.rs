//! Domain Layer
//!
//! This layer contains:
//! - Entities (Account and its public AccountView projection)
//! - Value objects (AccountStatus, LoginIdentifier)
//! - Lockout policy (pure failed-attempt state transitions)
//! - Token claims and the TokenIssuer seam
//! - Repository traits (credential store interface)

pub mod entities;
pub mod lockout;
pub mod repository;
pub mod token;
pub mod value_objects;

// Re-exports
pub use entities::{Account, AccountView};
pub use lockout::{LockState, LockoutPolicy, LockoutStatus};
pub use repository::AccountRepository;
pub use token::{IssuedToken, TokenClaims, TokenIssuer};
pub use value_objects::{AccountStatus, LoginIdentifier};
