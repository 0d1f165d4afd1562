//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary shared by every backend module of the POS admin:
//! - Unified error type ([`error::app_error::AppError`]) and its HTTP mapping
//! - Typed integer identifiers for database rows
//!
//! Only things whose meaning is the same for companies, stores, people,
//! users and roles belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
