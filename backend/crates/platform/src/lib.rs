//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations that are not tied to any POS domain:
//! - Password hashing and verification (bcrypt, zeroized plaintext)

pub mod password;
