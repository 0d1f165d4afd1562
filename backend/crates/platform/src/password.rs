//! Password Hashing and Verification
//!
//! bcrypt-based password handling with:
//! - Salted, cost-parameterised hashing (cost 10 by default, as the
//!   existing POS user table was seeded with)
//! - Zeroization of plaintext attempts
//! - Comparison delegated to `bcrypt::verify`, never byte equality
//!
//! Neither the plaintext nor the hash ever appears in `Debug` output.

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Work factor used for new hashes
pub const DEFAULT_COST: u32 = 10;

/// Minimum length accepted when a new password is set
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// bcrypt only reads the first 72 bytes; longer input is rejected instead
/// of being silently truncated
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Length of a modular-crypt bcrypt string (`$2b$10$` + 53 chars)
const BCRYPT_HASH_LEN: usize = 60;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violations (only checked when a password is set)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} bytes (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(#[from] bcrypt::BcryptError),

    #[error("Invalid password hash format")]
    InvalidHashFormat,

    #[error(transparent)]
    Policy(#[from] PasswordPolicyError),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Login attempts are wrapped as-is: any string can be *verified*, the
/// policy in [`ClearTextPassword::check_policy`] only applies when a new
/// hash is produced.
///
/// Does not implement `Clone`, and `Debug` output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Validate the password before it is hashed for storage
    pub fn check_policy(&self) -> Result<(), PasswordPolicyError> {
        if self.0.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = self.0.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        let byte_len = self.0.len();
        if byte_len > MAX_PASSWORD_BYTES {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_BYTES,
                actual: byte_len,
            });
        }

        Ok(())
    }

    /// Hash the password with a fresh random salt
    ///
    /// ## Arguments
    /// * `cost` - bcrypt work factor (4..=31)
    pub fn hash(&self, cost: u32) -> Result<HashedPassword, PasswordHashError> {
        self.check_policy()?;
        let hash = bcrypt::hash(self.as_bytes(), cost)?;
        Ok(HashedPassword { hash })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// bcrypt hash in modular crypt format (`$2b$10$<salt><digest>`)
///
/// The salt is embedded in the string, so there is no separate salt
/// column to carry around.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Wrap a stored hash (e.g. a database column), checking its shape
    pub fn from_hash(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        parse_cost(&hash).ok_or(PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Work factor embedded in the hash
    pub fn cost(&self) -> u32 {
        parse_cost(&self.hash).unwrap_or_default()
    }

    /// Verify a password attempt against this hash
    ///
    /// Any error from the bcrypt library (corrupt hash, invalid cost) is
    /// treated as a mismatch.
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        bcrypt::verify(password.as_bytes(), &self.hash).unwrap_or(false)
    }

    /// True when the hash was produced with a different work factor
    pub fn needs_rehash(&self, target_cost: u32) -> bool {
        self.cost() != target_cost
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Extract the cost from `$2?$NN$...`, or `None` if the string is not a
/// bcrypt hash
fn parse_cost(hash: &str) -> Option<u32> {
    if hash.len() != BCRYPT_HASH_LEN {
        return None;
    }

    let mut parts = hash.split('$');
    let (empty, version, cost, rest) = (parts.next()?, parts.next()?, parts.next()?, parts.next()?);

    if !empty.is_empty() || !matches!(version, "2a" | "2b" | "2x" | "2y") {
        return None;
    }
    if cost.len() != 2 || rest.len() != 53 || parts.next().is_some() {
        return None;
    }

    cost.parse::<u32>().ok().filter(|c| (4..=31).contains(c))
}

// ============================================================================
// Tests
// ============================================================================
