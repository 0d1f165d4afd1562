//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::AccountId;

use crate::domain::entities::Account;
use crate::domain::lockout::{LockoutPolicy, LockoutStatus};
use crate::domain::value_objects::LoginIdentifier;
use crate::error::AuthResult;

/// Credential store
///
/// Soft-deleted accounts are invisible to every method.
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Find an account whose username OR email equals the identifier
    async fn find_by_identifier(&self, identifier: &LoginIdentifier)
    -> AuthResult<Option<Account>>;

    /// Find account by ID
    async fn find_by_id(&self, id: AccountId) -> AuthResult<Option<Account>>;

    /// Register one failed password check atomically and return the new state
    async fn increment_failed_attempts(
        &self,
        id: AccountId,
        policy: &LockoutPolicy,
    ) -> AuthResult<LockoutStatus>;

    /// Set the failure count to zero and clear `locked_until`
    async fn reset_failed_attempts(&self, id: AccountId) -> AuthResult<()>;

    /// Stamp `last_access` with the current time
    async fn update_last_access(&self, id: AccountId) -> AuthResult<()>;
}
