//! In-Memory Account Repository
//!
//! Backs tests and local runs without PostgreSQL. Each mutation holds the
//! write lock for its whole read-modify-write, so concurrent failures are
//! not lost.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::AccountId;
use tokio::sync::RwLock;

use crate::domain::entities::Account;
use crate::domain::lockout::{LockoutPolicy, LockoutStatus};
use crate::domain::repository::AccountRepository;
use crate::domain::value_objects::LoginIdentifier;
use crate::error::{AuthError, AuthResult};

#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an account
    pub async fn insert(&self, account: Account) {
        let mut accounts = self.accounts.write().await;
        accounts.insert(account.id, account);
    }

    pub async fn get(&self, id: AccountId) -> Option<Account> {
        let accounts = self.accounts.read().await;
        accounts.get(&id).cloned()
    }

    /// Apply an out-of-band change (status, role, company); false if missing
    pub async fn modify<F>(&self, id: AccountId, f: F) -> bool
    where
        F: FnOnce(&mut Account),
    {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(&id) {
            Some(account) => {
                f(account);
                account.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Remove an account (stands in for a soft delete)
    pub async fn remove(&self, id: AccountId) -> Option<Account> {
        let mut accounts = self.accounts.write().await;
        accounts.remove(&id)
    }

    async fn with_account<T>(
        &self,
        id: AccountId,
        f: impl FnOnce(&mut Account) -> T,
    ) -> AuthResult<T> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(&id)
            .ok_or_else(|| AuthError::Internal(format!("Account {id} not found")))?;
        Ok(f(account))
    }
}

impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_identifier(
        &self,
        identifier: &LoginIdentifier,
    ) -> AuthResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        let wanted = identifier.as_str();
        Ok(accounts
            .values()
            .find(|a| a.username == wanted || a.email == wanted)
            .cloned())
    }

    async fn find_by_id(&self, id: AccountId) -> AuthResult<Option<Account>> {
        Ok(self.get(id).await)
    }

    async fn increment_failed_attempts(
        &self,
        id: AccountId,
        policy: &LockoutPolicy,
    ) -> AuthResult<LockoutStatus> {
        self.with_account(id, |account| account.record_failure(policy, Utc::now()))
            .await
    }

    async fn reset_failed_attempts(&self, id: AccountId) -> AuthResult<()> {
        self.with_account(id, |account| account.reset_failures(Utc::now()))
            .await
    }

    async fn update_last_access(&self, id: AccountId) -> AuthResult<()> {
        self.with_account(id, |account| account.record_access(Utc::now()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    fn account(id: i64, username: &str) -> Account {
        let hash = ClearTextPassword::new("secret123").hash(4).unwrap();
        Account::new(
            AccountId::new(id),
            username,
            format!("{username}@example.com"),
            hash,
        )
    }

    #[tokio::test]
    async fn test_find_by_username_or_email() {
        let repo = InMemoryAccountRepository::new();
        repo.insert(account(1, "alice")).await;
        repo.insert(account(2, "bob")).await;

        let by_name = LoginIdentifier::parse("alice").unwrap();
        let by_email = LoginIdentifier::parse("bob@example.com").unwrap();
        let unknown = LoginIdentifier::parse("carol").unwrap();

        assert_eq!(
            repo.find_by_identifier(&by_name).await.unwrap().unwrap().id,
            AccountId::new(1)
        );
        assert_eq!(
            repo.find_by_identifier(&by_email).await.unwrap().unwrap().id,
            AccountId::new(2)
        );
        assert!(repo.find_by_identifier(&unknown).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_failures_are_not_lost() {
        let repo = InMemoryAccountRepository::new();
        repo.insert(account(1, "alice")).await;
        let policy = LockoutPolicy::new(100, chrono::Duration::minutes(15));

        let mut handles = Vec::new();
        for _ in 0..20 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.increment_failed_attempts(AccountId::new(1), &policy)
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let stored = repo.get(AccountId::new(1)).await.unwrap();
        assert_eq!(stored.failed_attempt_count, 20);
    }

    #[tokio::test]
    async fn test_mutations_on_missing_account_fail() {
        let repo = InMemoryAccountRepository::new();
        let result = repo.reset_failed_attempts(AccountId::new(9)).await;
        assert!(matches!(result, Err(AuthError::Internal(_))));
        assert!(!repo.modify(AccountId::new(9), |_| {}).await);
    }
}
