//! Login Use Case
//!
//! Authenticates an account by username or email and password, applying
//! the lockout policy, and issues an access token.

use std::sync::Arc;

use chrono::Utc;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::output::{AuthOutput, complete_authentication};
use crate::domain::lockout::LockState;
use crate::domain::repository::AccountRepository;
use crate::domain::token::TokenIssuer;
use crate::domain::value_objects::LoginIdentifier;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    /// Username or email
    pub identifier: String,
    /// Password
    pub password: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: AccountRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
    issuer: Arc<dyn TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: AccountRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, issuer: Arc<dyn TokenIssuer>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            issuer,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<AuthOutput> {
        let LoginInput {
            identifier,
            password,
        } = input;
        let password = ClearTextPassword::new(password);

        let identifier =
            LoginIdentifier::parse(&identifier).ok_or(AuthError::InvalidCredentials)?;

        let account = match self.repo.find_by_identifier(&identifier).await? {
            Some(account) => account,
            None => {
                tracing::info!(
                    by_email = identifier.looks_like_email(),
                    "Login for unknown identifier"
                );
                return Err(AuthError::InvalidCredentials);
            }
        };

        // Check if account can login
        if !account.can_login() {
            tracing::info!(
                account_id = %account.id,
                status = %account.status,
                "Login for inactive account"
            );
            return Err(AuthError::AccountInactive);
        }

        // Check if account is locked
        if self.config.enforce_lockout {
            if let LockState::Locked { until } = account.lock_state(Utc::now()) {
                tracing::warn!(
                    account_id = %account.id,
                    locked_until = %until,
                    "Login refused while locked"
                );
                return Err(AuthError::AccountLocked { until });
            }
        }

        // Verify password off the async runtime
        let hash = account.password_hash.clone();
        let password_valid =
            tokio::task::spawn_blocking(move || hash.verify(&password)).await?;

        if !password_valid {
            let status = self
                .repo
                .increment_failed_attempts(account.id, &self.config.lockout)
                .await?;

            match status.state_at(Utc::now()) {
                LockState::Locked { until } => tracing::warn!(
                    account_id = %account.id,
                    failed_attempts = status.failed_attempt_count,
                    locked_until = %until,
                    "Account locked after failed login"
                ),
                LockState::Unlocked => tracing::info!(
                    account_id = %account.id,
                    failed_attempts = status.failed_attempt_count,
                    "Failed login"
                ),
            }
            return Err(AuthError::InvalidCredentials);
        }

        if account.password_hash.needs_rehash(self.config.bcrypt_cost) {
            tracing::info!(
                account_id = %account.id,
                stored_cost = account.password_hash.cost(),
                target_cost = self.config.bcrypt_cost,
                "Password hash cost differs from configured cost"
            );
        }

        // Reset failure count
        self.repo.reset_failed_attempts(account.id).await?;
        let mut account = account;
        account.reset_failures(Utc::now());

        let output =
            complete_authentication(self.repo.as_ref(), self.issuer.as_ref(), account).await?;

        tracing::info!(
            account_id = %output.account.id,
            username = %output.account.username,
            "Account logged in"
        );

        Ok(output)
    }
}
