//! Get Profile Use Case
//!
//! Resolves a bearer token to the current state of its account.

use std::sync::Arc;

use crate::domain::entities::{Account, AccountView};
use crate::domain::repository::AccountRepository;
use crate::domain::token::{TokenClaims, TokenIssuer};
use crate::error::{AuthError, AuthResult};

/// Get profile use case
pub struct GetProfileUseCase<R>
where
    R: AccountRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
    issuer: Arc<dyn TokenIssuer>,
}

impl<R> GetProfileUseCase<R>
where
    R: AccountRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, issuer: Arc<dyn TokenIssuer>) -> Self {
        Self { repo, issuer }
    }

    /// Verify the token and return the account projection
    pub async fn execute(&self, token: &str) -> AuthResult<AccountView> {
        let claims = self.issuer.verify(token)?;
        let account = active_account_for_claims(self.repo.as_ref(), &claims).await?;
        Ok(account.view())
    }

    /// Return the projection for claims already verified by middleware
    pub async fn for_claims(&self, claims: &TokenClaims) -> AuthResult<AccountView> {
        let account = active_account_for_claims(self.repo.as_ref(), claims).await?;
        Ok(account.view())
    }
}

/// Re-fetch the token subject; missing or non-active accounts are
/// `TokenInvalid`
pub(crate) async fn active_account_for_claims<R>(
    repo: &R,
    claims: &TokenClaims,
) -> AuthResult<Account>
where
    R: AccountRepository + Sync,
{
    let account_id = claims.account_id()?;

    let Some(account) = repo.find_by_id(account_id).await? else {
        tracing::info!(account_id = %account_id, "Token subject no longer exists");
        return Err(AuthError::TokenInvalid);
    };

    if !account.can_login() {
        tracing::info!(
            account_id = %account_id,
            status = %account.status,
            "Token subject is not active"
        );
        return Err(AuthError::TokenInvalid);
    }

    Ok(account)
}
