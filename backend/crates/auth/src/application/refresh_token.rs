//! Refresh Token Use Case
//!
//! Exchanges a still-valid token for a new one carrying the account's
//! current role and company. The failed-attempt counter is not touched.

use std::sync::Arc;

use crate::application::get_profile::active_account_for_claims;
use crate::application::output::{AuthOutput, complete_authentication};
use crate::domain::repository::AccountRepository;
use crate::domain::token::TokenIssuer;
use crate::error::AuthResult;

/// Refresh token use case
pub struct RefreshTokenUseCase<R>
where
    R: AccountRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
    issuer: Arc<dyn TokenIssuer>,
}

impl<R> RefreshTokenUseCase<R>
where
    R: AccountRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, issuer: Arc<dyn TokenIssuer>) -> Self {
        Self { repo, issuer }
    }

    pub async fn execute(&self, refresh_token: &str) -> AuthResult<AuthOutput> {
        let claims = self.issuer.verify(refresh_token)?;
        let account = active_account_for_claims(self.repo.as_ref(), &claims).await?;

        let output =
            complete_authentication(self.repo.as_ref(), self.issuer.as_ref(), account).await?;

        tracing::debug!(account_id = %output.account.id, "Access token refreshed");

        Ok(output)
    }
}
