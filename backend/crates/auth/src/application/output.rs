//! Authentication Output
//!
//! Success path shared by login and refresh: stamp `last_access`, sign a
//! token with the account's current claims and project the account.

use chrono::Utc;

use crate::domain::entities::{Account, AccountView};
use crate::domain::repository::AccountRepository;
use crate::domain::token::TokenIssuer;
use crate::error::AuthResult;

/// Token scheme reported to clients
pub const TOKEN_TYPE: &str = "Bearer";

/// Login / refresh output
#[derive(Debug, Clone)]
pub struct AuthOutput {
    pub access_token: String,
    pub token_type: &'static str,
    /// Seconds until the access token expires
    pub expires_in: i64,
    pub account: AccountView,
}

/// Record access and issue a token for an already-authenticated account
pub(crate) async fn complete_authentication<R>(
    repo: &R,
    issuer: &dyn TokenIssuer,
    mut account: Account,
) -> AuthResult<AuthOutput>
where
    R: AccountRepository + Sync,
{
    repo.update_last_access(account.id).await?;
    account.record_access(Utc::now());

    let token = issuer.issue(&account)?;

    Ok(AuthOutput {
        access_token: token.access_token,
        token_type: TOKEN_TYPE,
        expires_in: token.expires_in,
        account: account.view(),
    })
}
