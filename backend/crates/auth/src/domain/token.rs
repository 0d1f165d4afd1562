//! Access Token Claims
//!
//! Claims carried by a signed access token, and the [`TokenIssuer`] seam
//! the application layer signs and verifies through. The concrete JWT
//! implementation lives in `infra::jwt`.

use chrono::{DateTime, Utc};
use kernel::id::{AccountId, CompanyId, RoleId};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Account;
use crate::error::{AuthError, AuthResult};

/// Payload of an access token
///
/// `role_id` and `company_id` are copied from the account when the token is
/// issued; a refresh re-reads them so changes made since are picked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Account id (decimal string, JWT `sub`)
    pub sub: String,
    pub username: String,
    pub email: String,
    pub role_id: Option<RoleId>,
    pub company_id: Option<CompanyId>,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expires at (Unix seconds)
    pub exp: i64,
}

impl TokenClaims {
    pub fn for_account(account: &Account, now: DateTime<Utc>, ttl_secs: i64) -> Self {
        let iat = now.timestamp();
        Self {
            sub: account.id.to_string(),
            username: account.username.clone(),
            email: account.email.clone(),
            role_id: account.role_id,
            company_id: account.company_id,
            iat,
            exp: iat.saturating_add(ttl_secs),
        }
    }

    /// Parse the subject back into an account id
    pub fn account_id(&self) -> AuthResult<AccountId> {
        self.sub.parse().map_err(|_| AuthError::TokenInvalid)
    }

    pub fn expires_in(&self) -> i64 {
        self.exp - self.iat
    }
}

/// A freshly signed access token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    /// Seconds until expiry
    pub expires_in: i64,
    pub claims: TokenClaims,
}

/// Signs and verifies access tokens
pub trait TokenIssuer: Send + Sync {
    /// Sign a token for the account's current role and company
    fn issue(&self, account: &Account) -> AuthResult<IssuedToken>;

    /// Check signature and expiry; any failure is [`AuthError::TokenInvalid`]
    fn verify(&self, token: &str) -> AuthResult<TokenClaims>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    #[test]
    fn test_claims_copy_account_scoping() {
        let hash = ClearTextPassword::new("secret123").hash(4).unwrap();
        let mut account = Account::new(AccountId::new(42), "alice", "alice@example.com", hash);
        account.role_id = Some(RoleId::new(1));
        account.company_id = Some(CompanyId::new(7));

        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = TokenClaims::for_account(&account, now, 3600);

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.account_id().unwrap(), AccountId::new(42));
        assert_eq!(claims.role_id, Some(RoleId::new(1)));
        assert_eq!(claims.company_id, Some(CompanyId::new(7)));
        assert_eq!(claims.exp, 1_700_003_600);
        assert_eq!(claims.expires_in(), 3600);
    }

    #[test]
    fn test_bad_subject_is_token_invalid() {
        let claims = TokenClaims {
            sub: "not-a-number".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            role_id: None,
            company_id: None,
            iat: 0,
            exp: 1,
        };
        assert!(matches!(claims.account_id(), Err(AuthError::TokenInvalid)));
    }
}
