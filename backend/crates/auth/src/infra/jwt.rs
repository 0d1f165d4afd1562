//! JWT Token Issuer
//!
//! HS256 access tokens signed with a server-held secret. Expiry is checked
//! with zero leeway and `exp`/`sub` are required claims.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::Account;
use crate::domain::token::{IssuedToken, TokenClaims, TokenIssuer};
use crate::error::{AuthError, AuthResult};

pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl JwtTokenIssuer {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_secs: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
        }
    }

    /// Sign arbitrary claims (used directly by tests to mint expired tokens)
    pub fn sign(&self, claims: &TokenClaims) -> AuthResult<String> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Token signing failed: {e}")))
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, account: &Account) -> AuthResult<IssuedToken> {
        let claims = TokenClaims::for_account(account, Utc::now(), self.ttl_secs);
        let access_token = self.sign(&claims)?;

        Ok(IssuedToken {
            access_token,
            expires_in: claims.expires_in(),
            claims,
        })
    }

    fn verify(&self, token: &str) -> AuthResult<TokenClaims> {
        jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AuthError::TokenInvalid
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::{AccountId, CompanyId, RoleId};
    use platform::password::ClearTextPassword;

    const SECRET: &[u8] = b"test-secret-with-enough-entropy!";

    fn account() -> Account {
        let hash = ClearTextPassword::new("secret123").hash(4).unwrap();
        let mut account = Account::new(AccountId::new(5), "alice", "alice@example.com", hash);
        account.role_id = Some(RoleId::new(1));
        account.company_id = Some(CompanyId::new(2));
        account
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = JwtTokenIssuer::new(SECRET, Duration::from_secs(3600));
        let token = issuer.issue(&account()).unwrap();

        assert_eq!(token.expires_in, 3600);
        let claims = issuer.verify(&token.access_token).unwrap();
        assert_eq!(claims, token.claims);
        assert_eq!(claims.sub, "5");
        assert_eq!(claims.role_id, Some(RoleId::new(1)));
        assert_eq!(claims.company_id, Some(CompanyId::new(2)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = JwtTokenIssuer::new(SECRET, Duration::from_secs(3600));
        let other = JwtTokenIssuer::new(b"another-secret-entirely-32bytes!", Duration::from_secs(60));
        let token = issuer.issue(&account()).unwrap();

        assert!(matches!(other.verify(&token.access_token), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_expired_rejected() {
        let issuer = JwtTokenIssuer::new(SECRET, Duration::from_secs(3600));
        let past = Utc::now() - chrono::Duration::hours(2);
        let claims = TokenClaims::for_account(&account(), past, 60);
        let token = issuer.sign(&claims).unwrap();

        assert!(matches!(issuer.verify(&token), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_garbage_rejected() {
        let issuer = JwtTokenIssuer::new(SECRET, Duration::from_secs(3600));
        assert!(matches!(issuer.verify("not.a.jwt"), Err(AuthError::TokenInvalid)));
        assert!(matches!(issuer.verify(""), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let issuer = JwtTokenIssuer::new(SECRET, Duration::from_secs(3600));
        let token = issuer.issue(&account()).unwrap().access_token;
        let forged = issuer
            .sign(&TokenClaims {
                sub: "1".to_string(),
                ..issuer.verify(&token).unwrap()
            })
            .unwrap();

        // Genuine header and signature around another account's payload
        let parts: Vec<&str> = token.split('.').collect();
        let forged_payload = forged.split('.').nth(1).unwrap();
        let tampered = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert!(matches!(issuer.verify(&tampered), Err(AuthError::TokenInvalid)));
    }
}
