//! Auth Middleware
//!
//! Bearer token verification for protected routes. Verification is
//! stateless: the token signature and expiry are checked, the store is not
//! consulted.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::{HeaderMap, header, request::Parts};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use crate::domain::token::{TokenClaims, TokenIssuer};
use crate::error::{AuthError, AuthResult};

/// Middleware state
#[derive(Clone)]
pub struct BearerAuthState {
    pub issuer: Arc<dyn TokenIssuer>,
}

/// Verified claims stored in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount(pub TokenClaims);

/// Extract the token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> AuthResult<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingBearerToken)?;

    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or(AuthError::MissingBearerToken)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MissingBearerToken);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingBearerToken);
    }

    Ok(token)
}

/// Middleware that requires a valid bearer token
///
/// Use with `axum::middleware::from_fn_with_state`.
pub async fn require_bearer_auth(
    State(state): State<BearerAuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let claims = {
        let token = bearer_token(req.headers())?;
        state.issuer.verify(token)?
    };

    req.extensions_mut().insert(AuthenticatedAccount(claims));

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthenticatedAccount
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedAccount>()
            .cloned()
            .ok_or(AuthError::MissingBearerToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert_eq!(bearer_token(&headers("bearer   abc")).unwrap(), "abc");
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        assert!(matches!(
            bearer_token(&headers("Basic dXNlcjpwYXNz")),
            Err(AuthError::MissingBearerToken)
        ));
        assert!(matches!(bearer_token(&headers("Bearer")), Err(AuthError::MissingBearerToken)));
        assert!(matches!(bearer_token(&headers("Bearer  ")), Err(AuthError::MissingBearerToken)));
        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(AuthError::MissingBearerToken)
        ));
    }
}
