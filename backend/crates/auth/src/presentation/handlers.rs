//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{GetProfileUseCase, LoginInput, LoginUseCase, RefreshTokenUseCase};
use crate::domain::repository::AccountRepository;
use crate::domain::token::TokenIssuer;
use crate::error::AuthResult;
use crate::infra::jwt::JwtTokenIssuer;
use crate::presentation::dto::{
    AuthResponse, LoginRequest, MeResponse, ProfileResponse, RefreshRequest,
};
use crate::presentation::middleware::{BearerAuthState, bearer_token};

pub const PROFILE_MESSAGE: &str = "Profile retrieved successfully";

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: AccountRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub issuer: Arc<dyn TokenIssuer>,
    pub config: Arc<AuthConfig>,
}

impl<R> Clone for AuthAppState<R>
where
    R: AccountRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            issuer: self.issuer.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R> AuthAppState<R>
where
    R: AccountRepository + Send + Sync + 'static,
{
    /// Build state with a JWT issuer keyed from the config
    pub fn new(repo: R, config: AuthConfig) -> Self {
        let issuer = JwtTokenIssuer::new(&config.jwt_secret, config.token_ttl);
        Self {
            repo: Arc::new(repo),
            issuer: Arc::new(issuer),
            config: Arc::new(config),
        }
    }

    /// State for `require_bearer_auth` on other routers
    pub fn bearer_auth_state(&self) -> BearerAuthState {
        BearerAuthState {
            issuer: self.issuer.clone(),
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<AuthResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.issuer.clone(),
        state.config.clone(),
    );

    let input = LoginInput {
        identifier: req.username,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(output.into()))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/auth/refresh
pub async fn refresh<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RefreshRequest>,
) -> AuthResult<Json<AuthResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let use_case = RefreshTokenUseCase::new(state.repo.clone(), state.issuer.clone());
    let output = use_case.execute(&req.refresh_token).await?;

    Ok(Json(output.into()))
}

// ============================================================================
// Profile
// ============================================================================

/// GET /api/auth/profile
pub async fn profile<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<ProfileResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let token = bearer_token(&headers)?;
    let use_case = GetProfileUseCase::new(state.repo.clone(), state.issuer.clone());
    let account = use_case.execute(token).await?;

    Ok(Json(ProfileResponse {
        account,
        message: PROFILE_MESSAGE,
    }))
}

/// GET /api/auth/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<MeResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let token = bearer_token(&headers)?;
    let use_case = GetProfileUseCase::new(state.repo.clone(), state.issuer.clone());
    let account = use_case.execute(token).await?;

    Ok(Json(MeResponse { account }))
}
