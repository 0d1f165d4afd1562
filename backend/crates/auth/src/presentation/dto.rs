//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::AuthOutput;
use crate::domain::entities::AccountView;

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Username or email
    #[serde(alias = "identifier")]
    pub username: String,
    pub password: String,
}

/// Login / refresh response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub account: AccountView,
}

impl From<AuthOutput> for AuthResponse {
    fn from(output: AuthOutput) -> Self {
        Self {
            access_token: output.access_token,
            token_type: output.token_type,
            expires_in: output.expires_in,
            account: output.account,
        }
    }
}

// ============================================================================
// Refresh
// ============================================================================

/// Refresh request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

// ============================================================================
// Profile
// ============================================================================

/// GET /profile response
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub account: AccountView,
    pub message: &'static str,
}

/// GET /me response
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub account: AccountView,
}
