//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use crate::domain::lockout::LockoutPolicy;

/// Length of generated development secrets
const RANDOM_SECRET_LEN: usize = 32;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 key for access tokens
    pub jwt_secret: Vec<u8>,
    /// Access token lifetime (1 hour)
    pub token_ttl: Duration,
    /// Failed-attempt threshold and lock duration
    pub lockout: LockoutPolicy,
    /// Refuse login while `locked_until` is in the future.
    /// When false, a locked account can still log in with the right password.
    pub enforce_lockout: bool,
    /// bcrypt work factor for new hashes
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Vec::new(),
            token_ttl: Duration::from_secs(3600), // 1 hour
            lockout: LockoutPolicy::default(),
            enforce_lockout: true,
            bcrypt_cost: platform::password::DEFAULT_COST,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("lockout", &self.lockout)
            .field("enforce_lockout", &self.enforce_lockout)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl AuthConfig {
    /// Create config with an explicit signing secret
    pub fn with_secret(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create config with a random signing secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; RANDOM_SECRET_LEN];
        rand::rng().fill_bytes(&mut secret);
        Self::with_secret(secret)
    }

    /// Create config for development
    ///
    /// Tokens do not survive a restart.
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Get token TTL in seconds
    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.token_ttl_secs(), 3600);
        assert_eq!(config.lockout.max_failed_attempts, 5);
        assert!(config.enforce_lockout);
        assert_eq!(config.bcrypt_cost, 10);
    }

    #[test]
    fn test_random_secrets_differ() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_eq!(a.jwt_secret.len(), RANDOM_SECRET_LEN);
        assert_ne!(a.jwt_secret, b.jwt_secret);
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = AuthConfig::with_secret(b"super-secret".to_vec());
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
