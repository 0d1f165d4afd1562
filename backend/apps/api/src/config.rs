//! Server Configuration
//!
//! Everything is read from the environment (after `.env` is loaded).

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::domain::LockoutPolicy;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

/// Minimum accepted `JWT_SECRET` length in bytes
const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let frontend_origins = env::var("FRONTEND_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            database_url,
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            port: parse_or("PORT", DEFAULT_PORT)?,
            frontend_origins,
            auth: auth_config_from_env()?,
        })
    }
}

fn auth_config_from_env() -> anyhow::Result<AuthConfig> {
    let base = match env::var("JWT_SECRET") {
        Ok(secret) if secret.len() >= MIN_JWT_SECRET_LEN => AuthConfig::with_secret(secret),
        Ok(_) => bail!("JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} bytes"),
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("JWT_SECRET not set; using a random secret (tokens reset on restart)");
            AuthConfig::development()
        }
        Err(_) => bail!("JWT_SECRET must be set in production"),
    };

    let defaults = LockoutPolicy::default();
    let max_failed_attempts =
        parse_or("AUTH_MAX_FAILED_ATTEMPTS", defaults.max_failed_attempts)?;
    let lockout_minutes = parse_or("AUTH_LOCKOUT_MINUTES", LockoutPolicy::DEFAULT_LOCKOUT_MINUTES)?;
    if lockout_minutes <= 0 {
        bail!("AUTH_LOCKOUT_MINUTES must be positive");
    }

    let bcrypt_cost = parse_or("BCRYPT_COST", base.bcrypt_cost)?;
    if !(4..=31).contains(&bcrypt_cost) {
        bail!("BCRYPT_COST must be between 4 and 31");
    }

    Ok(AuthConfig {
        token_ttl: Duration::from_secs(parse_or("JWT_EXPIRES_IN_SECS", base.token_ttl.as_secs())?),
        lockout: LockoutPolicy::new(
            max_failed_attempts,
            chrono::Duration::minutes(lockout_minutes),
        ),
        enforce_lockout: parse_or("AUTH_ENFORCE_LOCKOUT", base.enforce_lockout)?,
        bcrypt_cost,
        ..base
    })
}

/// Parse an optional variable, falling back to `default` when unset
fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {key}={raw:?}: {e}")),
        Err(_) => Ok(default),
    }
}
