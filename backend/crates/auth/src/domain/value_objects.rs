//! Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// AccountStatus
// ============================================================================

/// Account status as stored in `accounts.status`
///
/// Only `Active` accounts may authenticate. Status changes are made by the
/// user-management module; the auth flow only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl AccountStatus {
    /// String code used in the database and the API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "suspended" => Some(Self::Suspended),
            _ => None,
        }
    }

    /// Check if login is allowed
    #[inline]
    pub const fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// LoginIdentifier
// ============================================================================

/// Longest identifier accepted (matches the `VARCHAR(255)` email column)
pub const MAX_IDENTIFIER_LENGTH: usize = 255;

/// Username or email presented at login
///
/// The credential store matches it against both columns, so no attempt is
/// made to tell the two apart here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginIdentifier(String);

impl LoginIdentifier {
    /// Trim surrounding whitespace; `None` for blank or oversized input
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.chars().count() > MAX_IDENTIFIER_LENGTH {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier looks like an email address (logging only)
    pub fn looks_like_email(&self) -> bool {
        self.0.contains('@')
    }
}

impl fmt::Display for LoginIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
