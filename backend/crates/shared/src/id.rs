//! Common ID Types
//!
//! Type-safe wrappers around the `BIGSERIAL` primary keys used by every
//! POS table (companies, stores, people, users, roles).

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type AccountId = Id<markers::Account>;
/// let id = AccountId::new(7);
/// assert_eq!(id.get(), 7);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

/// Error returned when an ID cannot be parsed from text (e.g. a JWT `sub`)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid identifier: {0:?}")]
pub struct IdParseError(pub String);

impl<T> Id<T> {
    /// Wrap a raw database key
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the raw database key
    #[inline]
    pub const fn get(&self) -> i64 {
        self.value
    }
}

// Manual impls so that `T` (a marker) needs no bounds.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .ok()
            .filter(|v| *v > 0)
            .map(Self::new)
            .ok_or_else(|| IdParseError(s.to_string()))
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::new)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for user account IDs
    pub struct Account;

    /// Marker for role IDs
    pub struct Role;

    /// Marker for company (tenant) IDs
    pub struct Company;

    /// Marker for person IDs
    pub struct Person;
}

/// Type aliases for common IDs
pub type AccountId = Id<markers::Account>;
pub type RoleId = Id<markers::Role>;
pub type CompanyId = Id<markers::Company>;
pub type PersonId = Id<markers::Person>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_type_safety() {
        let account_id = AccountId::new(1);
        let role_id = RoleId::new(1);

        // Different types with the same raw value; cannot be compared directly
        let a: i64 = account_id.into();
        let r: i64 = role_id.into();
        assert_eq!(a, r);
    }

    #[test]
    fn test_parse() {
        assert_eq!("42".parse::<AccountId>().unwrap(), AccountId::new(42));
        assert_eq!(" 7 ".parse::<AccountId>().unwrap().get(), 7);
        assert!("abc".parse::<AccountId>().is_err());
        assert!("0".parse::<AccountId>().is_err());
        assert!("-3".parse::<AccountId>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = CompanyId::new(12);
        assert_eq!(serde_json::to_string(&id).unwrap(), "12");
        let back: CompanyId = serde_json::from_str("12").unwrap();
        assert_eq!(back, id);
    }
}
