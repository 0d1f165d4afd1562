//! Lockout Policy
//!
//! Pure state transitions over `(failed_attempt_count, locked_until)`.
//!
//! ```text
//!   Unlocked --failure (count+1 < max)--> Unlocked
//!   Unlocked --failure (count+1 >= max)--> Locked(now + duration)
//!   Locked   --failure--> Locked(now + duration)   (count keeps growing)
//!   any      --successful login--> Unlocked, count = 0
//! ```
//!
//! Whether a Locked account may still attempt a login at all is decided by
//! `AuthConfig::enforce_lockout`, not here.

use chrono::{DateTime, Duration, Utc};

/// Current lock state of an account at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Unlocked,
    Locked { until: DateTime<Utc> },
}

impl LockState {
    pub fn is_locked(&self) -> bool {
        matches!(self, LockState::Locked { .. })
    }
}

/// Persisted lockout fields of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockoutStatus {
    pub failed_attempt_count: u32,
    pub locked_until: Option<DateTime<Utc>>,
}

impl LockoutStatus {
    /// State after a successful login
    pub const fn cleared() -> Self {
        Self {
            failed_attempt_count: 0,
            locked_until: None,
        }
    }

    /// Locked means `locked_until` is present and still in the future
    pub fn state_at(&self, now: DateTime<Utc>) -> LockState {
        match self.locked_until {
            Some(until) if until > now => LockState::Locked { until },
            _ => LockState::Unlocked,
        }
    }
}

/// Failed-attempt threshold and lock duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutPolicy {
    pub max_failed_attempts: u32,
    pub lockout_duration: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_failed_attempts: Self::DEFAULT_MAX_FAILED_ATTEMPTS,
            lockout_duration: Duration::minutes(Self::DEFAULT_LOCKOUT_MINUTES),
        }
    }
}

impl LockoutPolicy {
    pub const DEFAULT_MAX_FAILED_ATTEMPTS: u32 = 5;
    pub const DEFAULT_LOCKOUT_MINUTES: i64 = 15;

    pub fn new(max_failed_attempts: u32, lockout_duration: Duration) -> Self {
        Self {
            max_failed_attempts: max_failed_attempts.max(1),
            lockout_duration,
        }
    }

    /// Apply one failed password check
    ///
    /// The count always grows by exactly one. Reaching the threshold (or
    /// failing again above it) sets `locked_until = now + duration`;
    /// otherwise any previous `locked_until` is carried over unchanged.
    pub fn register_failure(&self, current: LockoutStatus, now: DateTime<Utc>) -> LockoutStatus {
        let failed_attempt_count = current.failed_attempt_count.saturating_add(1);

        let locked_until = if failed_attempt_count >= self.max_failed_attempts {
            Some(now + self.lockout_duration)
        } else {
            current.locked_until
        };

        LockoutStatus {
            failed_attempt_count,
            locked_until,
        }
    }

    /// Lock duration in whole seconds (bound into SQL intervals)
    pub fn lockout_secs(&self) -> i64 {
        self.lockout_duration.num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_defaults() {
        let policy = LockoutPolicy::default();
        assert_eq!(policy.max_failed_attempts, 5);
        assert_eq!(policy.lockout_secs(), 15 * 60);
    }

    #[test]
    fn test_failures_below_threshold_do_not_lock() {
        let policy = LockoutPolicy::default();
        let mut status = LockoutStatus::default();

        for expected in 1..=4 {
            status = policy.register_failure(status, at(0));
            assert_eq!(status.failed_attempt_count, expected);
            assert_eq!(status.locked_until, None);
            assert_eq!(status.state_at(at(0)), LockState::Unlocked);
        }
    }

    #[test]
    fn test_fifth_failure_locks_for_fifteen_minutes() {
        let policy = LockoutPolicy::default();
        let status = LockoutStatus {
            failed_attempt_count: 4,
            locked_until: None,
        };

        let status = policy.register_failure(status, at(0));
        assert_eq!(status.failed_attempt_count, 5);
        assert_eq!(status.locked_until, Some(at(15 * 60)));
        assert!(status.state_at(at(60)).is_locked());
    }

    #[test]
    fn test_failure_while_locked_extends_lock() {
        let policy = LockoutPolicy::default();
        let status = LockoutStatus {
            failed_attempt_count: 5,
            locked_until: Some(at(15 * 60)),
        };

        let status = policy.register_failure(status, at(120));
        assert_eq!(status.failed_attempt_count, 6);
        assert_eq!(status.locked_until, Some(at(120 + 15 * 60)));
    }

    #[test]
    fn test_lock_expires() {
        let status = LockoutStatus {
            failed_attempt_count: 5,
            locked_until: Some(at(900)),
        };
        assert!(status.state_at(at(899)).is_locked());
        assert_eq!(status.state_at(at(900)), LockState::Unlocked);
        assert_eq!(status.state_at(at(1000)), LockState::Unlocked);
    }

    #[test]
    fn test_stale_lock_is_carried_below_threshold() {
        // A custom, higher threshold must not clear an earlier lock timestamp
        let policy = LockoutPolicy::new(10, Duration::minutes(1));
        let status = LockoutStatus {
            failed_attempt_count: 2,
            locked_until: Some(at(-5)),
        };
        let status = policy.register_failure(status, at(0));
        assert_eq!(status.locked_until, Some(at(-5)));
        assert_eq!(status.state_at(at(0)), LockState::Unlocked);
    }

    #[test]
    fn test_cleared() {
        let status = LockoutStatus::cleared();
        assert_eq!(status.failed_attempt_count, 0);
        assert_eq!(status.locked_until, None);
    }

    #[test]
    fn test_zero_threshold_is_clamped() {
        assert_eq!(LockoutPolicy::new(0, Duration::minutes(1)).max_failed_attempts, 1);
    }
}
