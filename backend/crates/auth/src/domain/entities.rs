//! Entities
//!
//! [`Account`] is the internal credential record and is never serialized.
//! Everything returned to callers goes through [`AccountView`], which has
//! no field that could carry the password hash.

use chrono::{DateTime, Utc};
use kernel::id::{AccountId, CompanyId, PersonId, RoleId};
use platform::password::HashedPassword;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::lockout::{LockState, LockoutPolicy, LockoutStatus};
use crate::domain::value_objects::AccountStatus;

// ============================================================================
// Joined display data
// ============================================================================

/// Person the account belongs to (`persons` row)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummary {
    pub id: PersonId,
    pub first_names: String,
    pub last_names: String,
    pub full_name: String,
    pub phone: Option<String>,
}

impl PersonSummary {
    pub fn new(
        id: PersonId,
        first_names: impl Into<String>,
        last_names: impl Into<String>,
        phone: Option<String>,
    ) -> Self {
        let first_names = first_names.into();
        let last_names = last_names.into();
        let full_name = format!("{} {}", first_names.trim(), last_names.trim())
            .trim()
            .to_string();
        Self {
            id,
            first_names,
            last_names,
            full_name,
            phone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleSummary {
    pub id: RoleId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanySummary {
    pub id: CompanyId,
    pub name: String,
}

// ============================================================================
// Account
// ============================================================================

/// Login-capable identity with credentials and lockout state
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub uuid: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: HashedPassword,
    pub status: AccountStatus,
    pub failed_attempt_count: u32,
    pub locked_until: Option<DateTime<Utc>>,
    pub last_access: Option<DateTime<Utc>>,
    /// Role scoping copied into token claims
    pub role_id: Option<RoleId>,
    /// Tenant scoping copied into token claims
    pub company_id: Option<CompanyId>,
    pub person: Option<PersonSummary>,
    pub role: Option<RoleSummary>,
    pub company: Option<CompanySummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create an active account with no role, company or person attached
    pub fn new(
        id: AccountId,
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: HashedPassword,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            uuid: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            password_hash,
            status: AccountStatus::Active,
            failed_attempt_count: 0,
            locked_until: None,
            last_access: None,
            role_id: None,
            company_id: None,
            person: None,
            role: None,
            company: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn can_login(&self) -> bool {
        self.status.can_login()
    }

    pub fn lockout_status(&self) -> LockoutStatus {
        LockoutStatus {
            failed_attempt_count: self.failed_attempt_count,
            locked_until: self.locked_until,
        }
    }

    pub fn lock_state(&self, now: DateTime<Utc>) -> LockState {
        self.lockout_status().state_at(now)
    }

    /// Record a failed password check
    pub fn record_failure(&mut self, policy: &LockoutPolicy, now: DateTime<Utc>) -> LockoutStatus {
        let status = policy.register_failure(self.lockout_status(), now);
        self.failed_attempt_count = status.failed_attempt_count;
        self.locked_until = status.locked_until;
        self.updated_at = now;
        status
    }

    /// Reset failure count on successful login
    pub fn reset_failures(&mut self, now: DateTime<Utc>) {
        self.failed_attempt_count = 0;
        self.locked_until = None;
        self.updated_at = now;
    }

    pub fn record_access(&mut self, now: DateTime<Utc>) {
        self.last_access = Some(now);
        self.updated_at = now;
    }

    /// Public projection
    pub fn view(&self) -> AccountView {
        AccountView {
            id: self.id,
            uuid: self.uuid,
            username: self.username.clone(),
            email: self.email.clone(),
            status: self.status,
            last_access: self.last_access,
            role_id: self.role_id,
            company_id: self.company_id,
            person: self.person.clone(),
            role: self.role.clone(),
            company: self.company.clone(),
        }
    }
}

// ============================================================================
// AccountView
// ============================================================================

/// Account projection safe to return to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: AccountId,
    pub uuid: Uuid,
    pub username: String,
    pub email: String,
    pub status: AccountStatus,
    pub last_access: Option<DateTime<Utc>>,
    pub role_id: Option<RoleId>,
    pub company_id: Option<CompanyId>,
    pub person: Option<PersonSummary>,
    pub role: Option<RoleSummary>,
    pub company: Option<CompanySummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    fn account() -> Account {
        let hash = ClearTextPassword::new("secret123").hash(4).unwrap();
        let mut account = Account::new(AccountId::new(1), "alice", "alice@example.com", hash);
        account.role_id = Some(RoleId::new(2));
        account.company_id = Some(CompanyId::new(3));
        account.person = Some(PersonSummary::new(
            PersonId::new(9),
            "Alice",
            "Liddell",
            None,
        ));
        account
    }

    #[test]
    fn test_view_has_no_secret_fields() {
        let account = account();
        let json = serde_json::to_value(account.view()).unwrap();
        let object = json.as_object().unwrap();

        assert!(!object.contains_key("passwordHash"));
        assert!(!object.contains_key("password_hash"));
        assert!(!object.contains_key("salt"));
        assert!(!json.to_string().contains(account.password_hash.as_str()));

        assert_eq!(object["username"], "alice");
        assert_eq!(object["roleId"], 2);
        assert_eq!(object["companyId"], 3);
        assert_eq!(object["person"]["fullName"], "Alice Liddell");
    }

    #[test]
    fn test_record_failure_and_reset() {
        let policy = LockoutPolicy::default();
        let mut account = account();
        let now = Utc::now();

        for _ in 0..5 {
            account.record_failure(&policy, now);
        }
        assert_eq!(account.failed_attempt_count, 5);
        assert!(account.lock_state(now).is_locked());

        account.reset_failures(now);
        assert_eq!(account.failed_attempt_count, 0);
        assert_eq!(account.locked_until, None);
        assert_eq!(account.lock_state(now), LockState::Unlocked);
    }

    #[test]
    fn test_person_full_name_trims() {
        let person = PersonSummary::new(PersonId::new(1), " Ana ", "", None);
        assert_eq!(person.full_name, "Ana");
    }
}
