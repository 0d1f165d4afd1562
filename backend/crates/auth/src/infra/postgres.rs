//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{AccountId, CompanyId, PersonId, RoleId};
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Account, CompanySummary, PersonSummary, RoleSummary};
use crate::domain::lockout::{LockoutPolicy, LockoutStatus};
use crate::domain::repository::AccountRepository;
use crate::domain::value_objects::{AccountStatus, LoginIdentifier};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for PgAccountRepository {
    async fn find_by_identifier(
        &self,
        identifier: &LoginIdentifier,
    ) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                a.id,
                a.uuid,
                a.username,
                a.email,
                a.password_hash,
                a.status,
                a.failed_attempt_count,
                a.locked_until,
                a.last_access,
                a.role_id,
                a.company_id,
                a.created_at,
                a.updated_at,
                p.id AS person_id,
                p.first_names AS person_first_names,
                p.last_names AS person_last_names,
                p.phone AS person_phone,
                r.name AS role_name,
                c.name AS company_name
            FROM accounts a
            INNER JOIN persons p ON p.id = a.person_id
            LEFT JOIN roles r ON r.id = a.role_id
            LEFT JOIN companies c ON c.id = a.company_id
            WHERE (a.username = $1 OR a.email = $1)
              AND a.deleted_at IS NULL
            "#,
        )
        .bind(identifier.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn find_by_id(&self, id: AccountId) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                a.id,
                a.uuid,
                a.username,
                a.email,
                a.password_hash,
                a.status,
                a.failed_attempt_count,
                a.locked_until,
                a.last_access,
                a.role_id,
                a.company_id,
                a.created_at,
                a.updated_at,
                p.id AS person_id,
                p.first_names AS person_first_names,
                p.last_names AS person_last_names,
                p.phone AS person_phone,
                r.name AS role_name,
                c.name AS company_name
            FROM accounts a
            INNER JOIN persons p ON p.id = a.person_id
            LEFT JOIN roles r ON r.id = a.role_id
            LEFT JOIN companies c ON c.id = a.company_id
            WHERE a.id = $1
              AND a.deleted_at IS NULL
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn increment_failed_attempts(
        &self,
        id: AccountId,
        policy: &LockoutPolicy,
    ) -> AuthResult<LockoutStatus> {
        // Single statement: the SET expressions see the pre-update row
        let row = sqlx::query_as::<_, LockoutRow>(
            r#"
            UPDATE accounts
            SET
                failed_attempt_count = failed_attempt_count + 1,
                locked_until = CASE
                    WHEN failed_attempt_count + 1 >= $2
                        THEN NOW() + make_interval(secs => $3)
                    ELSE locked_until
                END,
                updated_at = NOW()
            WHERE id = $1
              AND deleted_at IS NULL
            RETURNING failed_attempt_count, locked_until
            "#,
        )
        .bind(id.get())
        .bind(i32::try_from(policy.max_failed_attempts).unwrap_or(i32::MAX))
        .bind(policy.lockout_secs() as f64)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AuthError::Internal(format!("Account {id} vanished during login")))?;

        Ok(row.into_status())
    }

    async fn reset_failed_attempts(&self, id: AccountId) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE accounts
            SET
                failed_attempt_count = 0,
                locked_until = NULL,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_last_access(&self, id: AccountId) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE accounts
            SET
                last_access = NOW(),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    uuid: Uuid,
    username: String,
    email: String,
    password_hash: String,
    status: String,
    failed_attempt_count: i32,
    locked_until: Option<DateTime<Utc>>,
    last_access: Option<DateTime<Utc>>,
    role_id: Option<i64>,
    company_id: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    person_id: i64,
    person_first_names: String,
    person_last_names: String,
    person_phone: Option<String>,
    role_name: Option<String>,
    company_name: Option<String>,
}

impl AccountRow {
    fn into_account(self) -> AuthResult<Account> {
        let status = AccountStatus::from_code(&self.status)
            .ok_or_else(|| AuthError::Internal(format!("Invalid account status: {}", self.status)))?;

        let password_hash = HashedPassword::from_hash(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Account {}: {}", self.id, e)))?;

        let role_id = self.role_id.map(RoleId::new);
        let company_id = self.company_id.map(CompanyId::new);

        Ok(Account {
            id: AccountId::new(self.id),
            uuid: self.uuid,
            username: self.username,
            email: self.email,
            password_hash,
            status,
            failed_attempt_count: u32::try_from(self.failed_attempt_count).unwrap_or_default(),
            locked_until: self.locked_until,
            last_access: self.last_access,
            role_id,
            company_id,
            person: Some(PersonSummary::new(
                PersonId::new(self.person_id),
                self.person_first_names,
                self.person_last_names,
                self.person_phone,
            )),
            role: role_id
                .zip(self.role_name)
                .map(|(id, name)| RoleSummary { id, name }),
            company: company_id
                .zip(self.company_name)
                .map(|(id, name)| CompanySummary { id, name }),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct LockoutRow {
    failed_attempt_count: i32,
    locked_until: Option<DateTime<Utc>>,
}

impl LockoutRow {
    fn into_status(self) -> LockoutStatus {
        LockoutStatus {
            failed_attempt_count: u32::try_from(self.failed_attempt_count).unwrap_or_default(),
            locked_until: self.locked_until,
        }
    }
}
