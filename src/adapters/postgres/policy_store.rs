//! PostgreSQL implementation of PolicyStore.
//!
//! Versions are rows in `policy_versions`; rows are only ever inserted.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::policy::{CancellationPolicy, PolicySettings};
use crate::ports::PolicyStore;

#[derive(Clone)]
pub struct PostgresPolicyStore {
    pool: PgPool,
}

impl PostgresPolicyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PolicyStore for PostgresPolicyStore {
    async fn current_policy(&self) -> Result<CancellationPolicy, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT version, min_hours_cancel, min_hours_reschedule, tolerance_minutes, created_at
            FROM policy_versions
            ORDER BY version DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch current policy: {}", e)))?;

        match row {
            Some(row) => row_to_policy(&row),
            None => Ok(CancellationPolicy::baseline(Timestamp::now())),
        }
    }

    async fn policy_at_version(
        &self,
        version: u32,
    ) -> Result<Option<CancellationPolicy>, DomainError> {
        let Ok(version) = i32::try_from(version) else {
            return Ok(None);
        };

        let row = sqlx::query(
            r#"
            SELECT version, min_hours_cancel, min_hours_reschedule, tolerance_minutes, created_at
            FROM policy_versions
            WHERE version = $1
            "#,
        )
        .bind(version)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch policy version: {}", e)))?;

        row.as_ref().map(row_to_policy).transpose()
    }

    async fn create_policy_version(
        &self,
        settings: PolicySettings,
        at: Timestamp,
    ) -> Result<CancellationPolicy, DomainError> {
        settings.validate()?;

        // The primary key rejects a concurrent writer that picked the same number.
        let row = sqlx::query(
            r#"
            INSERT INTO policy_versions (
                version, min_hours_cancel, min_hours_reschedule, tolerance_minutes, created_at
            )
            SELECT COALESCE(MAX(version), 0) + 1, $1, $2, $3, $4
            FROM policy_versions
            RETURNING version, min_hours_cancel, min_hours_reschedule, tolerance_minutes, created_at
            "#,
        )
        .bind(settings.min_hours_cancel as i32)
        .bind(settings.min_hours_reschedule as i32)
        .bind(settings.tolerance_minutes as i32)
        .bind(at.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert policy version: {}", e)))?;

        row_to_policy(&row)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn unsigned(row: &PgRow, name: &str) -> Result<u32, DomainError> {
    let value: i32 = row
        .try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))?;
    u32::try_from(value).map_err(|_| DomainError::database(format!("Invalid {}: {}", name, value)))
}

fn row_to_policy(row: &PgRow) -> Result<CancellationPolicy, DomainError> {
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| DomainError::database(format!("Failed to get created_at: {}", e)))?;

    Ok(CancellationPolicy {
        version: unsigned(row, "version")?,
        settings: PolicySettings {
            min_hours_cancel: unsigned(row, "min_hours_cancel")?,
            min_hours_reschedule: unsigned(row, "min_hours_reschedule")?,
            tolerance_minutes: unsigned(row, "tolerance_minutes")?,
        },
        created_at: Timestamp::from_datetime(created_at),
    })
}
