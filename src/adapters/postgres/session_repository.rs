//! PostgreSQL implementation of SessionRepository.
//!
//! Persists Session aggregates to PostgreSQL. The policy snapshot is stored
//! inline on the row so later policy versions never touch it.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::domain::foundation::{
    DomainError, ErrorCode, SessionId, SessionTypeId, TimeRange, Timestamp, UserId,
};
use crate::domain::policy::PolicySnapshot;
use crate::domain::session::{ReminderKind, Session, SessionParts, SessionStatus};
use crate::ports::{SessionFilter, SessionRepository};

const SESSION_COLUMNS: &str = r#"
    id, photographer_id, client_id, session_type_id, session_type_name,
    location, notes, starts_at, ends_at, status,
    policy_version, policy_min_hours_cancel, policy_min_hours_reschedule,
    policy_tolerance_minutes, reminder_48_sent, reminder_24_sent,
    cancellation_reason, cancelled_at, photographer_confirmed_at,
    client_confirmed_at, created_at, updated_at
"#;

// SET expressions read the pre-update row, so the CASE sees the old range.
const UPDATE_SESSION: &str = r#"
    UPDATE sessions SET
        session_type_id = $2,
        session_type_name = $3,
        location = $4,
        notes = $5,
        starts_at = $6,
        ends_at = $7,
        status = $8,
        cancellation_reason = $9,
        cancelled_at = $10,
        photographer_confirmed_at = $11,
        client_confirmed_at = $12,
        updated_at = $13,
        reminder_48_sent = CASE WHEN starts_at = $6 AND ends_at = $7
            THEN reminder_48_sent OR $14 ELSE $14 END,
        reminder_24_sent = CASE WHEN starts_at = $6 AND ends_at = $7
            THEN reminder_24_sent OR $15 ELSE $15 END
    WHERE id = $1
"#;

/// PostgreSQL implementation of SessionRepository.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    /// Creates a new PostgresSessionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let policy = session.policy();

        sqlx::query(
            r#"
            INSERT INTO sessions (
                id, photographer_id, client_id, session_type_id, session_type_name,
                location, notes, starts_at, ends_at, status,
                policy_version, policy_min_hours_cancel, policy_min_hours_reschedule,
                policy_tolerance_minutes, reminder_48_sent, reminder_24_sent,
                cancellation_reason, cancelled_at, photographer_confirmed_at,
                client_confirmed_at, created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                $12, $13, $14, $15, $16, $17, $18, $19, $20, $21, $22
            )
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.photographer_id().as_str())
        .bind(session.client_id().as_str())
        .bind(session.session_type_id().as_uuid())
        .bind(session.session_type_name())
        .bind(session.location())
        .bind(session.notes())
        .bind(session.starts_at().as_datetime())
        .bind(session.ends_at().as_datetime())
        .bind(session.status().as_str())
        .bind(to_db_int(policy.version, "policy_version")?)
        .bind(to_db_int(policy.min_hours_cancel, "policy_min_hours_cancel")?)
        .bind(to_db_int(policy.min_hours_reschedule, "policy_min_hours_reschedule")?)
        .bind(to_db_int(policy.tolerance_minutes, "policy_tolerance_minutes")?)
        .bind(session.reminder_sent(ReminderKind::Early))
        .bind(session.reminder_sent(ReminderKind::Final))
        .bind(session.cancellation_reason())
        .bind(session.cancelled_at().map(|t| *t.as_datetime()))
        .bind(session.photographer_confirmed_at().map(|t| *t.as_datetime()))
        .bind(session.client_confirmed_at().map(|t| *t.as_datetime()))
        .bind(session.created_at().as_datetime())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert session: {}", e)))?;

        Ok(())
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        // Stored reminder flags survive unless the range moved.
        let result = sqlx::query(UPDATE_SESSION)
        .bind(session.id().as_uuid())
        .bind(session.session_type_id().as_uuid())
        .bind(session.session_type_name())
        .bind(session.location())
        .bind(session.notes())
        .bind(session.starts_at().as_datetime())
        .bind(session.ends_at().as_datetime())
        .bind(session.status().as_str())
        .bind(session.cancellation_reason())
        .bind(session.cancelled_at().map(|t| *t.as_datetime()))
        .bind(session.photographer_confirmed_at().map(|t| *t.as_datetime()))
        .bind(session.client_confirmed_at().map(|t| *t.as_datetime()))
        .bind(session.updated_at().as_datetime())
        .bind(session.reminder_sent(ReminderKind::Early))
        .bind(session.reminder_sent(ReminderKind::Final))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update session: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::SessionNotFound, "Session not found")
                .with_detail("session_id", session.id().to_string()));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM sessions WHERE id = $1",
            SESSION_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch session: {}", e)))?;

        row.map(row_to_session).transpose()
    }

    async fn find_sessions(&self, filter: &SessionFilter) -> Result<Vec<Session>, DomainError> {
        let mut query = build_filter_query(filter);

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to query sessions: {}", e)))?;

        rows.into_iter().map(row_to_session).collect()
    }

    async fn set_reminder_sent(&self, id: &SessionId, kind: ReminderKind) -> Result<(), DomainError> {
        let result = sqlx::query(&format!(
            "UPDATE sessions SET {} = TRUE WHERE id = $1",
            kind.flag_column()
        ))
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database(format!("Failed to set {} flag: {}", kind, e))
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::SessionNotFound, "Session not found")
                .with_detail("session_id", id.to_string()));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

/// Translates a filter into SQL. Must agree with `SessionFilter::matches`.
fn build_filter_query(filter: &SessionFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!("SELECT {} FROM sessions WHERE TRUE", SESSION_COLUMNS));

    if let Some(id) = &filter.photographer_id {
        query.push(" AND photographer_id = ").push_bind(id.as_str().to_string());
    }
    if let Some(id) = &filter.client_id {
        query.push(" AND client_id = ").push_bind(id.as_str().to_string());
    }
    if let Some(statuses) = &filter.statuses {
        let values: Vec<String> = statuses.iter().map(|s| s.as_str().to_string()).collect();
        query.push(" AND status = ANY(").push_bind(values).push(")");
    }
    if let Some(after) = &filter.starts_after {
        query.push(" AND starts_at > ").push_bind(*after.as_datetime());
    }
    if let Some(range) = &filter.overlapping {
        query
            .push(" AND starts_at < ")
            .push_bind(*range.end().as_datetime())
            .push(" AND ends_at > ")
            .push_bind(*range.start().as_datetime());
    }

    query.push(" ORDER BY starts_at ASC");
    query
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
}

fn timestamp_column(row: &PgRow, name: &str) -> Result<Timestamp, DomainError> {
    let value: chrono::DateTime<chrono::Utc> = column(row, name)?;
    Ok(Timestamp::from_datetime(value))
}

fn optional_timestamp_column(row: &PgRow, name: &str) -> Result<Option<Timestamp>, DomainError> {
    let value: Option<chrono::DateTime<chrono::Utc>> = column(row, name)?;
    Ok(value.map(Timestamp::from_datetime))
}

fn to_db_int(value: u32, name: &str) -> Result<i32, DomainError> {
    i32::try_from(value)
        .map_err(|_| DomainError::database(format!("{} out of range: {}", name, value)))
}

fn from_db_int(value: i32, name: &str) -> Result<u32, DomainError> {
    u32::try_from(value)
        .map_err(|_| DomainError::database(format!("Invalid {}: {}", name, value)))
}

fn str_to_session_status(s: &str) -> Result<SessionStatus, DomainError> {
    SessionStatus::parse(s).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid session status: {}", s),
        )
    })
}

fn user_id_column(row: &PgRow, name: &str) -> Result<UserId, DomainError> {
    let value: String = column(row, name)?;
    UserId::new(value).map_err(|e| DomainError::database(format!("Invalid {}: {}", name, e)))
}

fn row_to_session(row: PgRow) -> Result<Session, DomainError> {
    let id: uuid::Uuid = column(&row, "id")?;
    let session_type_id: uuid::Uuid = column(&row, "session_type_id")?;
    let status: String = column(&row, "status")?;

    let range = TimeRange::new(
        timestamp_column(&row, "starts_at")?,
        timestamp_column(&row, "ends_at")?,
    )
    .map_err(|e| DomainError::database(format!("Invalid session range: {}", e)))?;

    let policy = PolicySnapshot {
        version: from_db_int(column(&row, "policy_version")?, "policy_version")?,
        min_hours_cancel: from_db_int(
            column(&row, "policy_min_hours_cancel")?,
            "policy_min_hours_cancel",
        )?,
        min_hours_reschedule: from_db_int(
            column(&row, "policy_min_hours_reschedule")?,
            "policy_min_hours_reschedule",
        )?,
        tolerance_minutes: from_db_int(
            column(&row, "policy_tolerance_minutes")?,
            "policy_tolerance_minutes",
        )?,
    };

    Ok(Session::reconstitute(SessionParts {
        id: SessionId::from_uuid(id),
        photographer_id: user_id_column(&row, "photographer_id")?,
        client_id: user_id_column(&row, "client_id")?,
        session_type_id: SessionTypeId::from_uuid(session_type_id),
        session_type_name: column(&row, "session_type_name")?,
        location: column(&row, "location")?,
        notes: column(&row, "notes")?,
        range,
        status: str_to_session_status(&status)?,
        policy,
        reminder_48_sent: column(&row, "reminder_48_sent")?,
        reminder_24_sent: column(&row, "reminder_24_sent")?,
        cancellation_reason: column(&row, "cancellation_reason")?,
        cancelled_at: optional_timestamp_column(&row, "cancelled_at")?,
        photographer_confirmed_at: optional_timestamp_column(&row, "photographer_confirmed_at")?,
        client_confirmed_at: optional_timestamp_column(&row, "client_confirmed_at")?,
        created_at: timestamp_column(&row, "created_at")?,
        updated_at: timestamp_column(&row, "updated_at")?,
    }))
}
