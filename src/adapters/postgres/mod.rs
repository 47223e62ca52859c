//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresSessionRepository` - Session aggregates with their policy snapshot
//! - `PostgresPolicyStore` - Append-only cancellation policy versions
//!
//! Schema lives in `migrations/` and is applied by [`run_migrations`].

mod policy_store;
mod session_repository;

pub use policy_store::PostgresPolicyStore;
pub use session_repository::PostgresSessionRepository;

use sqlx::PgPool;

use crate::domain::foundation::DomainError;

/// Applies pending migrations from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to run migrations: {}", e)))
}
