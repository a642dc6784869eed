//! Repository for the `audit_logs` table.

use camara_core::types::DbId;
use sqlx::PgPool;

use crate::models::audit::{AuditLog, CreateAuditLog};

/// Column list for `audit_logs` SELECT queries.
const COLUMNS: &str = "id, actor_id, action, subject_type, subject_id, created_at";

/// Provides insert and lookup operations for audit logs.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Append an audit entry.
    pub async fn insert(pool: &PgPool, input: &CreateAuditLog) -> Result<AuditLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO audit_logs (actor_id, action, subject_type, subject_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(input.actor_id)
            .bind(&input.action)
            .bind(&input.subject_type)
            .bind(input.subject_id)
            .fetch_one(pool)
            .await
    }

    /// Entries for one subject, oldest first.
    pub async fn list_for_subject(
        pool: &PgPool,
        subject_type: &str,
        subject_id: DbId,
    ) -> Result<Vec<AuditLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs
             WHERE subject_type = $1 AND subject_id = $2
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(subject_type)
            .bind(subject_id)
            .fetch_all(pool)
            .await
    }
}
