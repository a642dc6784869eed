//! Audit log entity models. Entries are append-only, so there is no
//! `updated_at` and no update DTO.

use camara_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single audit log entry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    pub actor_id: DbId,
    pub action: String,
    pub subject_type: String,
    pub subject_id: DbId,
    pub created_at: Timestamp,
}

/// DTO for inserting a new audit log entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAuditLog {
    pub actor_id: DbId,
    pub action: String,
    pub subject_type: String,
    pub subject_id: DbId,
}
