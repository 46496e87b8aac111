//! libSQL backend: async `EmailStore` implementation.
//!
//! Supports local file and in-memory databases.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::DatabaseError;
use crate::pipeline::types::ClassificationResult;
use crate::store::migrations;
use crate::store::traits::{EmailRecord, EmailStore, ProcessingStatus};

/// libSQL database backend.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlBackend {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let backend = Self::from_database(db)?;
        backend.init_schema().await?;
        info!(path = %path.display(), "Database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Pool(format!("Failed to create in-memory database: {e}"))
            })?;

        let backend = Self::from_database(db)?;
        backend.init_schema().await?;
        Ok(backend)
    }

    fn from_database(db: LibSqlDatabase) -> Result<Self, DatabaseError> {
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        Ok(Self {
            db: Arc::new(db),
            conn,
        })
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }

    async fn query_emails(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
        context: &str,
    ) -> Result<Vec<EmailRecord>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(sql, params)
            .await
            .map_err(|e| DatabaseError::Query(format!("{context}: {e}")))?;

        let mut emails = Vec::new();
        loop {
            match rows.next().await {
                Ok(Some(row)) => match row_to_email(&row) {
                    Ok(email) => emails.push(email),
                    Err(e) => {
                        warn!("Skipping email row: {e}");
                    }
                },
                Ok(None) => break,
                Err(e) => {
                    warn!(count = emails.len(), "{context}: row fetch failed, listing truncated: {e}");
                    break;
                }
            }
        }
        Ok(emails)
    }

    /// Run an UPDATE that must hit exactly one email.
    async fn update_one(
        &self,
        id: &str,
        sql: &str,
        params: impl libsql::params::IntoParams,
        context: &str,
    ) -> Result<(), DatabaseError> {
        let affected = self
            .conn()
            .execute(sql, params)
            .await
            .map_err(|e| DatabaseError::Query(format!("{context}: {e}")))?;

        if affected == 0 {
            return Err(DatabaseError::NotFound {
                entity: "email".into(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

// ── Helper functions ────────────────────────────────────────────────

/// Parse an RFC 3339 or SQLite datetime string into DateTime<Utc>.
fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return ndt.and_utc();
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return ndt.and_utc();
    }
    DateTime::<Utc>::MIN_UTC
}

fn parse_optional_datetime(s: &Option<String>) -> Option<DateTime<Utc>> {
    s.as_ref().map(|s| parse_datetime(s))
}

/// Convert `Option<&str>` to libsql Value.
fn opt_text(s: Option<&str>) -> libsql::Value {
    match s {
        Some(s) => libsql::Value::Text(s.to_string()),
        None => libsql::Value::Null,
    }
}

/// Map a libsql Row to an EmailRecord.
///
/// Column order matches EMAIL_COLUMNS.
fn row_to_email(row: &libsql::Row) -> Result<EmailRecord, libsql::Error> {
    let category_str: Option<String> = row.get(3).ok();
    let status_str: String = row.get(5)?;
    let created_str: String = row.get(7)?;
    let processed_str: Option<String> = row.get(8).ok();

    Ok(EmailRecord {
        id: row.get(0)?,
        content: row.get(1)?,
        filename: row.get(2).ok(),
        category: category_str.and_then(|s| s.parse().ok()),
        suggested_response: row.get(4).ok(),
        processing_status: status_str.parse().unwrap_or_default(),
        error_message: row.get(6).ok(),
        created_at: parse_datetime(&created_str),
        processed_at: parse_optional_datetime(&processed_str),
    })
}

// ── Trait implementation ────────────────────────────────────────────

const EMAIL_COLUMNS: &str = "id, content, filename, category, suggested_response, processing_status, error_message, created_at, processed_at";

#[async_trait]
impl EmailStore for LibSqlBackend {
    async fn init_schema(&self) -> Result<(), DatabaseError> {
        migrations::run_migrations(self.conn()).await
    }

    async fn create_email(
        &self,
        content: &str,
        filename: Option<&str>,
        status: ProcessingStatus,
    ) -> Result<EmailRecord, DatabaseError> {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now();
        self.conn()
            .execute(
                "INSERT INTO emails (id, content, filename, processing_status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    id.clone(),
                    content,
                    opt_text(filename),
                    status.as_str(),
                    created_at.to_rfc3339(),
                ],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("create_email: {e}")))?;

        debug!(id = %id, status = status.as_str(), "Email inserted into DB");
        Ok(EmailRecord {
            id,
            content: content.to_string(),
            filename: filename.map(String::from),
            category: None,
            suggested_response: None,
            processing_status: status,
            error_message: None,
            created_at,
            processed_at: None,
        })
    }

    async fn complete_email(
        &self,
        id: &str,
        result: &ClassificationResult,
    ) -> Result<(), DatabaseError> {
        self.update_one(
            id,
            "UPDATE emails SET category = ?1, suggested_response = ?2, processing_status = ?3,
                error_message = NULL, processed_at = ?4
             WHERE id = ?5",
            params![
                result.category.label(),
                result.suggested_response.as_str(),
                ProcessingStatus::Completed.as_str(),
                Utc::now().to_rfc3339(),
                id,
            ],
            "complete_email",
        )
        .await?;

        debug!(id = id, category = %result.category, "Email marked completed");
        Ok(())
    }

    async fn fail_email(&self, id: &str, message: &str) -> Result<(), DatabaseError> {
        self.update_one(
            id,
            "UPDATE emails SET processing_status = ?1, error_message = ?2, processed_at = ?3
             WHERE id = ?4",
            params![
                ProcessingStatus::Error.as_str(),
                message,
                Utc::now().to_rfc3339(),
                id,
            ],
            "fail_email",
        )
        .await?;

        debug!(id = id, "Email marked as error");
        Ok(())
    }

    async fn get_email(&self, id: &str) -> Result<Option<EmailRecord>, DatabaseError> {
        let mut emails = self
            .query_emails(
                &format!("SELECT {EMAIL_COLUMNS} FROM emails WHERE id = ?1"),
                params![id],
                "get_email",
            )
            .await?;
        Ok(emails.pop())
    }

    async fn list_recent_emails(&self, limit: usize) -> Result<Vec<EmailRecord>, DatabaseError> {
        self.query_emails(
            &format!(
                "SELECT {EMAIL_COLUMNS} FROM emails ORDER BY created_at DESC, rowid DESC LIMIT ?1"
            ),
            params![limit as i64],
            "list_recent_emails",
        )
        .await
    }

    async fn list_emails_by_status(
        &self,
        status: ProcessingStatus,
        limit: usize,
    ) -> Result<Vec<EmailRecord>, DatabaseError> {
        self.query_emails(
            &format!(
                "SELECT {EMAIL_COLUMNS} FROM emails WHERE processing_status = ?1
                 ORDER BY created_at DESC, rowid DESC LIMIT ?2"
            ),
            params![status.as_str(), limit as i64],
            "list_emails_by_status",
        )
        .await
    }
}
