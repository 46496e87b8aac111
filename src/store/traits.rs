//! `EmailStore` trait: single async interface for email record persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DatabaseError;
use crate::pipeline::types::{Category, ClassificationResult};

/// Lifecycle state of a persisted email.
///
/// `pending → processing → completed`, or `→ error` when classification
/// or a storage step fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    /// Stored, not yet picked up.
    #[default]
    Pending,
    /// Classification in flight, or interrupted before completion was recorded.
    Processing,
    /// Classification stored.
    Completed,
    /// Classification or storage failed; see `error_message`.
    Error,
}

impl ProcessingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }
}

impl std::str::FromStr for ProcessingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown processing status: {other}")),
        }
    }
}

/// A persisted email and its classification outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailRecord {
    pub id: String,
    pub content: String,
    pub filename: Option<String>,
    pub category: Option<Category>,
    pub suggested_response: Option<String>,
    pub processing_status: ProcessingStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

/// Backend-agnostic record store for classified emails.
#[async_trait]
pub trait EmailStore: Send + Sync {
    /// Run all pending schema migrations.
    async fn init_schema(&self) -> Result<(), DatabaseError>;

    /// Insert a new email with the given initial status. Returns the stored record.
    async fn create_email(
        &self,
        content: &str,
        filename: Option<&str>,
        status: ProcessingStatus,
    ) -> Result<EmailRecord, DatabaseError>;

    /// Record a successful classification and mark the email completed.
    async fn complete_email(
        &self,
        id: &str,
        result: &ClassificationResult,
    ) -> Result<(), DatabaseError>;

    /// Mark an email as failed with a message.
    async fn fail_email(&self, id: &str, message: &str) -> Result<(), DatabaseError>;

    /// Get an email by ID.
    async fn get_email(&self, id: &str) -> Result<Option<EmailRecord>, DatabaseError>;

    /// Most recent emails first, up to `limit`.
    async fn list_recent_emails(&self, limit: usize) -> Result<Vec<EmailRecord>, DatabaseError>;

    /// Emails in a given status, most recent first, up to `limit`.
    async fn list_emails_by_status(
        &self,
        status: ProcessingStatus,
        limit: usize,
    ) -> Result<Vec<EmailRecord>, DatabaseError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            ProcessingStatus::Pending,
            ProcessingStatus::Processing,
            ProcessingStatus::Completed,
            ProcessingStatus::Error,
        ] {
            assert_eq!(status.as_str().parse::<ProcessingStatus>(), Ok(status));
        }
        assert!("done".parse::<ProcessingStatus>().is_err());
    }

    #[test]
    fn record_serializes_with_wire_names() {
        let record = EmailRecord {
            id: "abc".into(),
            content: "hello".into(),
            filename: None,
            category: Some(Category::Unproductive),
            suggested_response: Some("reply".into()),
            processing_status: ProcessingStatus::Completed,
            error_message: None,
            created_at: Utc::now(),
            processed_at: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["processing_status"], "completed");
        assert_eq!(json["category"], "Improdutivo");
        assert!(json["filename"].is_null());
        assert!(json["created_at"].is_string());
    }
}
