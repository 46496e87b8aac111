//! Email processor: runs the classification pipeline and records each
//! email's lifecycle in the record store.
//!
//! Flow per request:
//! 1. Validate content (blank → `ClassifyError::Validation`, nothing stored)
//! 2. Insert the record as `processing`
//! 3. Classify (pure, no I/O)
//! 4. Store the result and mark `completed`
//!
//! Insert and update are separate writes. If the completing update fails the
//! processor tries to mark the record `error`; if that write fails too the
//! record stays in `processing` and shows up in [`EmailProcessor::stuck`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::ClassifyError;
use crate::pipeline::classifier::ClassificationPipeline;
use crate::pipeline::types::{ClassificationResult, EmailContent};
use crate::store::traits::{EmailRecord, EmailStore, ProcessingStatus};

/// Default number of records returned by listing calls.
pub const DEFAULT_RECENT_LIMIT: usize = 50;

/// A classification tied to the stored record it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedEmail {
    pub id: String,
    #[serde(flatten)]
    pub result: ClassificationResult,
}

/// Orchestrates classification and persistence for incoming emails.
pub struct EmailProcessor {
    store: Arc<dyn EmailStore>,
    pipeline: ClassificationPipeline,
    recent_limit: usize,
}

impl EmailProcessor {
    /// Create a processor over the given store.
    pub fn new(store: Arc<dyn EmailStore>) -> Self {
        Self {
            store,
            pipeline: ClassificationPipeline::new(),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    /// Override how many records listing calls return.
    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    /// Classify one email and persist the outcome.
    pub async fn process(
        &self,
        content: &str,
        filename: Option<String>,
    ) -> Result<ClassifiedEmail, ClassifyError> {
        let email = EmailContent::new(content, filename)?;

        let record = self
            .store
            .create_email(email.text(), email.filename(), ProcessingStatus::Processing)
            .await?;

        info!(
            id = %record.id,
            filename = email.filename().unwrap_or("-"),
            "Processing email"
        );

        let result = match self.pipeline.classify(&email) {
            Ok(result) => result,
            Err(e) => {
                self.record_failure(&record.id, &e.to_string()).await;
                return Err(e);
            }
        };

        if let Err(e) = self.store.complete_email(&record.id, &result).await {
            error!(id = %record.id, error = %e, "Failed to store classification");
            self.record_failure(&record.id, &format!("Failed to update email record: {e}"))
                .await;
            return Err(e.into());
        }

        info!(id = %record.id, category = %result.category, "Email classified");

        Ok(ClassifiedEmail {
            id: record.id,
            result,
        })
    }

    /// Best-effort transition to `error`. A failure here leaves the record in `processing`.
    async fn record_failure(&self, id: &str, message: &str) {
        if let Err(e) = self.store.fail_email(id, message).await {
            warn!(
                id = id,
                error = %e,
                "Could not mark email as failed; record left in processing"
            );
        }
    }

    /// Fetch a single stored email.
    pub async fn get(&self, id: &str) -> Result<Option<EmailRecord>, ClassifyError> {
        Ok(self.store.get_email(id).await?)
    }

    /// Most recent emails, newest first.
    pub async fn recent(&self) -> Result<Vec<EmailRecord>, ClassifyError> {
        Ok(self.store.list_recent_emails(self.recent_limit).await?)
    }

    /// Emails still marked `processing`, i.e. never completed nor failed.
    pub async fn stuck(&self) -> Result<Vec<EmailRecord>, ClassifyError> {
        Ok(self
            .store
            .list_emails_by_status(ProcessingStatus::Processing, self.recent_limit)
            .await?)
    }
}
