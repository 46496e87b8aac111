//! Shared types for the classification pipeline.

use serde::{Deserialize, Serialize};

use crate::error::ClassifyError;

// ── Email content ───────────────────────────────────────────────────

/// Raw email text submitted for classification.
///
/// Constructed per request and dropped once a result exists. The text is
/// guaranteed non-blank; the filename is carried along untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    text: String,
    filename: Option<String>,
}

impl EmailContent {
    /// Build email content, rejecting empty or whitespace-only text.
    pub fn new(
        text: impl Into<String>,
        filename: Option<String>,
    ) -> Result<Self, ClassifyError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ClassifyError::empty_content());
        }
        Ok(Self { text, filename })
    }

    /// The raw text as submitted.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Opaque upload name, if the text came from a file.
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }
}

// ── Category ────────────────────────────────────────────────────────

/// The two fixed triage outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Warrants business action.
    #[serde(rename = "Produtivo")]
    Productive,
    /// Promotional, spam or otherwise low priority.
    #[serde(rename = "Improdutivo")]
    Unproductive,
}

impl Category {
    /// Wire label, as stored and returned to callers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Productive => "Produtivo",
            Self::Unproductive => "Improdutivo",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Produtivo" => Ok(Self::Productive),
            "Improdutivo" => Ok(Self::Unproductive),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

// ── Scores ──────────────────────────────────────────────────────────

/// Accumulated evidence for each category.
///
/// Scores only ever grow. The matched keyword and rule names are kept for
/// logging; the decision reads the two integers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub productive: u32,
    pub unproductive: u32,
    pub matched_keywords: Vec<&'static str>,
    pub fired_rules: Vec<&'static str>,
}

impl ScoreState {
    pub fn new(productive: u32, unproductive: u32) -> Self {
        Self {
            productive,
            unproductive,
            ..Self::default()
        }
    }

    /// Add `delta` to the score for `target`.
    pub fn boost(&mut self, target: Category, delta: u32) {
        match target {
            Category::Productive => self.productive += delta,
            Category::Unproductive => self.unproductive += delta,
        }
    }
}

// ── Result ──────────────────────────────────────────────────────────

/// Outcome of classifying one email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    pub suggested_response: String,
    pub reasoning: String,
}
