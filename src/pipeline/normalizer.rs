//! Canonical form of email text for matching.

use crate::error::ClassifyError;

/// Trim surrounding whitespace and lowercase the text.
///
/// Nothing else is touched: accents, punctuation and inner whitespace are
/// preserved so multi-word keywords still match.
pub fn normalize(raw: &str) -> Result<String, ClassifyError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClassifyError::empty_content());
    }
    Ok(trimmed.to_lowercase())
}
