//! Classification pipeline: normalize, score, decide, respond.
//!
//! Pure and synchronous: no I/O, no shared mutable state. Safe to call from
//! any number of request handlers at once.

use tracing::debug;

use crate::error::ClassifyError;
use crate::pipeline::decision::decide;
use crate::pipeline::keywords::KeywordDictionary;
use crate::pipeline::normalizer::normalize;
use crate::pipeline::response::generate;
use crate::pipeline::rules::StructuralHeuristics;
use crate::pipeline::types::{Category, ClassificationResult, EmailContent, ScoreState};

/// Email classifier built from the fixed dictionaries and structural rules.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationPipeline {
    productive: KeywordDictionary,
    unproductive: KeywordDictionary,
    heuristics: &'static StructuralHeuristics,
}

impl Default for ClassificationPipeline {
    fn default() -> Self {
        Self {
            productive: KeywordDictionary::for_category(Category::Productive),
            unproductive: KeywordDictionary::for_category(Category::Unproductive),
            heuristics: StructuralHeuristics::standard(),
        }
    }
}

impl ClassificationPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute both scores for raw text.
    pub fn score(&self, raw: &str) -> Result<ScoreState, ClassifyError> {
        let text = normalize(raw)?;

        let productive: Vec<&'static str> = self.productive.matches(&text).collect();
        let unproductive: Vec<&'static str> = self.unproductive.matches(&text).collect();
        let mut scores = ScoreState {
            productive: productive.len() as u32,
            unproductive: unproductive.len() as u32,
            matched_keywords: productive.into_iter().chain(unproductive).collect(),
            fired_rules: Vec::new(),
        };

        self.heuristics.apply(&text, &mut scores);
        Ok(scores)
    }

    /// Classify one email.
    pub fn classify(&self, content: &EmailContent) -> Result<ClassificationResult, ClassifyError> {
        let scores = self.score(content.text())?;
        let category = decide(scores.productive, scores.unproductive);

        debug!(
            category = %category,
            productive = scores.productive,
            unproductive = scores.unproductive,
            keywords = ?scores.matched_keywords,
            rules = ?scores.fired_rules,
            "Email classified"
        );

        Ok(generate(category, scores.productive, scores.unproductive))
    }
}
