//! Structural heuristics applied on top of keyword scores.
//!
//! Three independent pattern checks run against the normalized text:
//! - formal business structure (subject markers, greetings, closings) → +2 productive
//! - explicit action requests → +2 productive
//! - spam markers (exclamation runs, call-to-action verbs) → +3 unproductive
//!
//! Any combination may fire on the same email; deltas simply add up.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::pipeline::types::{Category, ScoreState};

/// Boost for a formal business layout.
pub const BUSINESS_STRUCTURE_BOOST: u32 = 2;

/// Boost for an explicit request or need.
pub const ACTION_REQUEST_BOOST: u32 = 2;

/// Boost for spam markers.
pub const SPAM_INDICATOR_BOOST: u32 = 3;

/// A single structural rule with a compiled regex.
#[derive(Debug, Clone)]
pub struct StructuralRule {
    /// Short rule name, used in logs.
    pub name: &'static str,
    /// Compiled regex, matched anywhere in the normalized text.
    pub regex: Regex,
    /// Which score the rule feeds.
    pub target: Category,
    /// Amount added when the rule matches.
    pub delta: u32,
}

impl StructuralRule {
    fn new(name: &'static str, pattern: &str, target: Category, delta: u32) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("structural rule pattern must compile"),
            target,
            delta,
        }
    }
}

static DEFAULT_RULES: LazyLock<StructuralHeuristics> =
    LazyLock::new(StructuralHeuristics::build_default);

/// Pattern-based score adjustments independent of keyword presence.
#[derive(Debug, Clone)]
pub struct StructuralHeuristics {
    rules: Vec<StructuralRule>,
}

impl StructuralHeuristics {
    /// Shared instance with the three standard rules, compiled once.
    pub fn standard() -> &'static Self {
        &DEFAULT_RULES
    }

    fn build_default() -> Self {
        let rules = vec![
            StructuralRule::new(
                "business_structure",
                r"assunto:|subject:|prezado|caro|atenciosamente|cordialmente|dear|sincerely",
                Category::Productive,
                BUSINESS_STRUCTURE_BOOST,
            ),
            StructuralRule::new(
                "action_request",
                r"favor|por favor|necessário|preciso|solicito|please|need|request",
                Category::Productive,
                ACTION_REQUEST_BOOST,
            ),
            // Literal "$$$"
            StructuralRule::new(
                "spam_indicators",
                r"!!!|clique|click|\$\$\$|compre|buy",
                Category::Unproductive,
                SPAM_INDICATOR_BOOST,
            ),
        ];

        Self { rules }
    }

    /// Create a heuristics set with no rules (for testing).
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rules(&self) -> &[StructuralRule] {
        &self.rules
    }

    /// Apply every matching rule to `scores`, recording the rule names in
    /// `scores.fired_rules`.
    pub fn apply(&self, text: &str, scores: &mut ScoreState) {
        for rule in &self.rules {
            if rule.regex.is_match(text) {
                debug!(
                    rule = rule.name,
                    target = %rule.target,
                    delta = rule.delta,
                    "Structural rule matched"
                );
                scores.boost(rule.target, rule.delta);
                scores.fired_rules.push(rule.name);
            }
        }
    }
}
