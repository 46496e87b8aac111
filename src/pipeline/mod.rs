//! Email classification pipeline.
//!
//! Every submitted email flows through:
//! 1. `normalizer::normalize()`: trim and lowercase (blank text is rejected)
//! 2. `KeywordDictionary::score()`: distinct productive / unproductive phrases
//! 3. `StructuralHeuristics::apply()`: formal structure, requests, spam markers
//! 4. `decision::decide()`: pick the category from the two scores
//! 5. `response::generate()`: reply template plus reasoning
//!
//! `ClassificationPipeline` runs steps 1-5 as a pure function.
//! `EmailProcessor` wraps it with record persistence.

pub mod classifier;
pub mod decision;
pub mod keywords;
pub mod normalizer;
pub mod processor;
pub mod response;
pub mod rules;
pub mod types;

pub use classifier::ClassificationPipeline;
pub use processor::{ClassifiedEmail, EmailProcessor};
pub use types::{Category, ClassificationResult, EmailContent, ScoreState};
