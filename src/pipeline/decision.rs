//! Final category decision from the two scores.

use crate::pipeline::types::Category;

/// Minimum productive score that wins outright when no unproductive signal exists.
pub const UNCONTESTED_PRODUCTIVE_MIN: u32 = 2;

/// Decide the category.
///
/// Productive when it strictly outscores unproductive, or when it reaches
/// [`UNCONTESTED_PRODUCTIVE_MIN`] with no unproductive evidence at all.
/// Everything else, including 0/0, is unproductive.
pub fn decide(productive: u32, unproductive: u32) -> Category {
    let is_productive = productive > unproductive
        || (productive >= UNCONTESTED_PRODUCTIVE_MIN && unproductive == 0);

    if is_productive {
        Category::Productive
    } else {
        Category::Unproductive
    }
}
