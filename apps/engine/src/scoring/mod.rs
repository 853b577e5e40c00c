//! The five independent scoring modules plus the aggregator.
//!
//! Every module returns a [`ModuleScore`] clamped to its own maximum; the
//! aggregator sums them without re-clamping. Modules share no mutable state
//! and are pure functions over immutable inputs, so the engine runs them in
//! parallel.

pub mod completeness;
pub mod content_quality;
pub mod context_relevance;
pub mod formatting;
pub mod keyword_match;
pub mod report;

use serde::{Deserialize, Serialize};

/// One scoring module's output: a bounded score plus feedback ordered from
/// most to least important.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleScore {
    pub score: f64,
    pub max: f64,
    pub short_feedback: Vec<String>,
    pub long_feedback: Vec<String>,
}

impl ModuleScore {
    /// Clamps `score` into `[0, max]` — every constructor path goes through
    /// here so the boundedness invariant holds by construction.
    pub fn new(score: f64, max: f64, short_feedback: Vec<String>, long_feedback: Vec<String>) -> Self {
        Self {
            score: score.clamp(0.0, max),
            max,
            short_feedback,
            long_feedback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_is_clamped_to_module_max() {
        let s = ModuleScore::new(99.0, 40.0, vec![], vec![]);
        assert_eq!(s.score, 40.0);
    }

    #[test]
    fn test_negative_score_floors_at_zero() {
        let s = ModuleScore::new(-3.0, 15.0, vec![], vec![]);
        assert_eq!(s.score, 0.0);
    }

    #[test]
    fn test_in_range_score_unchanged() {
        let s = ModuleScore::new(12.5, 30.0, vec![], vec![]);
        assert_eq!(s.score, 12.5);
    }
}
