//! Aggregator — sums the module scores into a total and assembles the
//! external report shape.
//!
//! The JSON layout (keys `total`, `missingkeywords`, `sections`,
//! `formatting`, `content quality`, `context`) is a compatibility surface for
//! the collaborating service; field names are locked by serde attributes.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::scoring::keyword_match::KeywordMatchOutcome;
use crate::scoring::ModuleScore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub total: TotalComponent,
    #[serde(rename = "missingkeywords")]
    pub missing_keywords: KeywordComponent,
    pub sections: ModuleComponent,
    pub formatting: ModuleComponent,
    #[serde(rename = "content quality")]
    pub content_quality: ModuleComponent,
    pub context: ModuleComponent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalComponent {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub score: f64,
    pub suggestions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordComponent {
    #[serde(rename = "type")]
    pub kind: String,
    pub score: f64,
    pub missing_keywords: Vec<String>,
    pub short_suggestions: Vec<String>,
    pub long_suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleComponent {
    #[serde(rename = "type")]
    pub kind: String,
    pub score: f64,
    pub short_suggestions: Vec<String>,
    pub long_suggestions: Vec<String>,
}

impl ModuleComponent {
    fn from_module(kind: &str, module: ModuleScore) -> Self {
        Self {
            kind: kind.to_string(),
            score: module.score,
            short_suggestions: module.short_feedback,
            long_suggestions: module.long_feedback,
        }
    }
}

/// Sums the five module scores and assembles the report. Module scores are
/// already clamped by their own constructors; the total is their plain sum.
pub fn assemble(
    keyword: KeywordMatchOutcome,
    sections: ModuleScore,
    content_quality: ModuleScore,
    formatting: ModuleScore,
    context: ModuleScore,
    config: &EngineConfig,
) -> Report {
    let total_score = keyword.module.score
        + sections.score
        + content_quality.score
        + formatting.score
        + context.score;

    Report {
        total: TotalComponent {
            key: "total".to_string(),
            kind: "Total ATS score".to_string(),
            score: total_score,
            suggestions: format!(
                "Resumes are considered ATS-friendly if the score is greater than {}.",
                config.ats_friendly_threshold
            ),
        },
        missing_keywords: KeywordComponent {
            kind: "keyword match".to_string(),
            score: keyword.module.score,
            missing_keywords: keyword.missing_technical,
            short_suggestions: keyword.module.short_feedback,
            long_suggestions: keyword.module.long_feedback,
        },
        sections: ModuleComponent::from_module("standard section match", sections),
        formatting: ModuleComponent::from_module("formatting match", formatting),
        content_quality: ModuleComponent::from_module("content quality", content_quality),
        context: ModuleComponent::from_module("context or relevance", context),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(score: f64, max: f64) -> ModuleScore {
        ModuleScore::new(score, max, vec!["short".to_string()], vec![])
    }

    fn keyword_outcome(score: f64) -> KeywordMatchOutcome {
        KeywordMatchOutcome {
            module: ModuleScore::new(score, 40.0, vec![], vec![]),
            matched: vec!["python".to_string()],
            missing_technical: vec!["kafka".to_string()],
        }
    }

    #[test]
    fn test_total_is_sum_of_module_scores() {
        let report = assemble(
            keyword_outcome(20.0),
            module(12.0, 15.0),
            module(10.0, 15.0),
            module(14.0, 15.0),
            module(21.5, 30.0),
            &EngineConfig::default(),
        );
        assert_eq!(report.total.score, 77.5);
        assert_eq!(report.missing_keywords.score, 20.0);
    }

    #[test]
    fn test_external_json_keys_are_stable() {
        let report = assemble(
            keyword_outcome(5.0),
            module(3.0, 15.0),
            module(3.0, 15.0),
            module(3.0, 15.0),
            module(3.0, 30.0),
            &EngineConfig::default(),
        );
        let json = serde_json::to_value(&report).unwrap();
        for key in [
            "total",
            "missingkeywords",
            "sections",
            "formatting",
            "content quality",
            "context",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(json["total"]["type"], "Total ATS score");
        assert_eq!(json["missingkeywords"]["missing_keywords"][0], "kafka");
        assert_eq!(json["context"]["type"], "context or relevance");
    }

    #[test]
    fn test_module_kinds_match_compatibility_surface() {
        let report = assemble(
            keyword_outcome(0.0),
            module(0.0, 15.0),
            module(0.0, 15.0),
            module(0.0, 15.0),
            module(0.0, 30.0),
            &EngineConfig::default(),
        );
        assert_eq!(report.missing_keywords.kind, "keyword match");
        assert_eq!(report.sections.kind, "standard section match");
        assert_eq!(report.formatting.kind, "formatting match");
        assert_eq!(report.content_quality.kind, "content quality");
    }
}
