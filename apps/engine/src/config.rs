use anyhow::{Context, Result};

/// Every tunable scoring constant, in one place.
///
/// The defaults are the reference behavior; none of them derive from a formal
/// model, so tuning happens here rather than by forking scorer logic. A small
/// set of environment overrides is honored for the ones most often adjusted
/// in practice.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Default number of keyphrases requested when the caller passes an
    /// invalid `top_n`.
    pub top_n_default: usize,
    /// Hard upper bound on `top_n` to keep extraction memory-bounded.
    pub top_n_max: usize,
    /// Similarity (0–100) a phrase must reach against a taxonomy entry to be
    /// accepted as a fuzzy match.
    pub fuzzy_threshold: f64,
    /// When fewer canonical skills than this were matched, unmatched raw
    /// terms get promoted into the keyword set.
    pub min_matched_before_promotion: usize,
    /// Cap on promoted raw terms.
    pub max_promoted_raw_terms: usize,

    /// Keyword-Match: points per matched keyword and module cap.
    pub points_per_matched_keyword: u32,
    pub keyword_match_max: u32,

    /// Section-Completeness: module cap and deduction per missing section.
    pub section_max: u32,
    pub section_penalty: u32,

    /// Content-Quality module cap.
    pub content_quality_max: f64,

    /// Formatting module cap.
    pub formatting_max: f64,

    /// Context-Relevance module cap.
    pub context_max: f64,

    /// Total score above which a résumé counts as ATS-friendly.
    pub ats_friendly_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_n_default: 75,
            top_n_max: 200,
            fuzzy_threshold: 90.0,
            min_matched_before_promotion: 5,
            max_promoted_raw_terms: 10,
            points_per_matched_keyword: 5,
            keyword_match_max: 40,
            section_max: 15,
            section_penalty: 3,
            content_quality_max: 15.0,
            formatting_max: 15.0,
            context_max: 30.0,
            ats_friendly_threshold: 80.0,
        }
    }
}

impl EngineConfig {
    /// Defaults plus optional environment overrides (loads `.env` if present).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        if let Some(v) = optional_env("ENGINE_FUZZY_THRESHOLD")? {
            config.fuzzy_threshold = v;
        }
        if let Some(v) = optional_env("ENGINE_TOP_N_DEFAULT")? {
            config.top_n_default = v;
        }
        if let Some(v) = optional_env("ENGINE_ATS_FRIENDLY_THRESHOLD")? {
            config.ats_friendly_threshold = v;
        }
        Ok(config)
    }
}

fn optional_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Environment variable '{key}' is not a valid value")),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_constants() {
        let c = EngineConfig::default();
        assert_eq!(c.top_n_default, 75);
        assert_eq!(c.top_n_max, 200);
        assert_eq!(c.fuzzy_threshold, 90.0);
        assert_eq!(c.keyword_match_max, 40);
        assert_eq!(c.points_per_matched_keyword, 5);
        assert_eq!(c.context_max, 30.0);
    }

    #[test]
    fn test_module_caps_sum_to_full_score() {
        let c = EngineConfig::default();
        let total = c.keyword_match_max as f64
            + c.section_max as f64
            + c.content_quality_max
            + c.formatting_max
            + c.context_max;
        // 40 + 15 + 15 + 15 + 30
        assert_eq!(total, 115.0);
    }
}
