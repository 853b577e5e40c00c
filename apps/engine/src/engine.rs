//! The engine context object — taxonomy, extractor, and configuration,
//! constructed once at process start and injected by reference wherever
//! scoring happens. Construction fails fast on a bad taxonomy instead of
//! deferring the surprise to the first request.

use std::collections::BTreeSet;

use tracing::debug;

use crate::config::EngineConfig;
use crate::errors::EngineError;
use crate::nlp::extract::KeywordExtractor;
use crate::nlp::matcher::canonicalize;
use crate::nlp::normalize::normalize;
use crate::nlp::sections::segment;
use crate::scoring::formatting::FileFacts;
use crate::scoring::report::{assemble, Report};
use crate::scoring::{completeness, content_quality, context_relevance, formatting, keyword_match};
use crate::taxonomy::Taxonomy;

/// Canonical skill names plus promoted raw terms for one document.
pub type KeywordSet = BTreeSet<String>;

/// Everything the scoring pipeline needs, immutable after construction.
/// `Send + Sync`; share one instance across threads.
pub struct Engine {
    taxonomy: Taxonomy,
    extractor: KeywordExtractor,
    config: EngineConfig,
}

impl Engine {
    /// Builds an engine over the embedded skill dataset.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Ok(Self::with_taxonomy(Taxonomy::embedded()?, config))
    }

    /// Builds an engine over a caller-supplied taxonomy (already validated
    /// non-empty by `Taxonomy`'s constructors).
    pub fn with_taxonomy(taxonomy: Taxonomy, config: EngineConfig) -> Self {
        Self {
            taxonomy,
            extractor: KeywordExtractor::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Extracts the canonical/raw keyword set for one document.
    ///
    /// Pipeline: normalize, extract candidate phrases, canonicalize each
    /// against the taxonomy. Phrases with no taxonomy match are kept as raw
    /// terms; when fewer canonical skills than
    /// `config.min_matched_before_promotion` were found, a bounded number of
    /// raw terms is promoted so niche vocabularies don't produce empty sets.
    ///
    /// Deterministic for identical input and parameters; empty text yields an
    /// empty set.
    pub fn extract_keywords(&self, text: &str, top_n: usize) -> KeywordSet {
        let cleaned = normalize(text);
        if cleaned.is_empty() {
            return KeywordSet::new();
        }

        let candidates = self.extractor.extract(&cleaned, top_n, &self.config);

        let mut matched = KeywordSet::new();
        let mut raw_terms = KeywordSet::new();
        for phrase in candidates {
            match canonicalize(&phrase, &self.taxonomy, self.config.fuzzy_threshold) {
                Some(canonical) => {
                    matched.insert(canonical);
                }
                None => {
                    raw_terms.insert(phrase);
                }
            }
        }
        debug!(
            matched = matched.len(),
            unmatched = raw_terms.len(),
            "Canonicalization finished"
        );

        if matched.len() < self.config.min_matched_before_promotion {
            for term in raw_terms
                .into_iter()
                .take(self.config.max_promoted_raw_terms)
            {
                matched.insert(term);
            }
        }

        matched
    }

    /// Runs the full pipeline: both keyword sets, résumé segmentation, the
    /// five scorers in parallel over immutable borrows, then aggregation.
    ///
    /// `file` carries already-parsed formatting facts; when absent the
    /// Formatting module reports itself as not evaluated rather than being
    /// silently omitted.
    pub fn score_resume(
        &self,
        resume_text: &str,
        job_text: &str,
        file: Option<&FileFacts>,
    ) -> Report {
        let top_n = self.config.top_n_default;
        let resume_keywords = self.extract_keywords(resume_text, top_n);
        let jd_keywords = self.extract_keywords(job_text, top_n);
        let sections = segment(resume_text);

        let config = &self.config;
        let (keyword, (section_score, (quality, (format_score, context)))) = rayon::join(
            || keyword_match::score(&resume_keywords, &jd_keywords, config),
            || {
                rayon::join(
                    || completeness::score(&sections, config),
                    || {
                        rayon::join(
                            || content_quality::score(resume_text, config),
                            || {
                                rayon::join(
                                    || formatting::score(file, resume_text, config),
                                    || context_relevance::score(&sections, &jd_keywords, config),
                                )
                            },
                        )
                    },
                )
            },
        );

        assemble(keyword, section_score, quality, format_score, context, config)
    }
}
