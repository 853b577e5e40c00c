//! Keyword extractor — statistical keyphrase extraction (YAKE) with a
//! deterministic token fallback when the statistical path produces nothing.

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, warn};
use yake_rust::{get_n_best, Config, StopWords};

use crate::config::EngineConfig;

/// Phrases longer than this many words are discarded as extraction garbage.
const MAX_PHRASE_WORDS: usize = 3;
/// Accepted phrase length range in characters.
const MIN_PHRASE_CHARS: usize = 3;
const MAX_PHRASE_CHARS: usize = 25;
/// Minimum importance (`1 / (1 + yake_score)`) for a phrase to be kept.
const MIN_IMPORTANCE: f64 = 0.1;
/// YAKE asks for at most this many phrases regardless of `top_n` — beyond
/// this the tail is noise.
const MAX_STATISTICAL_PHRASES: usize = 50;

/// Stopwords for the fallback tokenizer. The statistical path carries its own
/// (larger) stopword list via `yake_rust::StopWords`.
const FALLBACK_STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "been", "but", "by", "can", "could", "did", "do",
    "does", "for", "from", "had", "has", "have", "he", "her", "his", "i", "if", "in", "into",
    "is", "it", "its", "may", "me", "my", "of", "on", "or", "our", "she", "should", "so", "than",
    "that", "the", "their", "them", "they", "this", "to", "was", "we", "were", "what", "when",
    "where", "which", "while", "who", "will", "with", "would", "you", "your",
];

/// Candidate-phrase extractor. Holds the stopword set so it is built once per
/// engine rather than per call.
pub struct KeywordExtractor {
    stopwords: StopWords,
}

impl KeywordExtractor {
    pub fn new() -> Self {
        let stopwords = StopWords::predefined("en")
            .unwrap_or_else(|| StopWords::custom(HashSet::new()));
        Self { stopwords }
    }

    /// Validates `top_n` into `[1, top_n_max]`, falling back to the default
    /// when zero is passed.
    pub fn validate_top_n(&self, top_n: usize, config: &EngineConfig) -> usize {
        if top_n == 0 {
            warn!(
                top_n,
                default = config.top_n_default,
                "Invalid top_n, using default"
            );
            return config.top_n_default;
        }
        top_n.min(config.top_n_max)
    }

    /// Extracts candidate phrases from already-normalized text.
    ///
    /// Deterministic for identical input and parameters. Empty input yields
    /// an empty set; a statistical path that produces nothing on non-empty
    /// input falls back to basic tokenization (recovered, logged, never an
    /// error).
    pub fn extract(&self, cleaned_text: &str, top_n: usize, config: &EngineConfig) -> BTreeSet<String> {
        if cleaned_text.is_empty() {
            return BTreeSet::new();
        }
        if cleaned_text.chars().count() < 10 {
            warn!("Input text is very short, results may be limited");
        }

        let top_n = self.validate_top_n(top_n, config);
        let phrases = self.extract_statistical(cleaned_text, top_n);
        if !phrases.is_empty() {
            debug!(phrases = phrases.len(), "Statistical extraction succeeded");
            return phrases;
        }

        warn!("Statistical extraction produced no phrases, using token fallback");
        fallback_tokens(cleaned_text)
    }

    /// Primary path: YAKE over 1–2 word windows with diversity-aware
    /// deduplication, filtered down to plausible skill phrases.
    fn extract_statistical(&self, text: &str, top_n: usize) -> BTreeSet<String> {
        let yake_config = Config {
            ngrams: 2,
            remove_duplicates: true,
            deduplication_threshold: 0.7,
            minimum_chars: MIN_PHRASE_CHARS,
            ..Config::default()
        };

        let results = get_n_best(
            top_n.min(MAX_STATISTICAL_PHRASES),
            text,
            &self.stopwords,
            &yake_config,
        );

        results
            .into_iter()
            .filter_map(|item| {
                // YAKE scores are lower-is-better; invert to an importance.
                let importance = 1.0 / (1.0 + item.score);
                let phrase = item.keyword.trim().to_lowercase();
                let char_count = phrase.chars().count();
                let keep = phrase.split_whitespace().count() <= MAX_PHRASE_WORDS
                    && (MIN_PHRASE_CHARS..=MAX_PHRASE_CHARS).contains(&char_count)
                    && !has_char_run(&phrase, 4)
                    && importance >= MIN_IMPORTANCE;
                keep.then_some(phrase)
            })
            .collect()
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Fallback path: keep non-stopword, non-punctuation tokens longer than two
/// characters.
fn fallback_tokens(text: &str) -> BTreeSet<String> {
    text.split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|t| t.chars().count() > 2)
        .filter(|t| t.chars().any(|c| c.is_alphanumeric()))
        .filter(|t| !FALLBACK_STOPWORDS.contains(&t.as_str()))
        .collect()
}

/// True when any character repeats `run` or more times consecutively
/// ("aaaa" — a reliable extraction-garbage signal).
fn has_char_run(text: &str, run: usize) -> bool {
    let mut count = 0;
    let mut previous = None;
    for c in text.chars() {
        if Some(c) == previous {
            count += 1;
            if count >= run {
                return true;
            }
        } else {
            previous = Some(c);
            count = 1;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "senior software engineer with python and machine learning experience \
                          building distributed systems and data pipelines in production";

    #[test]
    fn test_empty_text_yields_empty_set() {
        let extractor = KeywordExtractor::new();
        assert!(extractor.extract("", 75, &EngineConfig::default()).is_empty());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let extractor = KeywordExtractor::new();
        let config = EngineConfig::default();
        let first = extractor.extract(SAMPLE, 75, &config);
        let second = extractor.extract(SAMPLE, 75, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_extracted_phrases_respect_filters() {
        let extractor = KeywordExtractor::new();
        let phrases = extractor.extract(SAMPLE, 75, &EngineConfig::default());
        assert!(!phrases.is_empty());
        for phrase in &phrases {
            assert!(phrase.split_whitespace().count() <= MAX_PHRASE_WORDS);
            let chars = phrase.chars().count();
            assert!((MIN_PHRASE_CHARS..=MAX_PHRASE_CHARS).contains(&chars), "{phrase}");
            assert!(!has_char_run(phrase, 4), "{phrase}");
        }
    }

    #[test]
    fn test_invalid_top_n_uses_default() {
        let extractor = KeywordExtractor::new();
        let config = EngineConfig::default();
        assert_eq!(extractor.validate_top_n(0, &config), config.top_n_default);
    }

    #[test]
    fn test_oversized_top_n_is_clamped() {
        let extractor = KeywordExtractor::new();
        let config = EngineConfig::default();
        assert_eq!(extractor.validate_top_n(10_000, &config), config.top_n_max);
    }

    #[test]
    fn test_fallback_tokens_drop_stopwords_and_short_tokens() {
        let tokens = fallback_tokens("the quick brown fox is in it");
        assert!(tokens.contains("quick"));
        assert!(tokens.contains("brown"));
        assert!(!tokens.contains("the"));
        assert!(!tokens.contains("is"));
        assert!(!tokens.contains("it"));
    }

    #[test]
    fn test_char_run_detection() {
        assert!(has_char_run("aaaa", 4));
        assert!(has_char_run("xaaaax", 4));
        assert!(!has_char_run("aaa", 4));
        assert!(!has_char_run("banana", 4));
    }
}
