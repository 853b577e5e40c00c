//! Text normalizer — repairs the artifacts that PDF/DOCX text extraction
//! leaves behind before any keyword extraction runs.

use once_cell::sync::Lazy;
use regex::Regex;

/// Words frequently found fused to their neighbors in extracted text
/// ("experienceandskills"). A space is inserted around them when they appear
/// glued between two letters.
const COMMON_FUSED_WORDS: &[&str] = &[
    "and", "the", "with", "for", "from", "that", "this", "have", "will", "should", "would",
    "could",
];

static CAMEL_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z])([A-Z])").unwrap());
static LETTER_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-zA-Z])(\d)").unwrap());
static DIGIT_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d)([a-zA-Z])").unwrap());
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s.\-]").unwrap());
static DOT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{2,}").unwrap());
static DASH_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static FUSED_WORD_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    COMMON_FUSED_WORDS
        .iter()
        .map(|word| Regex::new(&format!(r"(?i)([a-z])({word})([a-z])")).unwrap())
        .collect()
});

/// Cleans raw extracted text: camel-case splits, letter/digit spacing,
/// fused-word repair, punctuation stripping, run collapsing, and length
/// filtering. Returns lower-cased, whitespace-collapsed text; empty input
/// yields an empty string, never an error.
pub fn normalize(text: &str) -> String {
    let mut text = CAMEL_BOUNDARY.replace_all(text, "$1 $2").into_owned();
    text = LETTER_DIGIT.replace_all(&text, "$1 $2").into_owned();
    text = DIGIT_LETTER.replace_all(&text, "$1 $2").into_owned();

    for pattern in FUSED_WORD_PATTERNS.iter() {
        text = pattern.replace_all(&text, "$1 $2 $3").into_owned();
    }

    text = NON_WORD.replace_all(&text, " ").into_owned();
    text = DOT_RUN.replace_all(&text, " ").into_owned();
    text = DASH_RUN.replace_all(&text, " ").into_owned();
    text = WHITESPACE.replace_all(&text, " ").into_owned();

    let filtered: Vec<&str> = text
        .split_whitespace()
        .map(|word| word.trim_matches(|c| c == '.' || c == '-' || c == '_'))
        .filter(|word| {
            let len = word.chars().count();
            (2..=30).contains(&len)
        })
        .collect();

    filtered.join(" ").to_lowercase().trim().to_string()
}
