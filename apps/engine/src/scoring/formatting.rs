//! Formatting scorer — operates on already-parsed file facts (filename,
//! fonts, tables, images, header/footer text) plus the raw extracted text,
//! never on raw bytes. Binary parsing belongs to the upstream collaborator.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::scoring::ModuleScore;

// ATS-breaking issues carry the large deduction; cosmetic ones the small.
const STRUCTURAL_DEDUCTION: f64 = 5.0;
const COSMETIC_DEDUCTION: f64 = 1.0;

/// Fonts ATS parsers handle reliably.
const STANDARD_FONTS: &[&str] = &["arial", "calibri", "times new roman", "helvetica", "georgia"];

/// Filename stems too generic to identify a candidate.
const GENERIC_FILENAME_STEMS: &[&str] = &["resume", "cv", "document", "untitled", "new", "final"];

static SIMPLE_FILENAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_\-]+\.(?i:pdf|docx)$").unwrap());
static MONTH_YEAR_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+\d{4}\b").unwrap());
static SLASH_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{1,2}/\d{4}\b").unwrap());
static DOTTED_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{1,2}\.\d{1,2}\.\d{4}\b").unwrap());
static DASHED_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{1,2}-\d{1,2}-\d{4}\b").unwrap());

/// Already-parsed formatting facts about the uploaded file, supplied by the
/// collaborator that did the binary parsing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileFacts {
    pub filename: String,
    /// Font family names observed in the document.
    #[serde(default)]
    pub fonts: Vec<String>,
    #[serde(default)]
    pub has_tables: bool,
    #[serde(default)]
    pub image_count: usize,
    /// Concatenated text found in header/footer regions, if any.
    #[serde(default)]
    pub header_footer_text: Option<String>,
}

pub fn score(facts: Option<&FileFacts>, resume_text: &str, config: &EngineConfig) -> ModuleScore {
    let max = config.formatting_max;

    let Some(facts) = facts else {
        // Skipped module: zero score with a distinct message, never a silent
        // omission.
        return ModuleScore::new(
            0.0,
            max,
            vec!["Formatting was not evaluated (no file metadata provided).".to_string()],
            vec![],
        );
    };

    let mut deductions = 0.0;
    let mut short_feedback = Vec::new();
    let mut long_feedback = Vec::new();

    // Filename hygiene.
    if !SIMPLE_FILENAME.is_match(&facts.filename) {
        deductions += COSMETIC_DEDUCTION;
        short_feedback.push(
            "Rename your file using only letters, numbers, underscores, or dashes (e.g. \
             jane_doe_resume.pdf)."
                .to_string(),
        );
    } else {
        let stem = facts
            .filename
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&facts.filename)
            .to_lowercase();
        if GENERIC_FILENAME_STEMS.contains(&stem.as_str()) || stem.chars().count() < 5 {
            deductions += COSMETIC_DEDUCTION;
            short_feedback.push(
                "Use a descriptive filename that includes your name, not a generic one like \
                 'resume.pdf'."
                    .to_string(),
            );
        }
    }

    // Non-standard fonts.
    let nonstandard: Vec<&str> = facts
        .fonts
        .iter()
        .map(String::as_str)
        .filter(|font| {
            let lower = font.to_lowercase();
            !STANDARD_FONTS.iter().any(|std| lower.contains(std))
        })
        .collect();
    if !nonstandard.is_empty() {
        deductions += STRUCTURAL_DEDUCTION;
        short_feedback.push(
            "Use standard fonts like Arial, Calibri, or Times New Roman for better ATS \
             compatibility."
                .to_string(),
        );
        long_feedback.push(format!(
            "Non-standard fonts detected: {}. ATS parsers can garble or drop text in decorative \
             fonts.",
            nonstandard.join(", ")
        ));
    }

    if facts.has_tables {
        deductions += STRUCTURAL_DEDUCTION;
        short_feedback
            .push("Avoid tables; ATS tools often can't read text inside them.".to_string());
    }

    if facts.image_count > 0 {
        deductions += STRUCTURAL_DEDUCTION;
        short_feedback.push(
            "Avoid images; ATS systems don't parse them and may skip important info.".to_string(),
        );
    }

    // Paragraph length outliers in the extracted text.
    let long_paragraphs = resume_text
        .split('\n')
        .filter(|p| p.split_whitespace().count() > 40)
        .count();
    if long_paragraphs > 0 {
        deductions += COSMETIC_DEDUCTION;
        short_feedback
            .push("Break long paragraphs into bulleted points for improved readability.".to_string());
    }

    // Inconsistent date formatting.
    if has_inconsistent_dates(resume_text) {
        deductions += COSMETIC_DEDUCTION;
        short_feedback
            .push("Unify your date formats (e.g. Jan 2020 - Mar 2022).".to_string());
    }

    // Content in header/footer regions.
    if facts
        .header_footer_text
        .as_deref()
        .is_some_and(|t| !t.trim().is_empty())
    {
        deductions += COSMETIC_DEDUCTION;
        short_feedback.push(
            "Important content should be in the body; ATS may skip headers and footers."
                .to_string(),
        );
    }

    let final_score = (max - deductions).max(0.0);
    short_feedback.insert(0, headline(final_score, max).to_string());

    ModuleScore::new(final_score, max, short_feedback, long_feedback)
}

/// Tiered headline keyed to the resulting score band.
fn headline(score: f64, max: f64) -> &'static str {
    if score >= max - 2.0 {
        "Well done! Your resume formatting is clean and ATS-friendly."
    } else if score >= max * 0.5 {
        "Your formatting is mostly ATS-friendly, with a few fixes to make."
    } else {
        "Your formatting needs attention before an ATS can read it reliably."
    }
}

/// True when the text mixes date styles (month-name vs numeric) or uses
/// formats outside the accepted set (dotted or day-level dashed dates).
fn has_inconsistent_dates(text: &str) -> bool {
    if DOTTED_DATE.is_match(text) || DASHED_DATE.is_match(text) {
        return true;
    }
    let styles = [&MONTH_YEAR_DATE, &SLASH_DATE]
        .iter()
        .filter(|re| re.is_match(text))
        .count();
    styles >= 2
}
