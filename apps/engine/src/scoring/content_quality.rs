//! Content-Quality scorer — six independent sub-checks over the raw résumé
//! text (quantified achievements, action verbs, placeholder text, clarity,
//! bullet structure, professional tone).
//!
//! Each sub-check contributes an isolated deduction and may record positive
//! findings; the module sums deductions, subtracts from its max, and floors
//! at zero. Sub-checks never look at each other's state, so a surprising
//! input can only ever affect its own deduction.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::EngineConfig;
use crate::scoring::ModuleScore;

// Deduction magnitudes (reference behavior, tunable here).
const NO_METRICS_DEDUCTION: f64 = 5.0;
const FEW_ACTION_VERBS_DEDUCTION: f64 = 4.0;
const WEAK_OVER_STRONG_DEDUCTION: f64 = 2.0;
const PLACEHOLDER_DEDUCTION: f64 = 3.0;
const CLARITY_DEDUCTION: f64 = 1.0;
const WEAK_BULLETS_DEDUCTION: f64 = 2.0;
const TONE_DEDUCTION: f64 = 1.0;

/// Positive-findings count needed (with at most two deduction points) to earn
/// the encouraging headline.
const ENCOURAGEMENT_MIN_POSITIVES: u32 = 3;
const ENCOURAGEMENT_MAX_DEDUCTIONS: f64 = 2.0;

// ── Action verb vocabulary, five categories ─────────────────────────────────

const LEADERSHIP_VERBS: &[&str] = &[
    "led", "managed", "directed", "coordinated", "mentored", "supervised", "organized",
];
const ACHIEVEMENT_VERBS: &[&str] = &[
    "achieved", "delivered", "exceeded", "completed", "attained", "won", "earned",
];
const CREATION_VERBS: &[&str] = &[
    "created", "developed", "designed", "built", "launched", "implemented", "established",
    "founded",
];
const IMPROVEMENT_VERBS: &[&str] = &[
    "improved", "increased", "reduced", "optimized", "streamlined", "enhanced", "accelerated",
];
const ANALYTICAL_VERBS: &[&str] = &[
    "analyzed", "evaluated", "researched", "assessed", "investigated", "identified", "measured",
];

const VERB_CATEGORIES: &[&[&str]] = &[
    LEADERSHIP_VERBS,
    ACHIEVEMENT_VERBS,
    CREATION_VERBS,
    IMPROVEMENT_VERBS,
    ANALYTICAL_VERBS,
];

const WEAK_PHRASES: &[&str] = &[
    "responsible for",
    "worked on",
    "helped with",
    "duties included",
    "tasked with",
    "involved in",
    "participated in",
];

const PLACEHOLDER_MARKERS: &[&str] = &[
    "lorem ipsum",
    "dummy text",
    "your name here",
    "[insert",
    "[your",
    "[company",
    "(insert",
    "{name}",
    "type here",
    "sample text",
];

const CASUAL_PHRASES: &[&str] = &[
    "stuff", "things like", "a lot of", "kinda", "sorta", "gonna", "wanna", "awesome",
    "you know",
];
const NEGATIVE_WORDS: &[&str] = &[
    "hate", "hated", "boring", "quit", "fired", "lazy", "unfortunately", "failure",
];
const CONTRACTIONS: &[&str] = &[
    "don't", "can't", "won't", "didn't", "couldn't", "isn't", "wasn't", "i'm", "i've", "it's",
    "that's",
];
const WEAK_BULLET_STARTERS: &[&str] = &["the", "a", "an", "i", "my", "we", "our", "was", "is"];

// ── Quantified-achievement pattern families ─────────────────────────────────

static PERCENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+(?:\.\d+)?\s*%").unwrap());
static CURRENCY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[$€£]\s*\d[\d,]*(?:\.\d+)?\s*(?:k|m|b|million|billion)?").unwrap());
static MULTIPLIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+(?:\.\d+)?x\b").unwrap());
static RATIO: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+\s*:\s*\d+\b").unwrap());
static SCALE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b\d[\d,]*\+?\s*(?:users|customers|clients|employees|people|engineers|projects|teams|requests|transactions|records|downloads|hours|weeks|months|years)\b",
    )
    .unwrap()
});
static PUNCT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[!?]{2,}|[,;]{3,}").unwrap());

/// One sub-check's contribution.
#[derive(Debug, Default)]
struct CheckOutcome {
    deduction: f64,
    positive_findings: u32,
    short: Vec<String>,
    long: Vec<String>,
}

pub fn score(resume_text: &str, config: &EngineConfig) -> ModuleScore {
    let max = config.content_quality_max;
    let lower = resume_text.to_lowercase();
    let bullets = collect_bullets(resume_text);

    let outcomes = [
        check_quantified(resume_text),
        check_action_verbs(&lower),
        check_placeholders(&lower),
        check_clarity(resume_text, &bullets),
        check_bullet_consistency(&bullets),
        check_tone(&lower),
    ];

    let deductions: f64 = outcomes.iter().map(|o| o.deduction).sum();
    let positives: u32 = outcomes.iter().map(|o| o.positive_findings).sum();

    let mut short_feedback: Vec<String> = Vec::new();
    let mut long_feedback: Vec<String> = Vec::new();
    for outcome in outcomes {
        short_feedback.extend(outcome.short);
        long_feedback.extend(outcome.long);
    }

    if positives >= ENCOURAGEMENT_MIN_POSITIVES && deductions <= ENCOURAGEMENT_MAX_DEDUCTIONS {
        short_feedback.insert(
            0,
            "Excellent work! Your resume content is specific, quantified, and well structured."
                .to_string(),
        );
    } else if short_feedback.is_empty() {
        short_feedback.push("Content is strong and metrics-driven.".to_string());
        long_feedback.push(
            "Your resume includes measurable results, strong verbs, and clear, relevant content. \
             This makes it compelling to both humans and ATS systems."
                .to_string(),
        );
    }

    ModuleScore::new(max - deductions, max, short_feedback, long_feedback)
}

/// (a) Quantified achievements: percentages, currency, multipliers/ratios,
/// and scale/time metrics.
fn check_quantified(text: &str) -> CheckOutcome {
    let count = PERCENT.find_iter(text).count()
        + CURRENCY.find_iter(text).count()
        + MULTIPLIER.find_iter(text).count()
        + RATIO.find_iter(text).count()
        + SCALE.find_iter(text).count();

    let mut outcome = CheckOutcome::default();
    if count == 0 {
        outcome.deduction = NO_METRICS_DEDUCTION;
        outcome
            .short
            .push("Missing metrics like % or $ to show results.".to_string());
        outcome.long.push(
            "Try to include quantifiable results in your bullet points. Numbers like 'increased \
             performance by 30%' or 'managed a budget of $5,000' convey real-world value and \
             stand out to both recruiters and ATS systems."
                .to_string(),
        );
    } else {
        outcome.positive_findings = 1;
        if count >= 3 {
            outcome.positive_findings = 2;
            outcome.long.push(format!(
                "Strong quantification: {count} measurable results found across your bullet points."
            ));
        }
    }
    outcome
}

/// (b) Strong action verbs across five categories vs weak filler phrases.
fn check_action_verbs(lower: &str) -> CheckOutcome {
    let words: std::collections::HashSet<&str> = lower
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .collect();

    let mut strong_found = 0usize;
    let mut categories_covered = 0usize;
    for category in VERB_CATEGORIES {
        let in_category = category.iter().filter(|v| words.contains(**v)).count();
        if in_category > 0 {
            categories_covered += 1;
        }
        strong_found += in_category;
    }
    let weak_found = WEAK_PHRASES.iter().filter(|p| lower.contains(**p)).count();

    let mut outcome = CheckOutcome::default();
    if strong_found < 3 {
        outcome.deduction += FEW_ACTION_VERBS_DEDUCTION;
        outcome
            .short
            .push("Too few strong verbs like 'led' or 'developed'.".to_string());
        outcome.long.push(
            "Start your bullet points with strong action verbs like 'developed', 'managed', or \
             'led'. These communicate initiative and ownership, two things recruiters look for in \
             high-performing candidates."
                .to_string(),
        );
    }
    if weak_found > strong_found {
        outcome.deduction += WEAK_OVER_STRONG_DEDUCTION;
        outcome
            .short
            .push("Filler phrases like 'responsible for' outnumber your action verbs.".to_string());
        outcome.long.push(
            "Phrases like 'responsible for' and 'worked on' describe duties, not impact. Rewrite \
             them around what you achieved: 'reduced deploy time by 40%' instead of 'responsible \
             for deployments'."
                .to_string(),
        );
    }
    if categories_covered >= 3 {
        outcome.positive_findings += 1;
    }
    outcome
}

/// (c) Placeholder or template text left in the document.
fn check_placeholders(lower: &str) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    if PLACEHOLDER_MARKERS.iter().any(|m| lower.contains(m)) {
        outcome.deduction = PLACEHOLDER_DEDUCTION;
        outcome
            .short
            .push("Placeholder text still present in resume.".to_string());
        outcome.long.push(
            "Your resume appears to contain template filler (e.g. 'Lorem Ipsum', bracketed \
             instructions). Replace all placeholders with your real information before sending it \
             anywhere."
                .to_string(),
        );
    }
    outcome
}

/// (d) Clarity signals: overlong sentences, shouting, punctuation runs, and
/// too-short bullets.
fn check_clarity(text: &str, bullets: &[&str]) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();

    let overlong_sentences = text
        .split(['.', '!', '?'])
        .filter(|s| s.split_whitespace().count() > 40)
        .count();
    if overlong_sentences > 0 {
        outcome.deduction += CLARITY_DEDUCTION;
        outcome
            .short
            .push("Some sentences run past 40 words; split them up.".to_string());
        outcome.long.push(format!(
            "{overlong_sentences} sentence(s) exceed 40 words. Long sentences bury the impact; \
             one idea per bullet reads far better."
        ));
    }

    let caps_tokens = text
        .split_whitespace()
        .filter(|w| w.chars().count() >= 4 && w.chars().all(|c| c.is_ascii_uppercase()))
        .count();
    if caps_tokens > 10 {
        outcome.deduction += CLARITY_DEDUCTION;
        outcome
            .short
            .push("Heavy use of ALL-CAPS text reduces readability.".to_string());
    }

    if PUNCT_RUN.is_match(text) {
        outcome.deduction += CLARITY_DEDUCTION;
        outcome
            .short
            .push("Irregular punctuation runs detected (e.g. '!!').".to_string());
    }

    if bullets.len() >= 3 {
        let too_short = bullets
            .iter()
            .filter(|b| b.split_whitespace().count() < 4)
            .count();
        if (too_short as f64) / (bullets.len() as f64) > 0.3 {
            outcome.deduction += CLARITY_DEDUCTION;
            outcome
                .short
                .push("Many bullet points are too short to say anything concrete.".to_string());
            outcome.long.push(
                "Several bullets are under four words. Expand each into what you did, how, and \
                 with what measurable outcome."
                    .to_string(),
            );
        }
    }

    outcome
}

/// (e) Bullet structural consistency: weak starters vs action-verb starts.
fn check_bullet_consistency(bullets: &[&str]) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    if bullets.len() < 3 {
        return outcome;
    }

    let first_words: Vec<String> = bullets
        .iter()
        .filter_map(|b| b.split_whitespace().next())
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .collect();

    let weak = first_words
        .iter()
        .filter(|w| WEAK_BULLET_STARTERS.contains(&w.as_str()))
        .count();
    let action = first_words
        .iter()
        .filter(|w| VERB_CATEGORIES.iter().any(|cat| cat.contains(&w.as_str())))
        .count();
    let total = first_words.len() as f64;

    if weak as f64 / total > 0.5 {
        outcome.deduction = WEAK_BULLETS_DEDUCTION;
        outcome.short.push(
            "Most bullets open with articles or pronouns instead of action verbs.".to_string(),
        );
        outcome.long.push(
            "Bullets that start with 'The', 'I', or 'We' read as narration. Lead with the verb: \
             'Built…', 'Reduced…', 'Led…'."
                .to_string(),
        );
    } else if action as f64 / total >= 0.7 {
        outcome.positive_findings = 1;
    }
    outcome
}

/// (f) Professional-tone signals: casual phrasing, first-person overuse,
/// negativity, informal contractions.
fn check_tone(lower: &str) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();

    if CASUAL_PHRASES.iter().any(|p| contains_phrase(lower, p)) {
        outcome.deduction += TONE_DEDUCTION;
        outcome
            .short
            .push("Casual phrasing detected; keep the tone professional.".to_string());
    }

    let first_person = lower
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| matches!(*w, "i" | "me" | "my" | "mine"))
        .count();
    if first_person > 10 {
        outcome.deduction += TONE_DEDUCTION;
        outcome
            .short
            .push("Heavy first-person usage; resumes usually drop 'I' and 'my'.".to_string());
    }

    if NEGATIVE_WORDS.iter().any(|w| contains_phrase(lower, w)) {
        outcome.deduction += TONE_DEDUCTION;
        outcome
            .short
            .push("Negative-sentiment wording detected; reframe positively.".to_string());
    }

    let contractions = CONTRACTIONS
        .iter()
        .map(|c| lower.matches(c).count())
        .sum::<usize>();
    if contractions > 5 {
        outcome.deduction += TONE_DEDUCTION;
        outcome
            .short
            .push("Frequent contractions read as informal; spell them out.".to_string());
    }

    outcome
}

/// Whole-word/phrase containment on already-lowercased text.
fn contains_phrase(lower: &str, phrase: &str) -> bool {
    lower.match_indices(phrase).any(|(start, _)| {
        let before_ok = start == 0
            || !lower[..start]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric());
        let end = start + phrase.len();
        let after_ok = end >= lower.len()
            || !lower[end..].chars().next().is_some_and(|c| c.is_alphanumeric());
        before_ok && after_ok
    })
}

/// Lines that look like bullet points.
fn collect_bullets(text: &str) -> Vec<&str> {
    text.lines()
        .filter_map(|line| {
            let trimmed = line.trim_start();
            trimmed
                .strip_prefix(['-', '•', '*', '·'])
                .map(|rest| rest.trim())
        })
        .filter(|rest| !rest.is_empty())
        .collect()
}
