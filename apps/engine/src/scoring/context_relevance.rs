//! Context-Relevance scorer — rewards job keywords that show up as evidence
//! (projects, experience, achievements, volunteering) over keywords that only
//! appear in a bare skills list.
//!
//! The scoring model is a weighted sum of per-tier coverage ratios plus
//! bonuses, with a base floor so no-signal input does not collapse to zero,
//! and tiered minimums once any real coverage exists. True zero overlap is
//! still distinguishable: it lands exactly on the base floor with a dedicated
//! role-mismatch message.

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;
use tracing::debug;

use crate::config::EngineConfig;
use crate::nlp::sections::{SectionName, CONTEXT_TIER, SKILL_TIER, SUMMARY_TIER};
use crate::scoring::ModuleScore;
use crate::taxonomy::is_soft_skill;

// Weighted-sum model constants (reference behavior; see EngineConfig for the
// module cap).
const CONTEXT_WEIGHT: f64 = 0.6;
const SUMMARY_WEIGHT: f64 = 0.25;
const SKILLS_WEIGHT: f64 = 0.15;
const BASE_FLOOR: f64 = 0.15;
const CONTEXT_BONUS_THRESHOLD: f64 = 0.05;
const CONTEXT_BONUS_BASE: f64 = 0.15;
const CONTEXT_BONUS_SLOPE: f64 = 0.2;
const SKILLS_BONUS_THRESHOLD: f64 = 0.3;
const SKILLS_BONUS: f64 = 0.1;
const FREQUENCY_BONUS_PER_USE: f64 = 0.03;
const FREQUENCY_BONUS_CAP: f64 = 0.15;
const COVERAGE_PENALTY_THRESHOLD: f64 = 0.8;
const COVERAGE_PENALTY_SLOPE: f64 = 0.2;
// Minimum-score tiers, as fractions of max, applied once coverage >= 10%.
const MIN_WITH_CONTEXT: f64 = 0.35;
const MIN_WITH_SUMMARY_OR_SKILLS: f64 = 0.25;
const MIN_WITH_ANY_COVERAGE: f64 = 0.2;

/// Soft-skill suggestion categories: (category, member keywords, example
/// phrasing to work into achievement bullets).
const SOFT_SKILL_CATEGORIES: &[(&str, &[&str], &str)] = &[
    (
        "communication",
        &["communication", "interpersonal"],
        "Presented quarterly findings to a 12-person stakeholder group",
    ),
    (
        "leadership",
        &["leadership"],
        "Mentored two junior engineers through their first production launch",
    ),
    (
        "collaboration",
        &["collaboration", "teamwork"],
        "Partnered with design and QA to ship a cross-team feature on schedule",
    ),
    (
        "analytical",
        &["analytical", "critical thinking", "problem-solving"],
        "Diagnosed a recurring outage and cut incident frequency by half",
    ),
    (
        "management",
        &["time management", "organizational"],
        "Ran sprint planning for a five-person team across three releases",
    ),
    (
        "creativity",
        &["creativity", "adaptability"],
        "Prototyped an alternative onboarding flow that lifted activation",
    ),
    (
        "business",
        &["business", "stakeholder management"],
        "Translated customer interviews into a prioritized product backlog",
    ),
];

/// Where each job keyword was found, at which tier, and how often.
#[derive(Debug, Default)]
pub struct ContextAnalysis {
    pub found_in_context: BTreeSet<String>,
    pub found_in_summary: BTreeSet<String>,
    pub found_in_skills: BTreeSet<String>,
    pub missing: BTreeSet<String>,
    pub frequency: BTreeMap<String, usize>,
}

impl ContextAnalysis {
    pub fn total_found(&self) -> usize {
        self.found_in_context.len() + self.found_in_summary.len() + self.found_in_skills.len()
    }
}

/// Locates every job keyword in the résumé sections, recording the first
/// (highest-priority) tier where it matches and its match frequency there.
pub fn analyze(
    sections: &BTreeMap<SectionName, String>,
    jd_keywords: &BTreeSet<String>,
) -> ContextAnalysis {
    let lowered: BTreeMap<SectionName, String> = sections
        .iter()
        .map(|(name, content)| (*name, content.to_lowercase()))
        .collect();

    let mut analysis = ContextAnalysis::default();

    for keyword in jd_keywords {
        let kw = keyword.trim().to_lowercase();
        if kw.is_empty() {
            continue;
        }
        let pattern = match Regex::new(&format!(r"\b{}\b", regex::escape(&kw))) {
            Ok(p) => p,
            // Keywords that defeat word boundaries (pure punctuation) are
            // treated as missing rather than failing the module.
            Err(_) => {
                analysis.missing.insert(keyword.clone());
                continue;
            }
        };

        let count_in = |tier: &[SectionName]| -> usize {
            tier.iter()
                .filter_map(|name| lowered.get(name))
                .map(|content| pattern.find_iter(content).count())
                .sum()
        };

        let context_hits = count_in(CONTEXT_TIER);
        if context_hits > 0 {
            analysis.found_in_context.insert(keyword.clone());
            *analysis.frequency.entry(keyword.clone()).or_default() += context_hits;
            continue;
        }
        let summary_hits = count_in(SUMMARY_TIER);
        if summary_hits > 0 {
            analysis.found_in_summary.insert(keyword.clone());
            *analysis.frequency.entry(keyword.clone()).or_default() += summary_hits;
            continue;
        }
        let skill_hits = count_in(SKILL_TIER);
        if skill_hits > 0 {
            analysis.found_in_skills.insert(keyword.clone());
            *analysis.frequency.entry(keyword.clone()).or_default() += skill_hits;
            continue;
        }
        analysis.missing.insert(keyword.clone());
    }

    analysis
}

pub fn score(
    sections: &BTreeMap<SectionName, String>,
    jd_keywords: &BTreeSet<String>,
    config: &EngineConfig,
) -> ModuleScore {
    let max = config.context_max;
    let total_keywords = jd_keywords.len();
    if total_keywords == 0 {
        return ModuleScore::new(
            0.0,
            max,
            vec!["No keywords to analyze.".to_string()],
            vec!["No keywords provided for analysis.".to_string()],
        );
    }

    let analysis = analyze(sections, jd_keywords);

    // True zero overlap is its own documented outcome: the designated floor
    // plus a role-mismatch message, never an arbitrary low value.
    if analysis.total_found() == 0 {
        let (short_feedback, long_feedback) = build_feedback(&analysis, total_keywords);
        return ModuleScore::new(max * BASE_FLOOR, max, short_feedback, long_feedback);
    }

    let total = total_keywords as f64;
    let context_ratio = analysis.found_in_context.len() as f64 / total;
    let summary_ratio = analysis.found_in_summary.len() as f64 / total;
    let skills_ratio = analysis.found_in_skills.len() as f64 / total;
    let missing_ratio = analysis.missing.len() as f64 / total;

    let weighted = CONTEXT_WEIGHT * context_ratio
        + SUMMARY_WEIGHT * summary_ratio
        + SKILLS_WEIGHT * skills_ratio;

    let context_bonus = if context_ratio >= CONTEXT_BONUS_THRESHOLD {
        CONTEXT_BONUS_BASE + context_ratio * CONTEXT_BONUS_SLOPE
    } else {
        0.0
    };
    let skills_bonus = if skills_ratio >= SKILLS_BONUS_THRESHOLD {
        SKILLS_BONUS
    } else {
        0.0
    };
    let frequency_bonus = if analysis.frequency.is_empty() {
        0.0
    } else {
        let avg = analysis.frequency.values().sum::<usize>() as f64
            / analysis.frequency.len() as f64;
        (avg * FREQUENCY_BONUS_PER_USE).min(FREQUENCY_BONUS_CAP)
    };
    let coverage_penalty = if missing_ratio > COVERAGE_PENALTY_THRESHOLD {
        (missing_ratio - COVERAGE_PENALTY_THRESHOLD) * COVERAGE_PENALTY_SLOPE
    } else {
        0.0
    };

    let mut final_score =
        max * (BASE_FLOOR + weighted + context_bonus + skills_bonus + frequency_bonus
            - coverage_penalty);

    // Tiered minimums once at least 10% of the keywords were found anywhere.
    let found_ratio = analysis.total_found() as f64 / total;
    if found_ratio >= 0.1 {
        let minimum = if context_ratio >= CONTEXT_BONUS_THRESHOLD {
            max * MIN_WITH_CONTEXT
        } else if summary_ratio >= 0.1 || skills_ratio >= 0.2 {
            max * MIN_WITH_SUMMARY_OR_SKILLS
        } else {
            max * MIN_WITH_ANY_COVERAGE
        };
        final_score = final_score.max(minimum);
    }

    let final_score = (final_score.clamp(0.0, max) * 10.0).round() / 10.0;

    debug!(
        context = analysis.found_in_context.len(),
        summary = analysis.found_in_summary.len(),
        skills = analysis.found_in_skills.len(),
        missing = analysis.missing.len(),
        score = final_score,
        "Context relevance computed"
    );

    let (short_feedback, long_feedback) = build_feedback(&analysis, total_keywords);
    ModuleScore::new(final_score, max, short_feedback, long_feedback)
}

fn build_feedback(analysis: &ContextAnalysis, total_keywords: usize) -> (Vec<String>, Vec<String>) {
    let mut short = Vec::new();
    let mut long = Vec::new();

    if analysis.total_found() == 0 {
        // Role mismatch, not a failure: keep the language constructive.
        short.push(
            "This role focuses on different skills; consider roles that better match your \
             background."
                .to_string(),
        );
        long.push(
            "While your professional experience has value, this particular role emphasizes \
             different technical areas. Consider targeting roles that align with your current \
             expertise, highlighting transferable skills, or learning the key technologies named \
             in the job description."
                .to_string(),
        );
        return (short, long);
    }

    let coverage = analysis.total_found() as f64 / total_keywords as f64;

    // Lead with positives.
    if !analysis.found_in_context.is_empty() {
        let sample = joined_sample(&analysis.found_in_context, 3);
        short.push(format!(
            "Great job! You demonstrate `{sample}` with real project examples."
        ));
        long.push(format!(
            "Excellent contextual evidence: you show practical experience with `{}` through \
             specific examples in your projects and work experience. This is exactly what hiring \
             managers want to see.",
            joined_sample(&analysis.found_in_context, usize::MAX)
        ));
    }

    if !analysis.found_in_skills.is_empty() {
        let sample = joined_sample(&analysis.found_in_skills, 4);
        short.push(format!(
            "Your skills section shows knowledge of `{sample}`."
        ));
        long.push(format!(
            "Skills foundation: you list relevant technologies `{}` in your skills section. To \
             strengthen the application, add brief examples of how you applied them in your work \
             experience.",
            joined_sample(&analysis.found_in_skills, usize::MAX)
        ));
    }

    if !analysis.found_in_summary.is_empty() {
        let sample = joined_sample(&analysis.found_in_summary, 3);
        short.push(format!(
            "Your summary effectively highlights `{sample}` upfront."
        ));
        long.push(format!(
            "Strong summary positioning: `{}` are featured in your professional summary, \
             immediately showcasing your relevance.",
            joined_sample(&analysis.found_in_summary, usize::MAX)
        ));
    }

    // Coverage tier message.
    if coverage >= 0.5 {
        short.push("Excellent match! Your resume shows strong alignment with this role.".to_string());
    } else if coverage >= 0.25 {
        short.push("Good foundation! You have relevant experience for this position.".to_string());
    } else if coverage >= 0.1 {
        short.push("You have some relevant skills; focus on highlighting them better.".to_string());
    } else {
        short.push("Consider targeting roles that better match your current expertise.".to_string());
    }

    // Constructive soft-skill suggestions, only once some technical match exists.
    let missing_soft: BTreeSet<&String> = analysis
        .missing
        .iter()
        .filter(|kw| is_soft_skill(kw))
        .collect();
    if !missing_soft.is_empty() && coverage >= 0.1 {
        let sample: Vec<&str> = missing_soft.iter().take(3).map(|s| s.as_str()).collect();
        short.push(format!(
            "Consider showcasing soft skills like `{}` through your achievements.",
            sample.join(", ")
        ));
        long.extend(soft_skill_suggestions(&missing_soft).into_iter().take(2));
    }

    // Frequency strengths.
    let repeated: Vec<&str> = analysis
        .frequency
        .iter()
        .filter(|(_, freq)| **freq > 1)
        .map(|(kw, _)| kw.as_str())
        .take(3)
        .collect();
    if !repeated.is_empty() {
        long.push(format!(
            "Consistency strength: you mention `{}` repeatedly throughout your resume, \
             demonstrating deep familiarity with these areas.",
            repeated.join(", ")
        ));
    }

    (short, long)
}

/// Maps missing soft skills to category-specific example phrasing.
fn soft_skill_suggestions(missing: &BTreeSet<&String>) -> Vec<String> {
    let mut suggestions = Vec::new();
    for (category, members, example) in SOFT_SKILL_CATEGORIES {
        let hits: Vec<&str> = missing
            .iter()
            .filter(|kw| members.contains(&kw.to_lowercase().as_str()))
            .map(|kw| kw.as_str())
            .collect();
        if !hits.is_empty() {
            suggestions.push(format!(
                "To show {category} skills ({}), add a bullet like: \"{example}\".",
                hits.join(", ")
            ));
        }
    }
    suggestions
}

fn joined_sample(set: &BTreeSet<String>, limit: usize) -> String {
    set.iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sections(pairs: &[(SectionName, &str)]) -> BTreeMap<SectionName, String> {
        pairs.iter().map(|(n, c)| (*n, c.to_string())).collect()
    }

    #[test]
    fn test_skills_only_matches_rank_in_skills_tier() {
        // Scenario: python and sql appear only in a Skills section;
        // leadership appears nowhere.
        let secs = sections(&[
            (SectionName::Skills, "python, sql, excel"),
            (SectionName::Experience, "Managed a retail store."),
        ]);
        let analysis = analyze(&secs, &keywords(&["python", "sql", "leadership"]));
        assert!(analysis.found_in_skills.contains("python"));
        assert!(analysis.found_in_skills.contains("sql"));
        assert!(analysis.found_in_context.is_empty());
        assert!(analysis.missing.contains("leadership"));
    }

    #[test]
    fn test_context_tier_outweighs_skills_tier() {
        let config = EngineConfig::default();
        let kws = keywords(&["python", "sql"]);
        let in_skills = sections(&[(SectionName::Skills, "python, sql")]);
        let in_context = sections(&[(
            SectionName::Experience,
            "Built python services backed by sql databases.",
        )]);
        let skills_score = score(&in_skills, &kws, &config).score;
        let context_score = score(&in_context, &kws, &config).score;
        assert!(
            context_score > skills_score,
            "context {context_score} should beat skills {skills_score}"
        );
    }

    #[test]
    fn test_context_hit_takes_priority_over_skills_listing() {
        let secs = sections(&[
            (SectionName::Skills, "python"),
            (SectionName::Projects, "Wrote a python scraper."),
        ]);
        let analysis = analyze(&secs, &keywords(&["python"]));
        assert!(analysis.found_in_context.contains("python"));
        assert!(!analysis.found_in_skills.contains("python"));
    }

    #[test]
    fn test_word_boundary_matching() {
        let secs = sections(&[(SectionName::Experience, "worked with javascript daily")]);
        let analysis = analyze(&secs, &keywords(&["java"]));
        assert!(analysis.missing.contains("java"));
    }

    #[test]
    fn test_zero_overlap_returns_floor_and_mismatch_message() {
        let config = EngineConfig::default();
        let secs = sections(&[(SectionName::Experience, "Managed a bakery for ten years.")]);
        let s = score(&secs, &keywords(&["python", "kubernetes", "terraform"]), &config);
        // Base floor only: 30 * 0.15 = 4.5.
        assert_eq!(s.score, 4.5);
        assert!(s.short_feedback[0].contains("different skills"));
    }

    #[test]
    fn test_empty_keywords_scores_zero() {
        let s = score(&BTreeMap::new(), &BTreeSet::new(), &EngineConfig::default());
        assert_eq!(s.score, 0.0);
        assert!(s.short_feedback[0].contains("No keywords"));
    }

    #[test]
    fn test_good_skills_coverage_hits_minimum_tier() {
        let config = EngineConfig::default();
        let secs = sections(&[(SectionName::Skills, "python, sql")]);
        let s = score(&secs, &keywords(&["python", "sql", "leadership"]), &config);
        // skills_ratio 2/3 >= 0.2 and no context => at least 25% of max.
        assert!(s.score >= 7.5, "score was {}", s.score);
        assert!(s.score <= 30.0);
    }

    #[test]
    fn test_missing_soft_skills_get_category_suggestions() {
        let config = EngineConfig::default();
        let secs = sections(&[(SectionName::Skills, "python, sql")]);
        let s = score(&secs, &keywords(&["python", "sql", "leadership"]), &config);
        assert!(s
            .short_feedback
            .iter()
            .any(|f| f.contains("soft skills") && f.contains("leadership")));
        assert!(s
            .long_feedback
            .iter()
            .any(|f| f.contains("Mentored two junior engineers")));
    }

    #[test]
    fn test_repeated_keywords_earn_frequency_note() {
        let config = EngineConfig::default();
        let secs = sections(&[(
            SectionName::Experience,
            "Built python tooling. Maintained python services. Shipped python libraries.",
        )]);
        let s = score(&secs, &keywords(&["python"]), &config);
        assert!(s
            .long_feedback
            .iter()
            .any(|f| f.contains("Consistency strength")));
    }

    #[test]
    fn test_score_bounded_even_with_all_bonuses() {
        let config = EngineConfig::default();
        let content = "python sql docker kubernetes python sql docker kubernetes python sql";
        let secs = sections(&[
            (SectionName::Experience, content),
            (SectionName::Skills, content),
            (SectionName::Summary, content),
        ]);
        let s = score(
            &secs,
            &keywords(&["python", "sql", "docker", "kubernetes"]),
            &config,
        );
        assert!(s.score <= 30.0);
        assert!(s.score > 0.0);
    }
}
