//! Keyword-Match scorer — strict set-membership matching between the résumé
//! and job-description keyword sets after canonicalization. No partial
//! credit for near-misses; those were already resolved by the fuzzy matcher.

use std::collections::BTreeSet;

use crate::config::EngineConfig;
use crate::scoring::ModuleScore;
use crate::taxonomy::is_soft_skill;

/// Keyword-match result: the bounded module score plus the raw matched and
/// missing lists the report surfaces.
#[derive(Debug, Clone)]
pub struct KeywordMatchOutcome {
    pub module: ModuleScore,
    pub matched: Vec<String>,
    /// Job keywords absent from the résumé, filtered to technical terms —
    /// soft skills get constructive treatment in Context-Relevance instead.
    pub missing_technical: Vec<String>,
}

pub fn score(
    resume_keywords: &BTreeSet<String>,
    jd_keywords: &BTreeSet<String>,
    config: &EngineConfig,
) -> KeywordMatchOutcome {
    let max = config.keyword_match_max as f64;

    if jd_keywords.is_empty() {
        return KeywordMatchOutcome {
            module: ModuleScore::new(
                0.0,
                max,
                vec!["No keywords to analyze in the job description.".to_string()],
                vec![
                    "The job description text produced no keywords, so keyword matching could not run. \
                     Check that the job description contains actual role requirements."
                        .to_string(),
                ],
            ),
            matched: vec![],
            missing_technical: vec![],
        };
    }

    let matched: Vec<String> = jd_keywords.intersection(resume_keywords).cloned().collect();
    let missing_technical: Vec<String> = jd_keywords
        .difference(resume_keywords)
        .filter(|kw| !is_soft_skill(kw))
        .cloned()
        .collect();

    let raw_score = matched.len() as u32 * config.points_per_matched_keyword;
    let score = raw_score.min(config.keyword_match_max) as f64;

    let mut short_feedback = Vec::new();
    let mut long_feedback = Vec::new();

    if score >= max {
        short_feedback.push(format!(
            "Excellent keyword coverage: {} of {} job keywords appear in your resume.",
            matched.len(),
            jd_keywords.len()
        ));
    } else if !matched.is_empty() {
        short_feedback.push(format!(
            "{} of {} job keywords already appear in your resume.",
            matched.len(),
            jd_keywords.len()
        ));
    }

    if !missing_technical.is_empty() {
        short_feedback.push(
            "Add these terms somewhere in your resume to improve ATS compatibility.".to_string(),
        );
        let sample: Vec<&str> = missing_technical.iter().take(5).map(String::as_str).collect();
        long_feedback.push(format!(
            "Keywords like `{}` appear in the job description but not in your resume. \
             Work the ones you genuinely have experience with into your bullet points.",
            sample.join(", ")
        ));
    }

    KeywordMatchOutcome {
        module: ModuleScore::new(score, max, short_feedback, long_feedback),
        matched,
        missing_technical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_score_is_five_points_per_match() {
        let out = score(
            &set(&["python", "sql", "rust"]),
            &set(&["python", "sql", "kafka"]),
            &EngineConfig::default(),
        );
        assert_eq!(out.module.score, 10.0);
        assert_eq!(out.matched, vec!["python", "sql"]);
    }

    #[test]
    fn test_score_caps_at_forty() {
        let many: Vec<String> = (0..20).map(|i| format!("skill{i}")).collect();
        let jd: BTreeSet<String> = many.iter().cloned().collect();
        let resume = jd.clone();
        let out = score(&resume, &jd, &EngineConfig::default());
        assert_eq!(out.module.score, 40.0);
    }

    #[test]
    fn test_monotonic_in_matched_keywords() {
        let config = EngineConfig::default();
        let jd: BTreeSet<String> = (0..12).map(|i| format!("skill{i}")).collect();
        let mut previous = 0.0;
        for n in 0..=12 {
            let resume: BTreeSet<String> = (0..n).map(|i| format!("skill{i}")).collect();
            let s = score(&resume, &jd, &config).module.score;
            assert!(s >= previous, "score decreased at n={n}");
            previous = s;
        }
    }

    #[test]
    fn test_missing_list_excludes_soft_skills() {
        let out = score(
            &set(&["python"]),
            &set(&["python", "kafka", "leadership"]),
            &EngineConfig::default(),
        );
        assert_eq!(out.missing_technical, vec!["kafka"]);
    }

    #[test]
    fn test_empty_jd_keywords_scores_zero_with_feedback() {
        let out = score(&set(&["python"]), &set(&[]), &EngineConfig::default());
        assert_eq!(out.module.score, 0.0);
        assert!(out.module.short_feedback[0].contains("No keywords to analyze"));
    }

    #[test]
    fn test_no_overlap_scores_zero_but_lists_missing() {
        let out = score(&set(&["cooking"]), &set(&["python"]), &EngineConfig::default());
        assert_eq!(out.module.score, 0.0);
        assert_eq!(out.missing_technical, vec!["python"]);
    }
}
