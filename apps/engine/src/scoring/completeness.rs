//! Section-Completeness scorer — checks that the sections recruiters expect
//! in a résumé are present and non-empty.

use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::nlp::sections::SectionName;
use crate::scoring::ModuleScore;

/// Sections every résumé is expected to carry.
const EXPECTED_SECTIONS: &[SectionName] = &[
    SectionName::Contact,
    SectionName::Summary,
    SectionName::Education,
    SectionName::Experience,
    SectionName::Skills,
];

fn advice_for(section: SectionName) -> &'static str {
    match section {
        SectionName::Contact => {
            "Add a contact section with your name, email, and phone number at the top."
        }
        SectionName::Summary => {
            "Add a two or three line professional summary so recruiters see your pitch first."
        }
        SectionName::Education => {
            "Add an education section listing your degree, institution, and graduation year."
        }
        SectionName::Experience => {
            "Add a work experience section with roles, companies, dates, and impact bullets."
        }
        SectionName::Skills => {
            "Add a skills section listing the technologies and tools you work with."
        }
        _ => "",
    }
}

pub fn score(sections: &BTreeMap<SectionName, String>, config: &EngineConfig) -> ModuleScore {
    let max = config.section_max as f64;

    let missing: Vec<SectionName> = EXPECTED_SECTIONS
        .iter()
        .copied()
        .filter(|name| {
            sections
                .get(name)
                .map_or(true, |content| content.trim().is_empty())
        })
        .collect();

    if missing.is_empty() {
        return ModuleScore::new(
            max,
            max,
            vec!["All standard sections are present and filled in.".to_string()],
            vec![
                "Your resume carries every section an ATS and a recruiter expect: contact details, \
                 a summary, education, experience, and skills."
                    .to_string(),
            ],
        );
    }

    let deduction = (missing.len() as u32 * config.section_penalty) as f64;
    let names: Vec<String> = missing.iter().map(|s| s.to_string()).collect();
    let short_feedback = vec![format!(
        "Missing or empty sections: {}.",
        names.join(", ")
    )];
    let long_feedback = missing
        .iter()
        .map(|s| advice_for(*s).to_string())
        .collect();

    ModuleScore::new(max - deduction, max, short_feedback, long_feedback)
}
