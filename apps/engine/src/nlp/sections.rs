//! Section segmenter — splits a résumé into labeled sections by header
//! pattern recognition.
//!
//! Segmentation is total and non-overlapping: every line lands in exactly one
//! section, anything before the first recognized header (or the whole
//! document when no header is found) lands in `other`, and duplicate headers
//! of the same section concatenate in document order.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of section identifiers a résumé decomposes into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SectionName {
    Contact,
    Summary,
    Education,
    Experience,
    Skills,
    Projects,
    Certifications,
    Achievements,
    Volunteering,
    Other,
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionName::Contact => "contact",
            SectionName::Summary => "summary",
            SectionName::Education => "education",
            SectionName::Experience => "experience",
            SectionName::Skills => "skills",
            SectionName::Projects => "projects",
            SectionName::Certifications => "certifications",
            SectionName::Achievements => "achievements",
            SectionName::Volunteering => "volunteering",
            SectionName::Other => "other",
        };
        f.write_str(name)
    }
}

/// Sections that count as contextual evidence for a keyword (highest tier in
/// Context-Relevance scoring).
pub const CONTEXT_TIER: &[SectionName] = &[
    SectionName::Projects,
    SectionName::Experience,
    SectionName::Achievements,
    SectionName::Volunteering,
];

/// Bare-listing sections (lowest tier).
pub const SKILL_TIER: &[SectionName] = &[SectionName::Skills, SectionName::Certifications];

/// Summary sections (middle tier).
pub const SUMMARY_TIER: &[SectionName] = &[SectionName::Summary];

/// Header phrase groups: each target section with its common natural-language
/// synonyms, matched case-insensitively.
const HEADER_GROUPS: &[(SectionName, &[&str])] = &[
    (
        SectionName::Contact,
        &[
            "contact",
            "contact information",
            "contact info",
            "personal details",
            "personal information",
        ],
    ),
    (
        SectionName::Summary,
        &[
            "summary",
            "professional summary",
            "objective",
            "career objective",
            "profile",
            "about me",
            "about",
        ],
    ),
    (
        SectionName::Education,
        &[
            "education",
            "academic background",
            "academics",
            "qualifications",
            "educational background",
        ],
    ),
    (
        SectionName::Experience,
        &[
            "experience",
            "work experience",
            "employment history",
            "work history",
            "professional experience",
            "career history",
        ],
    ),
    (
        SectionName::Skills,
        &[
            "skills",
            "technical skills",
            "core competencies",
            "key skills",
            "technologies",
        ],
    ),
    (
        SectionName::Projects,
        &[
            "projects",
            "personal projects",
            "academic projects",
            "key projects",
            "portfolio",
        ],
    ),
    (
        SectionName::Certifications,
        &[
            "certifications",
            "certificates",
            "licenses",
            "licenses and certifications",
            "courses",
        ],
    ),
    (
        SectionName::Achievements,
        &[
            "achievements",
            "accomplishments",
            "awards",
            "honors",
        ],
    ),
    (
        SectionName::Volunteering,
        &[
            "volunteering",
            "volunteer experience",
            "volunteer work",
            "community involvement",
            "community service",
        ],
    ),
];

/// Classifies a line as a section header.
///
/// A header line is one whose trimmed, lower-cased text equals a synonym,
/// optionally followed by a colon; content after the colon belongs to the
/// section and is returned as the inline remainder.
fn classify_header(line: &str) -> Option<(SectionName, Option<String>)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.len() > 60 {
        return None;
    }
    let lower = trimmed.to_lowercase();

    for (section, synonyms) in HEADER_GROUPS {
        for synonym in *synonyms {
            if lower == *synonym {
                return Some((*section, None));
            }
            if let Some(rest) = lower.strip_prefix(synonym) {
                if let Some(rest) = rest.trim_start().strip_prefix(':') {
                    let inline = rest.trim();
                    let inline = (!inline.is_empty()).then(|| inline.to_string());
                    return Some((*section, inline));
                }
            }
        }
    }
    None
}

/// Splits a document into labeled sections. Idempotent; never fails.
pub fn segment(text: &str) -> BTreeMap<SectionName, String> {
    let mut parts: BTreeMap<SectionName, Vec<String>> = BTreeMap::new();
    let mut current = SectionName::Other;
    let mut header_seen = false;

    for line in text.lines() {
        match classify_header(line) {
            Some((section, inline)) => {
                header_seen = true;
                current = section;
                let buffer = parts.entry(current).or_default();
                if let Some(rest) = inline {
                    buffer.push(rest);
                }
            }
            None => {
                parts.entry(current).or_default().push(line.to_string());
            }
        }
    }

    if !header_seen {
        let mut sections = BTreeMap::new();
        sections.insert(SectionName::Other, text.trim().to_string());
        return sections;
    }

    let mut sections: BTreeMap<SectionName, String> = parts
        .into_iter()
        .map(|(name, lines)| (name, lines.join("\n").trim().to_string()))
        .collect();

    // Leading blank lines before the first header produce an empty `other`
    // bucket; the invariant only requires `other` when it carries text.
    if sections
        .get(&SectionName::Other)
        .is_some_and(|c| c.is_empty())
    {
        sections.remove(&SectionName::Other);
    }

    sections
}
