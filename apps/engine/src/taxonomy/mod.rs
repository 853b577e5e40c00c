//! Skill taxonomy — the curated table of canonical skill names and categories,
//! plus the synonym map and the soft-skill vocabulary.
//!
//! The taxonomy is an ordered, indexed structure (entry vector + normalized
//! name → index map) so that "first match wins" on fuzzy-score ties is
//! well-defined and reproducible across calls.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::EngineError;

/// Default skill dataset shipped with the engine (`skill,category` CSV).
const EMBEDDED_DATASET: &str = include_str!("dataset.csv");

/// One canonical skill. `canonical_name` is unique, lower-cased, trimmed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillEntry {
    pub canonical_name: String,
    pub category: String,
}

/// Maps informal variants (normalized) to canonical skill names.
///
/// Variants whose canonical form is absent from the loaded taxonomy are
/// inert: the canonicalizer only honors a synonym hit after confirming the
/// canonical name resolves against the taxonomy index.
const SYNONYMS: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ts", "typescript"),
    ("py", "python"),
    ("nodejs", "node.js"),
    ("node js", "node.js"),
    ("node", "node.js"),
    ("nextjs", "next.js"),
    ("reactjs", "react"),
    ("react js", "react"),
    ("vuejs", "vue.js"),
    ("vue", "vue.js"),
    ("angularjs", "angular"),
    ("go", "golang"),
    ("c sharp", "c#"),
    ("csharp", "c#"),
    ("c plus plus", "c++"),
    ("cpp", "c++"),
    ("html5", "html"),
    ("css3", "css"),
    ("postgres", "postgresql"),
    ("mongo", "mongodb"),
    ("k8s", "kubernetes"),
    ("ml", "machine learning"),
    ("sklearn", "scikit-learn"),
    ("scikit learn", "scikit-learn"),
    ("tf", "tensorflow"),
    ("natural language processing", "nlp"),
    ("ci/cd pipelines", "ci/cd"),
    ("amazon web services", "aws"),
    ("gcp", "google cloud"),
];

/// Soft skills used to split missing-keyword lists into technical gaps
/// (surfaced by Keyword-Match) and constructive soft-skill suggestions
/// (surfaced by Context-Relevance).
const SOFT_SKILLS: &[&str] = &[
    "communication",
    "collaboration",
    "leadership",
    "teamwork",
    "problem-solving",
    "analytical",
    "organizational",
    "interpersonal",
    "time management",
    "critical thinking",
    "adaptability",
    "creativity",
];

/// Normalizes text for robust skill matching: lower-case, trim, drop dots,
/// spell out `#` and `+`, collapse whitespace.
pub fn normalize_skill(text: &str) -> String {
    let replaced = text
        .to_lowercase()
        .trim()
        .replace('.', "")
        .replace('#', " sharp")
        .replace('+', " plus ");
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Looks up a normalized variant in the synonym map.
pub fn synonym_lookup(normalized: &str) -> Option<&'static str> {
    SYNONYMS
        .iter()
        .find(|(variant, _)| *variant == normalized)
        .map(|(_, canonical)| *canonical)
}

/// True when the keyword belongs to the soft-skill vocabulary.
pub fn is_soft_skill(keyword: &str) -> bool {
    let kw = keyword.trim().to_lowercase();
    SOFT_SKILLS.iter().any(|s| *s == kw)
}

/// Ordered, read-only skill table. Construct once, share by reference.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    entries: Vec<SkillEntry>,
    /// Pre-normalized entry names, parallel to `entries` — fuzzy matching
    /// compares against these without re-normalizing per call.
    normalized_names: Vec<String>,
    /// normalized canonical name → entry index, for exact lookups.
    index: HashMap<String, usize>,
}

impl Taxonomy {
    /// Loads the dataset shipped with the engine.
    pub fn embedded() -> Result<Self, EngineError> {
        Self::from_reader(EMBEDDED_DATASET.as_bytes())
    }

    /// Loads a `skill,category` CSV from disk.
    pub fn from_path(path: &Path) -> Result<Self, EngineError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parses a `skill,category` CSV. Blank skills are skipped with a
    /// warning, blank categories become `uncategorized`, and duplicate
    /// skills keep their first occurrence. An empty result is fatal.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, EngineError> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let skill_col = headers.iter().position(|h| h.trim() == "skill");
        let category_col = headers.iter().position(|h| h.trim() == "category");
        let (skill_col, category_col) = match (skill_col, category_col) {
            (Some(s), Some(c)) => (s, c),
            _ => {
                return Err(EngineError::Configuration(
                    "taxonomy CSV must contain 'skill' and 'category' columns".to_string(),
                ))
            }
        };

        let mut entries = Vec::new();
        let mut index = HashMap::new();
        for (row_num, record) in csv_reader.records().enumerate() {
            let record = record?;
            let skill = record
                .get(skill_col)
                .unwrap_or_default()
                .trim()
                .to_lowercase();
            if skill.is_empty() {
                warn!(row = row_num + 2, "Empty skill row in taxonomy, skipping");
                continue;
            }
            let mut category = record
                .get(category_col)
                .unwrap_or_default()
                .trim()
                .to_lowercase();
            if category.is_empty() {
                warn!(skill = %skill, "Skill has no category, using 'uncategorized'");
                category = "uncategorized".to_string();
            }

            let normalized = normalize_skill(&skill);
            if index.contains_key(&normalized) {
                warn!(skill = %skill, row = row_num + 2, "Duplicate skill, keeping first");
                continue;
            }
            index.insert(normalized, entries.len());
            entries.push(SkillEntry {
                canonical_name: skill,
                category,
            });
        }

        if entries.is_empty() {
            return Err(EngineError::Configuration(
                "no valid skills found in taxonomy".to_string(),
            ));
        }

        let normalized_names = entries
            .iter()
            .map(|e| normalize_skill(&e.canonical_name))
            .collect();

        info!(skills = entries.len(), "Skill taxonomy loaded");
        Ok(Self {
            entries,
            normalized_names,
            index,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in load order (the tie-break order for fuzzy matching).
    pub fn entries(&self) -> &[SkillEntry] {
        &self.entries
    }

    /// Pre-normalized names, parallel to `entries()`.
    pub fn normalized_names(&self) -> &[String] {
        &self.normalized_names
    }

    /// Exact lookup by normalized name.
    pub fn get_by_normalized(&self, normalized: &str) -> Option<&SkillEntry> {
        self.index.get(normalized).map(|&i| &self.entries[i])
    }

    /// Category of a canonical skill, if present.
    pub fn category_of(&self, canonical_name: &str) -> Option<&str> {
        self.get_by_normalized(&normalize_skill(canonical_name))
            .map(|e| e.category.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_dataset_loads() {
        let tax = Taxonomy::embedded().unwrap();
        assert!(tax.len() > 50);
        assert!(tax.get_by_normalized("python").is_some());
        assert_eq!(tax.category_of("sql"), Some("database"));
    }

    #[test]
    fn test_canonical_names_are_lowercase_trimmed() {
        let tax = Taxonomy::embedded().unwrap();
        for entry in tax.entries() {
            assert_eq!(entry.canonical_name, entry.canonical_name.to_lowercase());
            assert_eq!(entry.canonical_name, entry.canonical_name.trim());
        }
    }

    #[test]
    fn test_normalize_skill_variants() {
        assert_eq!(normalize_skill("Node.JS"), "nodejs");
        assert_eq!(normalize_skill("C#"), "c sharp");
        assert_eq!(normalize_skill("C++"), "c plus plus");
        assert_eq!(normalize_skill("  SQL  "), "sql");
    }

    #[test]
    fn test_synonym_lookup_maps_variants() {
        assert_eq!(synonym_lookup("js"), Some("javascript"));
        assert_eq!(synonym_lookup("go"), Some("golang"));
        assert_eq!(synonym_lookup("c sharp"), Some("c#"));
        assert_eq!(synonym_lookup("not-a-skill"), None);
    }

    #[test]
    fn test_soft_skill_vocabulary() {
        assert!(is_soft_skill("leadership"));
        assert!(is_soft_skill("  Communication "));
        assert!(!is_soft_skill("python"));
    }

    #[test]
    fn test_duplicate_skill_keeps_first() {
        let csv = "skill,category\npython,language\npython,other\n";
        let tax = Taxonomy::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(tax.len(), 1);
        assert_eq!(tax.category_of("python"), Some("language"));
    }

    #[test]
    fn test_blank_category_becomes_uncategorized() {
        let csv = "skill,category\nweaving,\n";
        let tax = Taxonomy::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(tax.category_of("weaving"), Some("uncategorized"));
    }

    #[test]
    fn test_empty_taxonomy_is_configuration_error() {
        let csv = "skill,category\n,\n";
        let err = Taxonomy::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn test_missing_columns_is_configuration_error() {
        let csv = "name,kind\npython,language\n";
        let err = Taxonomy::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn test_from_path_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "skill,category").unwrap();
        writeln!(file, "quenching,metallurgy").unwrap();
        let tax = Taxonomy::from_path(file.path()).unwrap();
        assert_eq!(tax.category_of("quenching"), Some("metallurgy"));
    }

    #[test]
    fn test_entry_order_is_load_order() {
        let csv = "skill,category\nzig,language\nada,language\n";
        let tax = Taxonomy::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(tax.entries()[0].canonical_name, "zig");
        assert_eq!(tax.entries()[1].canonical_name, "ada");
    }
}
