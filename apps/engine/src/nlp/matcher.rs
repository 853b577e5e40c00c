//! Canonicalizer — maps extracted phrases onto taxonomy entries via synonym
//! lookup, exact lookup, then fuzzy (edit-distance) matching.

use strsim::normalized_levenshtein;

use crate::taxonomy::{normalize_skill, synonym_lookup, Taxonomy};

/// Maps a phrase to a canonical skill name, or `None` when nothing in the
/// taxonomy clears `threshold` (a 0–100 similarity ratio).
///
/// Order of attempts:
/// 1. synonym map — a hit resolves to its canonical form, but only when that
///    canonical name is actually present in the loaded taxonomy; otherwise
///    the variant falls through to the remaining steps;
/// 2. exact taxonomy lookup on the normalized phrase;
/// 3. best fuzzy match over taxonomy entries in load order, first entry wins
///    on exact score ties.
///
/// A `None` result is not an error — callers keep the phrase as a raw term.
pub fn canonicalize(phrase: &str, taxonomy: &Taxonomy, threshold: f64) -> Option<String> {
    let normalized = normalize_skill(phrase);
    if normalized.is_empty() {
        return None;
    }

    if let Some(canonical) = synonym_lookup(&normalized) {
        if let Some(entry) = taxonomy.get_by_normalized(&normalize_skill(canonical)) {
            return Some(entry.canonical_name.clone());
        }
    }

    if let Some(entry) = taxonomy.get_by_normalized(&normalized) {
        return Some(entry.canonical_name.clone());
    }

    let mut best_index = None;
    let mut best_score = 0.0_f64;
    for (index, name) in taxonomy.normalized_names().iter().enumerate() {
        let score = normalized_levenshtein(&normalized, name) * 100.0;
        // Strict comparison keeps the first entry on ties.
        if score > best_score {
            best_score = score;
            best_index = Some(index);
        }
    }

    match best_index {
        Some(index) if best_score >= threshold => {
            Some(taxonomy.entries()[index].canonical_name.clone())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxonomy() -> Taxonomy {
        Taxonomy::embedded().unwrap()
    }

    #[test]
    fn test_already_canonical_name_returns_itself() {
        let tax = taxonomy();
        assert_eq!(canonicalize("python", &tax, 90.0), Some("python".to_string()));
        assert_eq!(canonicalize("sql", &tax, 90.0), Some("sql".to_string()));
    }

    #[test]
    fn test_synonym_variants_map_to_canonical() {
        let tax = taxonomy();
        assert_eq!(canonicalize("py", &tax, 90.0), Some("python".to_string()));
        assert_eq!(canonicalize("React JS", &tax, 90.0), Some("react".to_string()));
        assert_eq!(canonicalize("K8s", &tax, 90.0), Some("kubernetes".to_string()));
    }

    #[test]
    fn test_symbol_normalization_before_lookup() {
        let tax = taxonomy();
        assert_eq!(canonicalize("C#", &tax, 90.0), Some("c#".to_string()));
        assert_eq!(canonicalize("Node.JS", &tax, 90.0), Some("node.js".to_string()));
    }

    #[test]
    fn test_fuzzy_match_accepts_near_miss() {
        let tax = taxonomy();
        // One trailing character off: similarity ~90.9, above the threshold.
        assert_eq!(
            canonicalize("postgresqll", &tax, 90.0),
            Some("postgresql".to_string())
        );
    }

    #[test]
    fn test_below_threshold_returns_none() {
        let tax = taxonomy();
        assert_eq!(canonicalize("underwater basket weaving", &tax, 90.0), None);
    }

    #[test]
    fn test_empty_phrase_returns_none() {
        let tax = taxonomy();
        assert_eq!(canonicalize("   ", &tax, 90.0), None);
    }

    #[test]
    fn test_synonym_is_inert_when_canonical_absent_from_taxonomy() {
        // A taxonomy without javascript: the "js" variant must not fabricate
        // a skill the taxonomy doesn't carry.
        let csv = "skill,category\nrust,programming language\n";
        let tax = Taxonomy::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(canonicalize("js", &tax, 90.0), None);
        // With the canonical present, the same variant resolves normally.
        let csv = "skill,category\njavascript,programming language\n";
        let tax = Taxonomy::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(canonicalize("js", &tax, 90.0), Some("javascript".to_string()));
    }

    #[test]
    fn test_tie_break_prefers_first_taxonomy_entry() {
        let csv = "skill,category\nabcd,x\nabce,x\n";
        let tax = Taxonomy::from_reader(csv.as_bytes()).unwrap();
        // "abcf" is equidistant from both entries; load order decides.
        assert_eq!(canonicalize("abcf", &tax, 70.0), Some("abcd".to_string()));
    }
}
