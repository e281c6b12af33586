//! Pattern scanner: matches lexicon terms against the cleaned document text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::validation::lexicon::{LexiconEntry, TermCategory, LEXICON};
use crate::validation::mandated::{is_in_mandated_section, MandatedSection};

/// A lexicon term found outside mandated sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub category: TermCategory,
    /// Lexicon term that fired.
    pub term: String,
    /// Text as it appeared in the document (first occurrence).
    pub matched_text: String,
    pub suggestion: String,
}

/// Compiled lexicon patterns, index-aligned with `LEXICON`.
static TERM_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    LEXICON
        .iter()
        .map(|entry| Regex::new(&term_pattern(entry.term)).expect("valid lexicon regex"))
        .collect()
});

/// Builds a case-insensitive, word-bounded pattern for `term` where every
/// hyphen/whitespace separator matches any run of hyphens and whitespace.
pub fn term_pattern(term: &str) -> String {
    let words: Vec<String> = term
        .split(|c: char| c == '-' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(regex::escape)
        .collect();
    format!(r"(?i)\b{}\b", words.join(r"[\s\-]+"))
}

/// Scans `clean_text` for every lexicon term, skipping terms that also appear in
/// a mandated section. One warning per term, ordered by category then lexicon order.
pub fn scan_warnings(clean_text: &str, mandated: &[MandatedSection]) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for category in TermCategory::ALL {
        for (entry, pattern) in LEXICON.iter().zip(TERM_PATTERNS.iter()) {
            if entry.category != category {
                continue;
            }
            if let Some(warning) = scan_entry(entry, pattern, clean_text, mandated) {
                warnings.push(warning);
            }
        }
    }
    warnings
}

fn scan_entry(
    entry: &LexiconEntry,
    pattern: &Regex,
    clean_text: &str,
    mandated: &[MandatedSection],
) -> Option<Warning> {
    let found = pattern.find(clean_text)?;
    if is_in_mandated_section(entry.term, mandated) {
        return None;
    }
    Some(Warning {
        category: entry.category,
        term: entry.term.to_string(),
        matched_text: found.as_str().to_string(),
        suggestion: entry.suggestion.to_string(),
    })
}
