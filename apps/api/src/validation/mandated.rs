//! Company-mandated sections (preamble, legal text) are excluded from style analysis.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static PREAMBLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)\[COMPANY_PREAMBLE\](.*?)\[/COMPANY_PREAMBLE\]").expect("valid regex")
});

static LEGAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)\[COMPANY_LEGAL_TEXT\](.*?)\[/COMPANY_LEGAL_TEXT\]").expect("valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MandatedKind {
    Preamble,
    Legal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MandatedSection {
    pub kind: MandatedKind,
    pub content: String,
}

/// Text with every mandated block removed, plus the blocks' inner content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MandatedExtraction {
    pub clean_text: String,
    pub sections: Vec<MandatedSection>,
}

/// Splits `text` into analysable text and mandated sections.
///
/// Blocks missing their closing marker are not matched and stay in `clean_text`.
pub fn extract_mandated_sections(text: &str) -> MandatedExtraction {
    let mut sections = Vec::new();
    for (kind, re) in [
        (MandatedKind::Preamble, &*PREAMBLE_RE),
        (MandatedKind::Legal, &*LEGAL_RE),
    ] {
        sections.extend(re.captures_iter(text).map(|caps| MandatedSection {
            kind,
            content: caps[1].to_string(),
        }));
    }

    let without_preamble = PREAMBLE_RE.replace_all(text, "");
    let clean_text = LEGAL_RE.replace_all(&without_preamble, "").into_owned();

    MandatedExtraction {
        clean_text,
        sections,
    }
}

/// Case-insensitive containment of `term` in any mandated section.
pub fn is_in_mandated_section(term: &str, sections: &[MandatedSection]) -> bool {
    let needle = term.to_lowercase();
    sections
        .iter()
        .any(|s| s.content.to_lowercase().contains(&needle))
}
