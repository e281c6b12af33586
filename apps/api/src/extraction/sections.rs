//! Heading detection and section segmentation for imported JD markdown.
//!
//! Line-by-line state machine: every recognised heading closes the current section
//! and opens a new one; all other lines accumulate into the open section.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static MD_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#{1,3}\s+(.+)$").expect("valid regex"));
static BOLD_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\*\*([^*]+)\*\*\s*$").expect("valid regex"));
static CAPS_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z\s\-&]+$").expect("valid regex"));

/// Fields that can be filled from a whole section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Responsibilities,
    Requirements,
    Preferred,
    Benefits,
    About,
    RoleOverview,
}

/// Heading patterns per section kind, checked in this order.
static HEADING_PATTERNS: Lazy<Vec<(SectionKind, Vec<Regex>)>> = Lazy::new(|| {
    let compile = |patterns: &[&str]| -> Vec<Regex> {
        patterns
            .iter()
            .map(|p| Regex::new(p).expect("valid heading regex"))
            .collect()
    };
    vec![
        (
            SectionKind::Responsibilities,
            compile(&[
                r"^responsibilities$",
                r"^key responsibilities$",
                r"^duties$",
                r"^what you['’]?ll do$",
                r"^the role$",
                r"^your role$",
                r"^job duties$",
            ]),
        ),
        (
            SectionKind::Requirements,
            compile(&[
                r"^requirements?$",
                r"^qualifications?$",
                r"^required qualifications?$",
                r"^must have$",
                r"^required skills?$",
                r"^what we['’]?re looking for$",
                r"^our ideal candidate$",
                r"^who you are$",
            ]),
        ),
        (
            SectionKind::Preferred,
            compile(&[
                r"^preferred$",
                r"^preferred qualifications?$",
                r"^nice to have$",
                r"^bonus$",
                r"^desired$",
                r"^plus$",
                r"^ideal$",
            ]),
        ),
        (
            SectionKind::Benefits,
            compile(&[
                r"^benefits?$",
                r"^what we offer$",
                r"^perks$",
                r"^compensation( & benefits)?$",
                r"^why join us\??$",
            ]),
        ),
        (
            SectionKind::About,
            compile(&[
                r"^about( the)? (company|us)$",
                r"^who we are$",
                r"^company overview$",
            ]),
        ),
        (
            SectionKind::RoleOverview,
            compile(&[
                r"^role overview$",
                r"^about( the)? role$",
                r"^position summary$",
                r"^overview$",
            ]),
        ),
    ]
});

/// A run of lines under one heading. `kind` is `None` for unrecognised headings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub kind: Option<SectionKind>,
    pub lines: Vec<String>,
}

impl Section {
    pub fn content(&self) -> String {
        self.lines.join("\n").trim().to_string()
    }
}

/// Returns the heading text if `line` is a markdown, bold-only, or ALL-CAPS heading.
pub fn extract_heading(line: &str) -> Option<String> {
    let trimmed = line.trim();

    if let Some(caps) = MD_HEADING_RE.captures(trimmed) {
        return Some(caps[1].trim().to_string());
    }
    if let Some(caps) = BOLD_HEADING_RE.captures(trimmed) {
        return Some(caps[1].trim().to_string());
    }
    if trimmed.chars().count() >= 5
        && trimmed == trimmed.to_uppercase()
        && trimmed.chars().any(|c| c.is_ascii_uppercase())
        && CAPS_HEADING_RE.is_match(trimmed)
    {
        return Some(trimmed.to_string());
    }
    None
}

/// Classifies heading text; case, surrounding whitespace and a trailing colon are ignored.
pub fn classify_heading(heading: &str) -> Option<SectionKind> {
    let normalized = heading.trim().trim_end_matches(':').trim().to_lowercase();
    HEADING_PATTERNS
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|re| re.is_match(&normalized)))
        .map(|(kind, _)| *kind)
}

/// Splits markdown into sections. Lines before the first heading are not collected.
pub fn parse_sections(markdown: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();

    for line in markdown.lines() {
        if let Some(heading) = extract_heading(line) {
            sections.push(Section {
                kind: classify_heading(&heading),
                heading,
                lines: Vec::new(),
            });
        } else if let Some(current) = sections.last_mut() {
            current.lines.push(line.to_string());
        }
    }

    sections
}

/// Content of the last section of `kind`, or `""`.
pub fn section_content(sections: &[Section], kind: SectionKind) -> String {
    sections
        .iter()
        .rev()
        .find(|s| s.kind == Some(kind))
        .map(Section::content)
        .unwrap_or_default()
}
