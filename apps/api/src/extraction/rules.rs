//! Field extraction rules. Each field has an ordered list of named rules; the first
//! rule producing a non-empty value wins.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::extraction::sections::{parse_sections, section_content, Section, SectionKind};
use crate::validation::compensation::find_compensation_range;

pub const MAX_TITLE_CHARS: usize = 150;
pub const MIN_FALLBACK_TITLE_CHARS: usize = 5;

/// Pre-split view of one markdown document, shared by every rule.
pub struct JdDocument<'a> {
    pub markdown: &'a str,
    pub lines: Vec<&'a str>,
    pub sections: Vec<Section>,
}

impl<'a> JdDocument<'a> {
    pub fn new(markdown: &'a str) -> Self {
        Self {
            markdown,
            lines: markdown.lines().collect(),
            sections: parse_sections(markdown),
        }
    }

    pub fn section(&self, kind: SectionKind) -> String {
        section_content(&self.sections, kind)
    }
}

pub struct FieldRule {
    pub name: &'static str,
    pub extract: fn(&JdDocument<'_>) -> Option<String>,
}

/// Runs `rules` in order and returns the first non-empty value, or `""`.
pub fn apply_rules(field: &'static str, rules: &[FieldRule], doc: &JdDocument<'_>) -> String {
    for rule in rules {
        if let Some(value) = (rule.extract)(doc) {
            let value = value.trim();
            if !value.is_empty() {
                trace!(field, rule = rule.name, "field extracted");
                return value.to_string();
            }
        }
    }
    String::new()
}

// ────────────────────────────────────────────────────────────────────────────
// Job title
// ────────────────────────────────────────────────────────────────────────────

static H1_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#[ \t]+(\S.*?)[ \t\r]*$").expect("valid regex"));
static TITLE_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^job description:\s*").expect("valid regex"));
static BARE_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#{1,3}\s*$").expect("valid regex"));
static RULE_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-=*]{3,}$").expect("valid regex"));
static LEADING_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#{1,3}\s*").expect("valid regex"));

pub const TITLE_RULES: &[FieldRule] = &[
    FieldRule {
        name: "h1_heading",
        extract: title_from_h1,
    },
    FieldRule {
        name: "first_line",
        extract: title_from_first_line,
    },
];

fn title_from_h1(doc: &JdDocument<'_>) -> Option<String> {
    let caps = H1_RE.captures(doc.markdown)?;
    let title = TITLE_PREFIX_RE.replace(&caps[1], "").trim().to_string();
    (title.chars().count() <= MAX_TITLE_CHARS).then_some(title)
}

fn title_from_first_line(doc: &JdDocument<'_>) -> Option<String> {
    doc.lines.iter().find_map(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || BARE_MARKER_RE.is_match(trimmed) || RULE_LINE_RE.is_match(trimmed)
        {
            return None;
        }
        let title = LEADING_MARKER_RE
            .replace(trimmed, "")
            .replace("**", "")
            .trim()
            .to_string();
        let len = title.chars().count();
        (MIN_FALLBACK_TITLE_CHARS..=MAX_TITLE_CHARS)
            .contains(&len)
            .then_some(title)
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Role level
// ────────────────────────────────────────────────────────────────────────────

/// (needle, label), first match in the lowercased title wins.
pub const ROLE_LEVELS: &[(&str, &str)] = &[
    ("principal", "Principal"),
    ("staff", "Staff"),
    ("senior", "Senior"),
    ("sr", "Sr"),
    ("lead", "Lead"),
    ("director", "Director"),
    ("manager", "Manager"),
    ("junior", "Junior"),
    ("jr", "Jr"),
    ("associate", "Associate"),
    ("entry", "Entry"),
    ("intern", "Intern"),
    ("head of", "Head of"),
    ("vp", "VP"),
    ("chief", "Chief"),
];

pub fn role_level_from_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    ROLE_LEVELS
        .iter()
        .find(|(needle, _)| lowered.contains(needle))
        .map(|(_, label)| label.to_string())
        .unwrap_or_default()
}

// ────────────────────────────────────────────────────────────────────────────
// Company name
// ────────────────────────────────────────────────────────────────────────────

const PROPER_NOUN: &str = r"[A-Z][A-Za-z0-9&\-]*(?:[ \t]+(?:&[ \t]+)?[A-Z][A-Za-z0-9&\-]*){0,5}";

static COMPANY_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t*_\-]*(?:company|company name|employer|organization)[ \t*_]*:[ \t*_]*(.+?)[ \t*_\r]*$")
        .expect("valid regex")
});
static AT_COMPANY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i:\bat)[ \t]+({PROPER_NOUN})(?:[,.]|[ \t]+(?i:we|our|is)\b)"
    ))
    .expect("valid regex")
});
static ABOUT_SUBJECT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^({PROPER_NOUN})[ \t]+(?:is|was|has)\b")).expect("valid regex")
});

const MIN_COMPANY_CHARS: usize = 3;
const MAX_COMPANY_CHARS: usize = 40;

pub const COMPANY_RULES: &[FieldRule] = &[
    FieldRule {
        name: "company_label",
        extract: company_from_label,
    },
    FieldRule {
        name: "at_company",
        extract: company_from_at_phrase,
    },
    FieldRule {
        name: "about_section",
        extract: company_from_about,
    },
];

fn plausible_company(name: &str) -> Option<String> {
    let name = name.trim();
    let len = name.chars().count();
    let is_article = name.to_lowercase().starts_with("the ");
    ((MIN_COMPANY_CHARS..=MAX_COMPANY_CHARS).contains(&len) && !is_article)
        .then(|| name.to_string())
}

fn company_from_label(doc: &JdDocument<'_>) -> Option<String> {
    let caps = COMPANY_LABEL_RE.captures(doc.markdown)?;
    plausible_company(&caps[1])
}

fn company_from_at_phrase(doc: &JdDocument<'_>) -> Option<String> {
    AT_COMPANY_RE
        .captures_iter(doc.markdown)
        .find_map(|caps| plausible_company(&caps[1]))
}

fn company_from_about(doc: &JdDocument<'_>) -> Option<String> {
    let about = doc.section(SectionKind::About);
    let caps = ABOUT_SUBJECT_RE.captures(about.trim_start())?;
    plausible_company(&caps[1])
}

// ────────────────────────────────────────────────────────────────────────────
// Location
// ────────────────────────────────────────────────────────────────────────────

static LOCATION_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t*_\-]*(?:location|office location|office|based in)[ \t*_]*:[ \t*_]*(.+?)[ \t*_\r]*$")
        .expect("valid regex")
});
static BASED_IN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i:\bbased in)[ \t]+([A-Z][A-Za-z]*(?:,?[ \t]+[A-Z][A-Za-z]*){0,4})")
        .expect("valid regex")
});
static ARRANGEMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(fully remote|remote[- ]first|remote|hybrid|on[- ]site)\b")
        .expect("valid regex")
});

const MAX_LOCATION_CHARS: usize = 100;

pub const LOCATION_RULES: &[FieldRule] = &[
    FieldRule {
        name: "location_label",
        extract: location_from_label,
    },
    FieldRule {
        name: "based_in",
        extract: location_from_based_in,
    },
    FieldRule {
        name: "work_arrangement",
        extract: location_from_arrangement,
    },
];

fn location_from_label(doc: &JdDocument<'_>) -> Option<String> {
    let caps = LOCATION_LABEL_RE.captures(doc.markdown)?;
    let location = caps[1].trim();
    (location.chars().count() <= MAX_LOCATION_CHARS).then(|| location.to_string())
}

fn location_from_based_in(doc: &JdDocument<'_>) -> Option<String> {
    let caps = BASED_IN_RE.captures(doc.markdown)?;
    Some(caps[1].to_string())
}

fn location_from_arrangement(doc: &JdDocument<'_>) -> Option<String> {
    ARRANGEMENT_RE
        .captures(doc.markdown)
        .map(|caps| caps[1].to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Compensation
// ────────────────────────────────────────────────────────────────────────────

pub const COMPENSATION_RULES: &[FieldRule] = &[FieldRule {
    name: "currency_range",
    extract: compensation_range,
}];

fn compensation_range(doc: &JdDocument<'_>) -> Option<String> {
    find_compensation_range(doc.markdown).map(str::to_string)
}

// ────────────────────────────────────────────────────────────────────────────
// Tech stack
// ────────────────────────────────────────────────────────────────────────────

/// Known technology keywords, matched case-insensitively on word boundaries.
pub const TECH_KEYWORDS: &[&str] = &[
    "aws", "azure", "gcp", "react", "vue", "angular", "node", "nodejs", "python", "java",
    "javascript", "typescript", "go", "golang", "rust", "docker", "kubernetes", "k8s",
    "sql", "postgresql", "mysql", "mongodb", "redis", "kafka", "rabbitmq", "graphql",
    "rest", "api", "tensorflow", "pytorch", "llm", "gpt", "openai", "claude", "asr", "tts",
    "nlp", "ml", "ai", "sip", "webrtc", "twilio",
];

static TECH_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    TECH_KEYWORDS
        .iter()
        .map(|&keyword| {
            let pattern = format!(r"(?i)\b{}s?\b", regex::escape(keyword));
            (keyword, Regex::new(&pattern).expect("valid tech regex"))
        })
        .collect()
});

/// Known technologies mentioned anywhere in the document, in keyword-list order,
/// spelled as they first appear (plural suffix dropped), comma-joined.
pub fn extract_tech_stack(markdown: &str) -> String {
    let mut found: Vec<String> = Vec::new();
    for (keyword, re) in TECH_PATTERNS.iter() {
        let Some(m) = re.find(markdown) else {
            continue;
        };
        let spelled = m.as_str().get(..keyword.len()).unwrap_or(m.as_str());
        if !found.iter().any(|f| f.eq_ignore_ascii_case(spelled)) {
            found.push(spelled.to_string());
        }
    }
    found.join(", ")
}
