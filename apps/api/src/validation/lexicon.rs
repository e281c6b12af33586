//! Lexicon of categorized terms that lower the inclusivity or culture score of a JD.
//!
//! Masculine-coded terms follow Gaucher et al. (2011) and Textio research, extrovert-bias
//! phrases follow Deloitte neurodiversity research, red flags come from Glassdoor/Blind data.

use serde::{Deserialize, Serialize};

/// Lexicon category. Declaration order is the order warnings are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermCategory {
    MasculineCoded,
    ExtrovertBias,
    RedFlag,
}

impl TermCategory {
    pub const ALL: [TermCategory; 3] = [
        TermCategory::MasculineCoded,
        TermCategory::ExtrovertBias,
        TermCategory::RedFlag,
    ];

    /// Human-readable prefix used in category issue lines.
    pub fn label(self) -> &'static str {
        match self {
            TermCategory::MasculineCoded => "Masculine-coded",
            TermCategory::ExtrovertBias => "Extrovert-bias",
            TermCategory::RedFlag => "Red flag",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LexiconEntry {
    pub term: &'static str,
    pub category: TermCategory,
    pub suggestion: &'static str,
}

const fn entry(
    term: &'static str,
    category: TermCategory,
    suggestion: &'static str,
) -> LexiconEntry {
    LexiconEntry {
        term,
        category,
        suggestion,
    }
}

use TermCategory::{ExtrovertBias, MasculineCoded, RedFlag};

/// The full lexicon, grouped by category in declaration order.
pub const LEXICON: &[LexiconEntry] = &[
    entry("aggressive", MasculineCoded, "Use \"proactive\" or \"bold\" instead"),
    entry("ambitious", MasculineCoded, "Use \"motivated\" or \"goal-oriented\" instead"),
    entry("assertive", MasculineCoded, "Use \"confident communicator\" instead"),
    entry("competitive", MasculineCoded, "Use \"collaborative\" or \"results-oriented\" instead"),
    entry("confident", MasculineCoded, "Use \"capable\" or \"skilled\" instead"),
    entry("decisive", MasculineCoded, "Use \"sound decision-maker\" instead"),
    entry("determined", MasculineCoded, "Use \"dedicated\" or \"committed\" instead"),
    entry("dominant", MasculineCoded, "Use \"influential\" or \"guiding\" instead"),
    entry("driven", MasculineCoded, "Use \"motivated\" or \"dedicated\" instead"),
    entry("fearless", MasculineCoded, "Use \"resilient\" or \"innovative\" instead"),
    entry("independent", MasculineCoded, "Use \"self-directed\" or \"ownership-focused\" instead"),
    entry("ninja", MasculineCoded, "Use \"expert\" or \"specialist\" instead"),
    entry("rockstar", MasculineCoded, "Use \"expert\" or \"impact player\" instead"),
    entry("guru", MasculineCoded, "Use \"expert\" or \"specialist\" instead"),
    entry("self-reliant", MasculineCoded, "Use \"capable\" or \"resourceful\" instead"),
    entry("self-sufficient", MasculineCoded, "Use \"capable\" or \"resourceful\" instead"),
    entry("superior", MasculineCoded, "Use \"excellent\" or \"skilled\" instead"),
    entry("outgoing", ExtrovertBias, "Use \"collaborative\" or remove if not essential"),
    entry("high-energy", ExtrovertBias, "Use \"dynamic\" or \"engaged\" instead"),
    entry("energetic", ExtrovertBias, "Use \"engaged\" or \"motivated\" instead"),
    entry("people person", ExtrovertBias, "Use \"collaborative\" or \"team-oriented\" instead"),
    entry("gregarious", ExtrovertBias, "Use \"collaborative\" instead"),
    entry(
        "strong communicator",
        ExtrovertBias,
        "Use \"shares ideas clearly via writing, visuals, or discussion\"",
    ),
    entry("excellent verbal", ExtrovertBias, "Use \"communicates effectively\" instead"),
    entry(
        "team player",
        ExtrovertBias,
        "Use \"contributes to team goals through your strengths\"",
    ),
    entry("fast-paced", RedFlag, "Use \"dynamic projects with clear priorities\" instead"),
    entry("like a family", RedFlag, "Use \"supportive, collaborative team\" instead"),
    entry("wear many hats", RedFlag, "Use \"versatile role with growth opportunities\" instead"),
    entry("always-on", RedFlag, "Use \"flexible hours; async work\" instead"),
    entry("hustle", RedFlag, "Use \"dedicated effort\" or \"commitment\" instead"),
    entry("grind", RedFlag, "Use \"dedicated effort\" or \"commitment\" instead"),
    entry("unlimited pto", RedFlag, "Use \"20+ PTO days + recharge policy\" instead"),
    entry("work hard play hard", RedFlag, "Use \"balanced work culture\" instead"),
    entry("hit the ground running", RedFlag, "Use \"ramp up quickly with support\" instead"),
    entry("self-starter", RedFlag, "Use \"self-directed\" or \"ownership-focused\" instead"),
    entry("thick skin", RedFlag, "Use \"resilient\" or \"adaptable\" instead"),
    entry("no ego", RedFlag, "Use \"collaborative\" or \"humble\" instead"),
    entry("drama-free", RedFlag, "Use \"professional\" or \"respectful\" instead"),
    entry("whatever it takes", RedFlag, "Use \"committed to delivering results\" instead"),
    entry("passion required", RedFlag, "Use \"deeply engaged in problem-solving\" instead"),
];

/// Entries of one category, in lexicon order.
pub fn entries_for(category: TermCategory) -> impl Iterator<Item = &'static LexiconEntry> {
    LEXICON.iter().filter(move |e| e.category == category)
}
