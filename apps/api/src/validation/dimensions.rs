//! Dimension scorers. Each is a pure function returning the penalty it deducts from
//! the 100-point starting score, the cap it was clamped to, and feedback lines.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::validation::compensation::find_compensation_range;
use crate::validation::lexicon::TermCategory;
use crate::validation::scanner::Warning;
use crate::validation::slop::{SlopDetector, SlopError};

pub const IDEAL_MIN_WORDS: usize = 400;
pub const IDEAL_MAX_WORDS: usize = 700;
pub const SHORT_WORDS_PER_POINT: usize = 20;
pub const LONG_WORDS_PER_POINT: usize = 50;
pub const MAX_SHORT_PENALTY: u32 = 15;
pub const MAX_LONG_PENALTY: u32 = 10;

pub const PENALTY_PER_TERM: u32 = 5;
pub const MAX_MASCULINE_PENALTY: u32 = 25;
pub const MAX_EXTROVERT_PENALTY: u32 = 20;
pub const MAX_RED_FLAG_PENALTY: u32 = 25;

pub const COMPENSATION_PENALTY: u32 = 10;
pub const ENCOURAGEMENT_PENALTY: u32 = 5;

pub const MAX_SLOP_PENALTY: u32 = 5;
pub const SLOP_SCALE: f64 = 0.6;
pub const MAX_SLOP_ISSUES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Length,
    MasculineCoded,
    ExtrovertBias,
    RedFlag,
    Compensation,
    Encouragement,
    Slop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthBand {
    Short,
    Ideal,
    Long,
}

/// Dimension-specific output carried next to the common penalty fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DimensionDetail {
    Length {
        word_count: usize,
        band: LengthBand,
    },
    Lexicon {
        count: usize,
        terms: Vec<String>,
    },
    Compensation {
        skipped: bool,
        range: Option<String>,
    },
    Encouragement {
        matched: Option<String>,
    },
    Slop {
        raw_penalty: f64,
        issues: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionResult {
    pub dimension: Dimension,
    pub penalty: u32,
    pub max_penalty: u32,
    pub feedback: String,
    /// `-N pts: reason`, present only when `penalty > 0`.
    pub deduction: Option<String>,
    pub detail: DimensionDetail,
}

impl DimensionResult {
    /// Issue line for the flat issue list, present only when a penalty applied.
    pub fn issue(&self) -> Option<String> {
        if self.penalty == 0 {
            return None;
        }
        let line = match &self.detail {
            DimensionDetail::Length { word_count, band } => match band {
                LengthBand::Short => format!("Short ({word_count} words)"),
                _ => format!("Long ({word_count} words)"),
            },
            DimensionDetail::Lexicon { count, .. } => match self.dimension {
                Dimension::MasculineCoded => format!("{count} masculine-coded word(s)"),
                Dimension::ExtrovertBias => format!("{count} extrovert-bias phrase(s)"),
                _ => format!("{count} red flag phrase(s)"),
            },
            DimensionDetail::Compensation { .. } => "No compensation range".to_string(),
            DimensionDetail::Encouragement { .. } => "Missing encouragement statement".to_string(),
            DimensionDetail::Slop { .. } => format!("AI patterns detected (-{})", self.penalty),
        };
        Some(line)
    }
}

/// Whitespace-delimited token count.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn score_length(word_count: usize) -> DimensionResult {
    let (band, penalty, max_penalty) = if word_count < IDEAL_MIN_WORDS {
        let raw = ((IDEAL_MIN_WORDS - word_count) / SHORT_WORDS_PER_POINT) as u32;
        (LengthBand::Short, raw.min(MAX_SHORT_PENALTY), MAX_SHORT_PENALTY)
    } else if word_count > IDEAL_MAX_WORDS {
        let raw = ((word_count - IDEAL_MAX_WORDS) / LONG_WORDS_PER_POINT) as u32;
        (LengthBand::Long, raw.min(MAX_LONG_PENALTY), MAX_LONG_PENALTY)
    } else {
        (LengthBand::Ideal, 0, MAX_SHORT_PENALTY)
    };

    let (feedback, deduction) = match band {
        LengthBand::Ideal => (
            format!(
                "Good length: {word_count} words (ideal: {IDEAL_MIN_WORDS}-{IDEAL_MAX_WORDS})"
            ),
            None,
        ),
        LengthBand::Short => (
            format!("Short: {word_count} words (aim for {IDEAL_MIN_WORDS}-{IDEAL_MAX_WORDS})"),
            Some(format!(
                "-{penalty} pts: Too short ({word_count} words, aim for {IDEAL_MIN_WORDS}+)"
            )),
        ),
        LengthBand::Long => (
            format!("Long: {word_count} words (aim for {IDEAL_MIN_WORDS}-{IDEAL_MAX_WORDS})"),
            Some(format!(
                "-{penalty} pts: Too long ({word_count} words, aim for <={IDEAL_MAX_WORDS})"
            )),
        ),
    };

    DimensionResult {
        dimension: Dimension::Length,
        penalty,
        max_penalty,
        feedback,
        deduction: deduction.filter(|_| penalty > 0),
        detail: DimensionDetail::Length { word_count, band },
    }
}

fn score_lexicon(
    warnings: &[Warning],
    category: TermCategory,
    dimension: Dimension,
    max_penalty: u32,
    noun: &str,
) -> DimensionResult {
    let terms: Vec<String> = warnings
        .iter()
        .filter(|w| w.category == category)
        .map(|w| w.term.clone())
        .collect();
    let count = terms.len();
    let penalty = (count as u32)
        .saturating_mul(PENALTY_PER_TERM)
        .min(max_penalty);

    let (feedback, deduction) = if count == 0 {
        (format!("No {noun}s"), None)
    } else {
        (
            format!("{count} {noun}(s) found"),
            Some(format!("-{penalty} pts: {count} {noun}(s)")),
        )
    };

    DimensionResult {
        dimension,
        penalty,
        max_penalty,
        feedback,
        deduction,
        detail: DimensionDetail::Lexicon { count, terms },
    }
}

pub fn score_masculine_coded(warnings: &[Warning]) -> DimensionResult {
    score_lexicon(
        warnings,
        TermCategory::MasculineCoded,
        Dimension::MasculineCoded,
        MAX_MASCULINE_PENALTY,
        "masculine-coded word",
    )
}

pub fn score_extrovert_bias(warnings: &[Warning]) -> DimensionResult {
    score_lexicon(
        warnings,
        TermCategory::ExtrovertBias,
        Dimension::ExtrovertBias,
        MAX_EXTROVERT_PENALTY,
        "extrovert-bias phrase",
    )
}

pub fn score_red_flags(warnings: &[Warning]) -> DimensionResult {
    score_lexicon(
        warnings,
        TermCategory::RedFlag,
        Dimension::RedFlag,
        MAX_RED_FLAG_PENALTY,
        "red flag phrase",
    )
}

/// Internal postings skip this check entirely.
pub fn score_compensation(text: &str, is_internal: bool) -> DimensionResult {
    if is_internal {
        return DimensionResult {
            dimension: Dimension::Compensation,
            penalty: 0,
            max_penalty: COMPENSATION_PENALTY,
            feedback: "Compensation check skipped for internal posting".to_string(),
            deduction: None,
            detail: DimensionDetail::Compensation {
                skipped: true,
                range: None,
            },
        };
    }

    let range = find_compensation_range(text).map(str::to_string);
    let (penalty, feedback, deduction) = match &range {
        Some(r) => (0, format!("Compensation range included ({r})"), None),
        None => (
            COMPENSATION_PENALTY,
            "No compensation range found".to_string(),
            Some(format!(
                "-{COMPENSATION_PENALTY} pts: No compensation range found"
            )),
        ),
    };

    DimensionResult {
        dimension: Dimension::Compensation,
        penalty,
        max_penalty: COMPENSATION_PENALTY,
        feedback,
        deduction,
        detail: DimensionDetail::Compensation {
            skipped: false,
            range,
        },
    }
}

/// Phrases that tell under-qualified candidates they should still apply.
/// "don't meet all" only counts next to "qualifications"/"requirements".
static ENCOURAGEMENT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b60\s*%?\s*(?:-|–|—|to)\s*70\s*(?:%|\s?percent)",
        r"(?i)\bmeet\s+most\b[^.!?\n]{0,40}?\b(?:qualifications|requirements)\b",
        r"(?i)\bencourag(?:e|ed|es|ing)\b[^.!?\n]{0,80}?\bapply",
        r"(?i)\b(?:don['’]?t|do\s+not)\s+(?:yet\s+)?meet\s+(?:all|every)\b[^.!?\n]{0,40}?\b(?:qualifications|requirements)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// First encouragement phrase in `text`, if any.
pub fn find_encouragement(text: &str) -> Option<&str> {
    ENCOURAGEMENT_PATTERNS
        .iter()
        .filter_map(|re| re.find(text))
        .min_by_key(|m| m.start())
        .map(|m| m.as_str())
}

pub fn score_encouragement(text: &str) -> DimensionResult {
    let matched = find_encouragement(text).map(str::to_string);
    let (penalty, feedback, deduction) = if matched.is_some() {
        (0, "Includes encouragement statement".to_string(), None)
    } else {
        (
            ENCOURAGEMENT_PENALTY,
            "Missing encouragement statement (e.g., \"If you meet 60-70% of the qualifications...\")"
                .to_string(),
            Some(format!(
                "-{ENCOURAGEMENT_PENALTY} pts: Missing \"60-70%\" encouragement statement"
            )),
        )
    };

    DimensionResult {
        dimension: Dimension::Encouragement,
        penalty,
        max_penalty: ENCOURAGEMENT_PENALTY,
        feedback,
        deduction,
        detail: DimensionDetail::Encouragement { matched },
    }
}

/// Scales the detector's raw penalty: `min(5, floor(raw * 0.6))`.
/// Detector failures propagate; there is no fallback for this dimension.
pub fn score_slop(text: &str, detector: &dyn SlopDetector) -> Result<DimensionResult, SlopError> {
    let raw = detector.penalty(text)?;
    if !raw.penalty.is_finite() {
        return Err(SlopError::Failed(format!(
            "{} returned a non-finite penalty",
            detector.name()
        )));
    }
    let scaled = (raw.penalty.max(0.0) * SLOP_SCALE).floor();
    let penalty = (scaled as u32).min(MAX_SLOP_PENALTY);
    let issues: Vec<String> = raw.issues.into_iter().take(MAX_SLOP_ISSUES).collect();

    let (feedback, deduction) = if penalty > 0 {
        (
            "AI-generated language detected - consider making more authentic".to_string(),
            Some(format!("-{penalty} pts: AI slop detected")),
        )
    } else {
        ("No generic AI patterns".to_string(), None)
    };

    Ok(DimensionResult {
        dimension: Dimension::Slop,
        penalty,
        max_penalty: MAX_SLOP_PENALTY,
        feedback,
        deduction,
        detail: DimensionDetail::Slop {
            raw_penalty: raw.penalty,
            issues,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::slop::SlopPenalty;

    struct FixedSlop(f64, Vec<&'static str>);

    impl SlopDetector for FixedSlop {
        fn penalty(&self, _text: &str) -> Result<SlopPenalty, SlopError> {
            Ok(SlopPenalty {
                penalty: self.0,
                issues: self.1.iter().map(|s| s.to_string()).collect(),
            })
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    struct FailingSlop;

    impl SlopDetector for FailingSlop {
        fn penalty(&self, _text: &str) -> Result<SlopPenalty, SlopError> {
            Err(SlopError::Unavailable("offline".to_string()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn warning(category: TermCategory, term: &str) -> Warning {
        Warning {
            category,
            term: term.to_string(),
            matched_text: term.to_string(),
            suggestion: String::new(),
        }
    }

    #[test]
    fn test_count_words_ignores_runs_of_whitespace() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \n\t "), 0);
        assert_eq!(count_words("  one two\n\nthree\tfour "), 4);
        assert_eq!(count_words(&"word ".repeat(500)), 500);
    }

    #[test]
    fn test_length_ideal_band_has_no_penalty() {
        for n in [400, 500, 700] {
            let r = score_length(n);
            assert_eq!(r.penalty, 0, "n={n}");
            assert!(r.deduction.is_none());
            assert!(r.issue().is_none());
        }
    }

    #[test]
    fn test_length_short_penalty() {
        let r = score_length(200);
        assert_eq!(r.penalty, 10);
        assert_eq!(r.max_penalty, 15);
        assert_eq!(r.issue().as_deref(), Some("Short (200 words)"));
        assert_eq!(score_length(399).penalty, 0);
        assert_eq!(score_length(380).penalty, 1);
        assert_eq!(score_length(0).penalty, 15);
    }

    #[test]
    fn test_length_long_penalty() {
        assert_eq!(score_length(749).penalty, 0);
        assert_eq!(score_length(750).penalty, 1);
        let r = score_length(5000);
        assert_eq!(r.penalty, 10);
        assert_eq!(r.max_penalty, 10);
        assert_eq!(r.issue().as_deref(), Some("Long (5000 words)"));
    }

    #[test]
    fn test_short_with_zero_penalty_has_no_deduction_line() {
        let r = score_length(390);
        assert_eq!(r.penalty, 0);
        assert!(r.deduction.is_none());
        assert!(r.issue().is_none());
    }

    #[test]
    fn test_lexicon_dimensions_scale_and_cap() {
        let masculine: Vec<Warning> = ["a", "b", "c", "d", "e", "f"]
            .iter()
            .map(|t| warning(TermCategory::MasculineCoded, t))
            .collect();
        assert_eq!(score_masculine_coded(&masculine[..2]).penalty, 10);
        assert_eq!(score_masculine_coded(&masculine).penalty, 25);

        let extro: Vec<Warning> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|t| warning(TermCategory::ExtrovertBias, t))
            .collect();
        assert_eq!(score_extrovert_bias(&extro).penalty, 20);
        assert_eq!(score_extrovert_bias(&masculine).penalty, 0);

        let red = vec![warning(TermCategory::RedFlag, "hustle")];
        let r = score_red_flags(&red);
        assert_eq!(r.penalty, 5);
        assert_eq!(r.deduction.as_deref(), Some("-5 pts: 1 red flag phrase(s)"));
        assert_eq!(r.issue().as_deref(), Some("1 red flag phrase(s)"));
    }

    #[test]
    fn test_compensation_missing_and_present() {
        assert_eq!(score_compensation("No pay info here", false).penalty, 10);
        let r = score_compensation("Salary range $150,000 - $180,000.", false);
        assert_eq!(r.penalty, 0);
        assert_eq!(
            r.detail,
            DimensionDetail::Compensation {
                skipped: false,
                range: Some("$150,000 - $180,000".to_string())
            }
        );
    }

    #[test]
    fn test_compensation_skipped_for_internal() {
        let r = score_compensation("No pay info here", true);
        assert_eq!(r.penalty, 0);
        assert!(matches!(
            r.detail,
            DimensionDetail::Compensation { skipped: true, .. }
        ));
    }

    #[test]
    fn test_encouragement_accepted_phrases() {
        for text in [
            "If you meet 60-70% of the qualifications, please apply.",
            "Meeting 60 to 70 percent of these is enough.",
            "If you meet most of the requirements, reach out.",
            "We encourage people from all backgrounds to apply.",
            "You are encouraged to apply even if unsure.",
            "If you don't meet all the qualifications, still apply",
            "Even if you do not meet every one of the requirements, talk to us.",
        ] {
            assert_eq!(score_encouragement(text).penalty, 0, "text: {text}");
        }
    }

    #[test]
    fn test_encouragement_requires_qualifier_context() {
        for text in [
            "We don't meet all our goals",
            "You will meet most stakeholders weekly.",
            "",
        ] {
            let r = score_encouragement(text);
            assert_eq!(r.penalty, 5, "text: {text}");
            assert_eq!(r.issue().as_deref(), Some("Missing encouragement statement"));
        }
    }

    #[test]
    fn test_compensation_accepts_unlisted_currency_code() {
        let r = score_compensation("Base pay CNY 300,000 - 500,000 per year", false);
        assert_eq!(r.penalty, 0);
        assert_eq!(
            r.detail,
            DimensionDetail::Compensation {
                skipped: false,
                range: Some("CNY 300,000 - 500,000".to_string()),
            }
        );
    }

    #[test]
    fn test_slop_rejects_non_finite_penalty() {
        let detector = FixedSlop(f64::NAN, vec![]);
        assert!(matches!(
            score_slop("text", &detector),
            Err(SlopError::Failed(_))
        ));
    }

    #[test]
    fn test_slop_scaling_and_cap() {
        let r = score_slop("x", &FixedSlop(4.0, vec!["a", "b", "c"])).unwrap();
        assert_eq!(r.penalty, 2);
        assert_eq!(
            r.detail,
            DimensionDetail::Slop {
                raw_penalty: 4.0,
                issues: vec!["a".to_string(), "b".to_string()]
            }
        );
        assert_eq!(score_slop("x", &FixedSlop(1.0, vec![])).unwrap().penalty, 0);
        assert_eq!(score_slop("x", &FixedSlop(30.0, vec![])).unwrap().penalty, 5);
        assert_eq!(score_slop("x", &FixedSlop(-3.0, vec![])).unwrap().penalty, 0);
    }

    #[test]
    fn test_slop_failure_propagates() {
        assert!(matches!(
            score_slop("x", &FailingSlop),
            Err(SlopError::Unavailable(_))
        ));
    }
}
