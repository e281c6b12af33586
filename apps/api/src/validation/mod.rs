// JD quality scoring engine.
// Pipeline: mandated-section strip → lexicon scan → dimension scorers → aggregation.
// Everything here is synchronous and pure apart from the injected slop detector.

pub mod aggregate;
pub mod compensation;
pub mod dimensions;
pub mod handlers;
pub mod lexicon;
pub mod mandated;
pub mod posting;
pub mod scanner;
pub mod slop;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::validation::aggregate::{
    build_categories, grade_for, label_for, total_score, CategoryBreakdown, Grade, ScoreLabel,
};
use crate::validation::dimensions::{
    count_words, score_compensation, score_encouragement, score_extrovert_bias, score_length,
    score_masculine_coded, score_red_flags, score_slop, DimensionDetail, DimensionResult,
};
use crate::validation::mandated::extract_mandated_sections;
use crate::validation::posting::{infer_posting_type, PostingType};
use crate::validation::scanner::{scan_warnings, Warning};
use crate::validation::slop::{SlopDetector, SlopError};

/// Slop detector output as surfaced to callers, with the scaled deduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlopDetection {
    pub backend: String,
    pub penalty: f64,
    pub deduction: u32,
    pub issues: Vec<String>,
}

/// Full result of validating one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub score: u32,
    pub grade: Grade,
    pub label: ScoreLabel,
    pub posting_type: PostingType,
    pub categories: CategoryBreakdown,
    pub warnings: Vec<Warning>,
    pub word_count: usize,
    pub slop_detection: SlopDetection,
    pub dimensions: Vec<DimensionResult>,
    /// Short issue lines, one per penalised dimension.
    pub issues: Vec<String>,
    pub deductions: Vec<String>,
    pub feedback: Vec<String>,
    /// Advisory only: key sections that could not be found. Not scored.
    pub missing_sections: Vec<String>,
}

/// Scores `text` against the JD rubric.
///
/// The empty string is a valid (low-scoring) document. The only failure mode is the
/// slop detector itself failing.
pub fn validate_document(
    text: &str,
    posting_type: Option<PostingType>,
    detector: &dyn SlopDetector,
) -> Result<ValidationResult, SlopError> {
    let posting_type = infer_posting_type(text, posting_type);

    let mandated = extract_mandated_sections(text);
    let warnings = scan_warnings(&mandated.clean_text, &mandated.sections);

    let word_count = count_words(text);
    let slop = score_slop(text, detector)?;
    let (raw_penalty, slop_issues) = match &slop.detail {
        DimensionDetail::Slop {
            raw_penalty,
            issues,
        } => (*raw_penalty, issues.clone()),
        _ => (0.0, Vec::new()),
    };
    let slop_detection = SlopDetection {
        backend: detector.name().to_string(),
        penalty: raw_penalty,
        deduction: slop.penalty,
        issues: slop_issues,
    };

    let dimensions = vec![
        score_length(word_count),
        score_masculine_coded(&warnings),
        score_extrovert_bias(&warnings),
        score_red_flags(&warnings),
        score_compensation(text, posting_type.is_internal()),
        score_encouragement(text),
        slop,
    ];

    let score = total_score(&dimensions);
    let categories = build_categories(&dimensions, &warnings, score);

    Ok(ValidationResult {
        score,
        grade: grade_for(score),
        label: label_for(score),
        posting_type,
        categories,
        warnings,
        word_count,
        slop_detection,
        issues: dimensions.iter().filter_map(DimensionResult::issue).collect(),
        deductions: dimensions.iter().filter_map(|d| d.deduction.clone()).collect(),
        feedback: dimensions.iter().map(|d| d.feedback.clone()).collect(),
        missing_sections: missing_sections(text),
        dimensions,
    })
}

static SECTION_CHECKS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("Responsibilities", r"(?i)responsibilities|what you['’]ll do|key duties"),
        ("Requirements", r"(?i)required|qualifications|requirements"),
        ("Benefits", r"(?i)benefits|what we offer|perks|compensation"),
    ]
    .into_iter()
    .map(|(name, p)| (name, Regex::new(p).expect("valid regex")))
    .collect()
});

/// Key JD sections with no matching keyword anywhere in `text`.
pub fn missing_sections(text: &str) -> Vec<String> {
    SECTION_CHECKS
        .iter()
        .filter(|(_, re)| !re.is_match(text))
        .map(|(name, _)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::dimensions::Dimension;
    use crate::validation::lexicon::{TermCategory, LEXICON};
    use crate::validation::slop::{PhraseSlopDetector, SlopPenalty};

    struct NoSlop;

    impl SlopDetector for NoSlop {
        fn penalty(&self, _text: &str) -> Result<SlopPenalty, SlopError> {
            Ok(SlopPenalty::default())
        }

        fn name(&self) -> &'static str {
            "none"
        }
    }

    struct BrokenSlop;

    impl SlopDetector for BrokenSlop {
        fn penalty(&self, _text: &str) -> Result<SlopPenalty, SlopError> {
            Err(SlopError::Failed("model crashed".to_string()))
        }

        fn name(&self) -> &'static str {
            "broken"
        }
    }

    const COMPLIANT_TAIL: &str = "Salary range: $150,000 - $180,000. \
        If you meet 60-70% of the qualifications, we encourage you to apply.";

    /// A document of exactly `words` tokens that already carries compensation and
    /// encouragement statements, with `extra` spliced in front.
    fn compliant_doc(extra: &str, words: usize) -> String {
        let used = count_words(extra) + count_words(COMPLIANT_TAIL);
        let filler = "build ".repeat(words.saturating_sub(used));
        format!("{extra} {filler}{COMPLIANT_TAIL}")
    }

    fn penalty_of(result: &ValidationResult, dimension: Dimension) -> u32 {
        result
            .dimensions
            .iter()
            .find(|d| d.dimension == dimension)
            .map(|d| d.penalty)
            .unwrap()
    }

    fn assert_consistent(r: &ValidationResult) {
        assert!(r.score <= 100);
        assert_eq!(r.categories.total(), r.score);
        for c in [
            &r.categories.length,
            &r.categories.inclusivity,
            &r.categories.culture,
            &r.categories.transparency,
        ] {
            assert!(c.score <= 25);
            assert_eq!(c.max_score, 25);
        }
    }

    #[test]
    fn test_empty_string_is_valid_low_scoring_input() {
        let r = validate_document("", None, &NoSlop).unwrap();
        assert_eq!(r.word_count, 0);
        // length 15 + compensation 10 + encouragement 5
        assert_eq!(r.score, 70);
        assert_eq!(r.grade, Grade::C);
        assert!(r.warnings.is_empty());
        assert_consistent(&r);
    }

    #[test]
    fn test_compliant_500_word_doc_scores_100() {
        let doc = compliant_doc("", 500);
        let r = validate_document(&doc, None, &NoSlop).unwrap();
        assert_eq!(r.word_count, 500);
        assert_eq!(penalty_of(&r, Dimension::Length), 0);
        assert_eq!(r.score, 100);
        assert_eq!(r.grade, Grade::A);
        assert!(r.issues.is_empty());
        assert!(r.deductions.is_empty());
        assert_eq!(r.feedback.len(), 7);
    }

    #[test]
    fn test_two_masculine_terms_score_90() {
        let doc = compliant_doc("We want a rockstar who is fearless.", 500);
        let r = validate_document(&doc, None, &NoSlop).unwrap();
        assert_eq!(r.warnings.len(), 2);
        assert!(r
            .warnings
            .iter()
            .all(|w| w.category == TermCategory::MasculineCoded));
        assert_eq!(r.score, 90);
        assert_eq!(r.grade, Grade::A);
        assert_eq!(r.categories.inclusivity.score, 15);
        assert_eq!(
            r.categories.inclusivity.issues,
            vec![
                "Masculine-coded: \"fearless\"".to_string(),
                "Masculine-coded: \"rockstar\"".to_string()
            ]
        );
        assert_consistent(&r);
    }

    #[test]
    fn test_200_words_short_penalty() {
        let r = validate_document(&"word ".repeat(200), None, &NoSlop).unwrap();
        assert_eq!(penalty_of(&r, Dimension::Length), 10);
        assert!(r.issues.contains(&"Short (200 words)".to_string()));
    }

    #[test]
    fn test_mandated_exemption_changes_warning_count() {
        let outside = compliant_doc("Our culture is competitive.", 500);
        let inside = compliant_doc(
            "[COMPANY_PREAMBLE]Our culture is competitive.[/COMPANY_PREAMBLE]",
            500,
        );
        let r_out = validate_document(&outside, None, &NoSlop).unwrap();
        let r_in = validate_document(&inside, None, &NoSlop).unwrap();
        assert_eq!(r_out.warnings.len(), 1);
        assert_eq!(r_out.warnings[0].term, "competitive");
        assert!(r_in.warnings.is_empty());
    }

    #[test]
    fn test_internal_posting_skips_compensation() {
        let doc = "If you meet most of the requirements, please apply. ".repeat(50);
        let external = validate_document(&doc, None, &NoSlop).unwrap();
        let internal = validate_document(&doc, Some(PostingType::Internal), &NoSlop).unwrap();
        assert_eq!(penalty_of(&external, Dimension::Compensation), 10);
        assert_eq!(penalty_of(&internal, Dimension::Compensation), 0);
        assert_eq!(internal.score, external.score + 10);

        let marked = format!("[INTERNAL_POSTING]\n{doc}");
        let inferred = validate_document(&marked, None, &NoSlop).unwrap();
        assert_eq!(inferred.posting_type, PostingType::Internal);
        assert_eq!(penalty_of(&inferred, Dimension::Compensation), 0);
    }

    #[test]
    fn test_toxic_doc_stays_consistent() {
        let every_term: Vec<&str> = LEXICON.iter().map(|e| e.term).collect();
        let doc = every_term.join(". ").repeat(3);
        let r = validate_document(&doc, None, &PhraseSlopDetector).unwrap();
        assert_eq!(r.warnings.len(), LEXICON.len());
        assert_eq!(r.categories.inclusivity.score, 0);
        assert_eq!(r.categories.culture.score, 0);
        assert_eq!(r.grade, Grade::F);
        assert_consistent(&r);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let doc = compliant_doc("A fast-paced team of ninjas. Leverage synergy.", 450);
        let a = validate_document(&doc, None, &PhraseSlopDetector).unwrap();
        let b = validate_document(&doc, None, &PhraseSlopDetector).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_adding_terms_never_raises_score() {
        let mut extra = String::new();
        let mut previous = validate_document(&compliant_doc("", 500), None, &NoSlop)
            .unwrap()
            .score;
        for entry in LEXICON {
            extra.push_str(entry.term);
            extra.push_str(". ");
            let score = validate_document(&compliant_doc(&extra, 500), None, &NoSlop)
                .unwrap()
                .score;
            assert!(score <= previous, "adding {} raised the score", entry.term);
            previous = score;
        }
    }

    #[test]
    fn test_slop_detection_is_surfaced() {
        let doc = compliant_doc("Leverage synergy with cutting-edge, world-class tools.", 500);
        let r = validate_document(&doc, None, &PhraseSlopDetector).unwrap();
        assert_eq!(r.slop_detection.backend, "phrase");
        assert_eq!(r.slop_detection.penalty, 8.0);
        assert_eq!(r.slop_detection.deduction, 4);
        assert_eq!(r.slop_detection.issues.len(), 2);
        assert_eq!(r.score, 96);
        assert!(r
            .categories
            .culture
            .issues
            .contains(&"AI patterns detected (-4)".to_string()));
    }

    #[test]
    fn test_slop_failure_is_not_masked() {
        assert!(validate_document("text", None, &BrokenSlop).is_err());
    }

    #[test]
    fn test_missing_sections_advisory() {
        assert_eq!(
            missing_sections("Nothing relevant"),
            vec!["Responsibilities", "Requirements", "Benefits"]
        );
        assert!(missing_sections(
            "## Responsibilities\n## Requirements\n## What we offer"
        )
        .is_empty());
    }
}
