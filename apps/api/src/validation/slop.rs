//! Slop detection: generic, AI-sounding language.
//!
//! The scorer only depends on the `SlopDetector` trait. `PhraseSlopDetector` is the
//! built-in lexical backend; hosts with a better detector swap it in via `AppState`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw detector output, before the validator scales it into a deduction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlopPenalty {
    pub penalty: f64,
    pub issues: Vec<String>,
}

#[derive(Debug, Error)]
pub enum SlopError {
    /// Raised by remote backends that cannot be reached; the built-in detector never is.
    #[allow(dead_code)]
    #[error("slop detector unavailable: {0}")]
    Unavailable(String),

    #[error("slop detector failed: {0}")]
    Failed(String),
}

/// Carried in `AppState` as `Arc<dyn SlopDetector>`.
pub trait SlopDetector: Send + Sync {
    fn penalty(&self, text: &str) -> Result<SlopPenalty, SlopError>;

    /// Backend name, reported alongside results.
    fn name(&self) -> &'static str;
}

const SLOP_PHRASES: &[&str] = &[
    "in today's fast-paced world",
    "leverage",
    "synergy",
    "cutting-edge",
    "world-class",
    "best-in-class",
    "game-changer",
    "passionate about",
    "dynamic team",
    "innovative solutions",
    "seamless",
    "robust",
    "delve",
    "tapestry",
    "navigate the complexities",
    "unlock the potential",
    "paradigm shift",
    "take it to the next level",
];

/// Points per distinct phrase found.
pub const PHRASE_PENALTY: f64 = 2.0;

/// Ceiling on the raw penalty this backend reports.
pub const MAX_PHRASE_PENALTY: f64 = 15.0;

static SLOP_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    SLOP_PHRASES
        .iter()
        .map(|&phrase| {
            let words: Vec<String> = phrase
                .split(|c: char| c == '-' || c.is_whitespace())
                .filter(|w| !w.is_empty())
                .map(|w| regex::escape(w).replace('\'', "['’]"))
                .collect();
            let re = Regex::new(&format!(r"(?i)\b{}\b", words.join(r"[\s\-]+")))
                .expect("valid slop regex");
            (phrase, re)
        })
        .collect()
});

/// Lexical backend: counts distinct stock phrases.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhraseSlopDetector;

impl SlopDetector for PhraseSlopDetector {
    fn penalty(&self, text: &str) -> Result<SlopPenalty, SlopError> {
        let issues: Vec<String> = SLOP_PATTERNS
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(phrase, _)| format!("Generic phrase: \"{phrase}\""))
            .collect();

        let penalty = (issues.len() as f64 * PHRASE_PENALTY).min(MAX_PHRASE_PENALTY);
        Ok(SlopPenalty { penalty, issues })
    }

    fn name(&self) -> &'static str {
        "phrase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_has_no_penalty() {
        let p = PhraseSlopDetector
            .penalty("You will own the billing service and its on-call rotation.")
            .unwrap();
        assert_eq!(p.penalty, 0.0);
        assert!(p.issues.is_empty());
    }

    #[test]
    fn test_distinct_phrases_accumulate() {
        let p = PhraseSlopDetector
            .penalty("Leverage synergy to build cutting edge, world-class products. Leverage more.")
            .unwrap();
        assert_eq!(p.issues.len(), 4);
        assert_eq!(p.penalty, 8.0);
        assert_eq!(p.issues[0], "Generic phrase: \"leverage\"");
    }

    #[test]
    fn test_penalty_is_capped() {
        let text = SLOP_PHRASES.join(". ");
        let p = PhraseSlopDetector.penalty(&text).unwrap();
        assert_eq!(p.issues.len(), SLOP_PHRASES.len());
        assert_eq!(p.penalty, MAX_PHRASE_PENALTY);
    }

    #[test]
    fn test_curly_apostrophe_variant_matches() {
        let p = PhraseSlopDetector
            .penalty("In today’s fast paced world, we ship.")
            .unwrap();
        assert!(p.issues.iter().any(|i| i.contains("today's")));
    }

    #[test]
    fn test_word_boundaries() {
        let p = PhraseSlopDetector.penalty("Robustness and leveraged buyouts").unwrap();
        assert!(p.issues.is_empty());
    }
}
