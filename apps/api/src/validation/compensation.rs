//! Currency-range matching, shared by the compensation scorer and the field extractor.

use once_cell::sync::Lazy;
use regex::Regex;

/// Symbol-prefixed range: `$120,000 - $150,000`, `$100K–$150K`, `€60k to 75k`.
static SYMBOL_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[$€£¥]\s?\d[\d,]*(?:\.\d+)?\s?[kK]?\s*(?:-|–|—|to)\s*[$€£¥]?\s?\d[\d,]*(?:\.\d+)?\s?[kK]?",
    )
    .expect("valid regex")
});

/// Three-letter currency code directly before or after a numeric range:
/// `USD 120,000 - 150,000`, `90k-110k EUR`, `CNY 300,000 - 500,000`.
static CODE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    let codes = "[A-Z]{3}";
    let amount = r"\d[\d,]*(?:\.\d+)?\s?[kK]?";
    let dash = r"\s*(?:-|–|—|to)\s*";
    Regex::new(&format!(
        r"\b(?:{codes})\s?{amount}{dash}(?:(?:{codes})\s?)?{amount}|{amount}{dash}{amount}\s?(?:{codes})\b"
    ))
    .expect("valid regex")
});

/// Returns the first currency range in `text`, trimmed.
pub fn find_compensation_range(text: &str) -> Option<&str> {
    [&*SYMBOL_RANGE_RE, &*CODE_RANGE_RE]
        .iter()
        .filter_map(|re| re.find(text))
        .min_by_key(|m| m.start())
        .map(|m| m.as_str().trim())
}
