use serde::{Deserialize, Serialize};

/// In-band marker that flags a document as an internal posting when no explicit
/// posting type is supplied.
pub const INTERNAL_POSTING_MARKER: &str = "[INTERNAL_POSTING]";

/// Internal postings are only visible to employees, who already have access to
/// pay bands, so compensation transparency is not scored for them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostingType {
    Internal,
    #[default]
    External,
}

impl PostingType {
    pub fn is_internal(self) -> bool {
        self == PostingType::Internal
    }
}

/// Resolves the posting type once per validation. An explicit value always wins;
/// otherwise the document's own marker decides, defaulting to external.
pub fn infer_posting_type(text: &str, explicit: Option<PostingType>) -> PostingType {
    if let Some(posting_type) = explicit {
        return posting_type;
    }
    if text
        .to_ascii_uppercase()
        .contains(INTERNAL_POSTING_MARKER)
    {
        PostingType::Internal
    } else {
        PostingType::External
    }
}
