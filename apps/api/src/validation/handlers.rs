use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::validation::lexicon::{entries_for, LexiconEntry, TermCategory, LEXICON};
use crate::validation::posting::PostingType;
use crate::validation::{validate_document, ValidationResult};

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    /// `null` or missing is rejected; the empty string is a valid document.
    pub text: Option<String>,
    pub posting_type: Option<PostingType>,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub request_id: Uuid,
    pub evaluated_at: DateTime<Utc>,
    pub result: ValidationResult,
}

#[derive(Debug, Serialize)]
pub struct LexiconCategory {
    pub category: TermCategory,
    pub label: &'static str,
    pub term_count: usize,
}

#[derive(Debug, Serialize)]
pub struct LexiconResponse {
    pub categories: Vec<LexiconCategory>,
    pub entries: &'static [LexiconEntry],
}

/// POST /api/v1/validate
pub async fn handle_validate(
    State(state): State<AppState>,
    Json(req): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>, AppError> {
    let text = req
        .text
        .ok_or_else(|| AppError::Validation("`text` must be a string".to_string()))?;

    let limit = state.config.max_document_bytes;
    if text.len() > limit {
        return Err(AppError::UnprocessableEntity(format!(
            "document is {} bytes; the limit is {limit}",
            text.len()
        )));
    }

    let request_id = Uuid::new_v4();
    let result = validate_document(&text, req.posting_type, state.slop_detector.as_ref())?;
    debug!(
        %request_id,
        score = result.score,
        grade = ?result.grade,
        word_count = result.word_count,
        warnings = result.warnings.len(),
        "document validated"
    );

    Ok(Json(ValidateResponse {
        request_id,
        evaluated_at: Utc::now(),
        result,
    }))
}

/// GET /api/v1/lexicon
pub async fn handle_lexicon() -> Json<LexiconResponse> {
    let categories = TermCategory::ALL
        .into_iter()
        .map(|category| LexiconCategory {
            category,
            label: category.label(),
            term_count: entries_for(category).count(),
        })
        .collect();
    Json(LexiconResponse {
        categories,
        entries: LEXICON,
    })
}
