use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::extraction::{extract_fields_from_value, ExtractedFields};

/// `markdown` may be any JSON value; non-strings produce an empty record.
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub markdown: Value,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub request_id: Uuid,
    pub extracted_at: DateTime<Utc>,
    pub fields: ExtractedFields,
}

/// POST /api/v1/extract
pub async fn handle_extract(Json(req): Json<ExtractRequest>) -> Json<ExtractResponse> {
    let request_id = Uuid::new_v4();
    let fields = extract_fields_from_value(&req.markdown);
    debug!(
        %request_id,
        filled = fields.filled_count(),
        "extraction complete"
    );

    Json(ExtractResponse {
        request_id,
        extracted_at: Utc::now(),
        fields,
    })
}
