//! Best-effort extraction of structured job-description fields from imported markdown.
//!
//! Extraction never fails: any field that cannot be found is the empty string, and
//! input that is not a string yields an all-empty record.

pub mod handlers;
pub mod rules;
pub mod sections;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::extraction::rules::{
    apply_rules, extract_tech_stack, role_level_from_title, JdDocument, COMPANY_RULES,
    COMPENSATION_RULES, LOCATION_RULES, TITLE_RULES,
};
use crate::extraction::sections::SectionKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedFields {
    pub job_title: String,
    pub company_name: String,
    pub role_level: String,
    pub location: String,
    pub responsibilities: String,
    pub required_qualifications: String,
    pub preferred_qualifications: String,
    pub compensation_range: String,
    pub benefits: String,
    pub tech_stack: String,
    pub role_overview: String,
    pub about_company: String,
}

impl ExtractedFields {
    /// Number of fields that carry a value.
    pub fn filled_count(&self) -> usize {
        [
            &self.job_title,
            &self.company_name,
            &self.role_level,
            &self.location,
            &self.responsibilities,
            &self.required_qualifications,
            &self.preferred_qualifications,
            &self.compensation_range,
            &self.benefits,
            &self.tech_stack,
            &self.role_overview,
            &self.about_company,
        ]
        .iter()
        .filter(|v| !v.is_empty())
        .count()
    }
}

pub fn extract_fields(markdown: &str) -> ExtractedFields {
    if markdown.trim().is_empty() {
        return ExtractedFields::default();
    }

    let doc = JdDocument::new(markdown);
    let job_title = apply_rules("job_title", TITLE_RULES, &doc);
    let role_level = role_level_from_title(&job_title);

    let fields = ExtractedFields {
        role_level,
        company_name: apply_rules("company_name", COMPANY_RULES, &doc),
        location: apply_rules("location", LOCATION_RULES, &doc),
        compensation_range: apply_rules("compensation_range", COMPENSATION_RULES, &doc),
        responsibilities: doc.section(SectionKind::Responsibilities),
        required_qualifications: doc.section(SectionKind::Requirements),
        preferred_qualifications: doc.section(SectionKind::Preferred),
        benefits: doc.section(SectionKind::Benefits),
        role_overview: doc.section(SectionKind::RoleOverview),
        about_company: doc.section(SectionKind::About),
        tech_stack: extract_tech_stack(markdown),
        job_title,
    };

    debug!(
        sections = doc.sections.len(),
        filled = fields.filled_count(),
        "fields extracted"
    );
    fields
}

/// Accepts any JSON value; only strings are parsed.
pub fn extract_fields_from_value(value: &Value) -> ExtractedFields {
    match value.as_str() {
        Some(markdown) => extract_fields(markdown),
        None => ExtractedFields::default(),
    }
}
