//! Parsed Record type hierarchy
//!
//! A `ParsedRecord` is the single in-memory result of extracting structured data
//! from one resume. It is produced by the rule-based extractor or the LLM adapter,
//! judged by the confidence scorer, and consumed by the pipeline entry point for
//! persistence. Every field is optional at this layer: absence means "not found",
//! never an empty string.

use serde::{Deserialize, Serialize};

/// Type of an experience entry, inferred during post-processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceType {
    Employment,
    ClinicalPlacement,
    Ojt,
    Volunteer,
}

impl Default for ExperienceType {
    fn default() -> Self {
        Self::Employment
    }
}

/// One work/clinical/volunteer entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default)]
    pub experience_type: ExperienceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ExperienceEntry {
    /// An entry is only emitted when a start date was anchored.
    #[must_use]
    pub fn is_emittable(&self) -> bool {
        self.start_date.is_some()
    }
}

/// One education entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// A credential/license, e.g. NCLEX, IELTS, PRC License.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    #[serde(rename = "type")]
    pub cert_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
}

/// The full structured result of parsing one resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<i32>,
    #[serde(default)]
    pub years_of_experience: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default)]
    pub hospitals: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

impl ParsedRecord {
    /// True when nothing at all was extracted; the orchestrator treats this as
    /// a maximally low-confidence result.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.address.is_none()
            && self.graduation_year.is_none()
            && self.salary.is_none()
            && self.hospitals.is_empty()
            && self.skills.is_empty()
            && self.certifications.is_empty()
            && self.experience.is_empty()
            && self.education.is_empty()
    }

    /// Case-insensitive de-duplication of skills/hospitals/certification types,
    /// preserving first-seen casing.
    pub fn dedup_case_insensitive(&mut self) {
        dedup_preserve_case(&mut self.hospitals);
        dedup_preserve_case(&mut self.skills);

        let mut seen = std::collections::HashSet::new();
        self.certifications.retain(|c| seen.insert(c.cert_type.to_lowercase()));
    }
}

fn dedup_preserve_case(items: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    items.retain(|item| seen.insert(item.to_lowercase()));
}

/// Result of the document decoder: UTF-8 text plus an optional warning
/// surfaced to the caller when decoding partially failed.
#[derive(Debug, Clone)]
pub struct DecodedDocument {
    pub text: String,
    pub warning: Option<String>,
}

/// Outcome of the pipeline entry point, the externally visible shape of
/// `uploadResume`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadOutcome {
    pub resume_id: String,
    pub has_text: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<ParsedRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_is_case_insensitive_and_keeps_first_casing() {
        let mut record = ParsedRecord {
            skills: vec!["IV Therapy".into(), "iv therapy".into(), "BLS".into()],
            hospitals: vec!["St. Luke's".into(), "st. luke's".into()],
            ..Default::default()
        };
        record.dedup_case_insensitive();
        assert_eq!(record.skills, vec!["IV Therapy".to_string(), "BLS".to_string()]);
        assert_eq!(record.hospitals, vec!["St. Luke's".to_string()]);
    }

    #[test]
    fn experience_entry_requires_start_date_to_emit() {
        let entry = ExperienceEntry {
            employer: Some("General Hospital".into()),
            ..Default::default()
        };
        assert!(!entry.is_emittable());
    }

    #[test]
    fn empty_record_reports_empty() {
        assert!(ParsedRecord::default().is_empty());
    }
}
