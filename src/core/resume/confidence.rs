//! Confidence Scorer
//!
//! Weighted 0-100 score over a `ParsedRecord`, with targeted penalties for
//! known rule-based failure modes. Mirrors the weighted-signal idiom of the
//! teacher's (orphaned but style-grounding) `ats_analyzer.rs`.

use crate::core::resume::types::{ExperienceType, ParsedRecord};
use once_cell::sync::Lazy;
use regex::Regex;

static WORK_KEYWORDS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bexperience\b|\bemployed\b|\bworked\b|\bposition\b").expect("static regex"));
static CLINICAL_SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)clinical\s+placement|clinical\s+rotation|consolidation\s+hours").expect("static regex")
});

fn entry_is_sane(e: &crate::core::resume::types::ExperienceEntry) -> bool {
    let position_ok = e.position.as_deref().map_or(true, |p| p.len() < 60);
    let employer_ok = e
        .employer
        .as_deref()
        .map_or(true, |emp| emp.split_whitespace().count() <= 8 && !emp.ends_with('.') && !emp.ends_with('!'));
    position_ok && employer_ok
}

/// Score `record` against its source `text` (when available). A `None` text
/// means the raw-text-dependent penalties are skipped — used when scoring an
/// LLM-produced record.
#[must_use]
pub fn score(record: &ParsedRecord, text: Option<&str>) -> i32 {
    let mut total: i32 = 0;

    let has_sane_complete_entry = record
        .experience
        .iter()
        .any(|e| e.position.is_some() && e.employer.is_some() && e.start_date.is_some() && entry_is_sane(e));

    if has_sane_complete_entry {
        total += 30;
    } else if !record.experience.is_empty() {
        total += 5;
    }

    if !record.experience.is_empty() {
        let missing = record
            .experience
            .iter()
            .filter(|e| e.position.is_none() || e.employer.is_none())
            .count();
        if missing * 2 > record.experience.len() {
            total -= 15;
        }
    }

    let has_strong_education = record
        .education
        .iter()
        .any(|e| e.degree.is_some() && e.institution.as_deref().is_some_and(|i| i.len() < 80));
    if has_strong_education {
        total += 25;
    } else if !record.education.is_empty() {
        total += 8;
    }

    if record.summary.as_deref().is_some_and(|s| s.len() > 30) {
        total += 10;
    }

    if !record.certifications.is_empty() {
        total += 10;
    }

    if record.skills.len() >= 3 {
        total += 10;
    }

    if record.address.is_some() {
        total += 5;
    }

    if record.experience.iter().any(|e| e.description.is_some()) {
        total += 10;
    }

    if let Some(text) = text {
        if WORK_KEYWORDS_RE.is_match(text) && record.experience.is_empty() {
            total -= 15;
        }

        let mentions_clinical = CLINICAL_SECTION_RE.is_match(text);
        let has_clinical_entry = record
            .experience
            .iter()
            .any(|e| e.experience_type == ExperienceType::ClinicalPlacement);
        if mentions_clinical && !has_clinical_entry {
            total -= 15;
        }
    }

    total.max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resume::types::ExperienceEntry;

    #[test]
    fn empty_record_scores_zero() {
        assert_eq!(score(&ParsedRecord::default(), None), 0);
    }

    #[test]
    fn complete_entry_plus_education_clears_threshold() {
        let record = ParsedRecord {
            experience: vec![ExperienceEntry {
                position: Some("Staff Nurse".into()),
                employer: Some("General Hospital".into()),
                start_date: Some("Jan 2020".into()),
                ..Default::default()
            }],
            education: vec![crate::core::resume::types::EducationEntry {
                degree: Some("BSN".into()),
                institution: Some("State University".into()),
                ..Default::default()
            }],
            summary: Some("A dedicated and experienced registered nurse.".into()),
            skills: vec!["IV Therapy".into(), "Triage".into(), "BLS".into()],
            ..Default::default()
        };
        assert!(score(&record, None) >= 55);
    }

    #[test]
    fn penalizes_missing_experience_when_text_mentions_work() {
        let record = ParsedRecord::default();
        let text = "I have 5 years of experience in this field, having worked at several positions.";
        assert_eq!(score(&record, Some(text)), 0);
    }

    #[test]
    fn is_deterministic() {
        let record = ParsedRecord {
            skills: vec!["BLS".into(), "ACLS".into(), "Triage".into()],
            ..Default::default()
        };
        assert_eq!(score(&record, None), score(&record, None));
    }
}
