//! Hybrid Orchestrator
//!
//! Runs the rule-based extractor, scores it, falls back to the LLM adapter
//! when confidence is low, and post-processes whichever record wins:
//! experience-type inference, employer/department repair, description
//! sanitisation.

use crate::core::resume::confidence::score;
use crate::core::resume::lexicons::{self, COMPANY_KEYWORDS, KNOWN_FACILITIES};
use crate::core::resume::llm::LlmExtractor;
use crate::core::resume::sections::is_all_caps_header;
use crate::core::resume::types::{ExperienceType, ParsedRecord};
use crate::core::resume::{education, experience, fields, tenure};
use once_cell::sync::Lazy;
use regex::Regex;

static CLINICAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)clinical\s+placement|\brotation\b|\bpracticum\b|\bpreceptorship\b").expect("static regex"));
static OJT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bOJT\b|on[\s-]the[\s-]job|\binternship\b|\bintern\b|\btrainee\b|\btraining\b").expect("static regex"));
static VOLUNTEER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bvolunteer\b|community service|pro bono|medical mission").expect("static regex"));

/// Run the full rules-then-LLM-fallback pipeline against decoded resume text.
pub async fn extract_record(text: &str, llm: &dyn LlmExtractor, confidence_threshold: i32, current_year: i32) -> ParsedRecord {
    let lines: Vec<&str> = text.lines().collect();

    let mut rule_record = ParsedRecord {
        summary: fields::extract_summary(&lines),
        address: fields::extract_address(&lines),
        graduation_year: fields::extract_graduation_year(&lines, current_year),
        salary: fields::extract_salary(text),
        hospitals: fields::extract_hospitals(text),
        skills: fields::extract_skills(&lines, text),
        certifications: fields::extract_certifications(text),
        experience: experience::extract_experience(text),
        education: education::extract_education(text, current_year),
        years_of_experience: 0,
    };
    rule_record.dedup_case_insensitive();
    rule_record.years_of_experience = tenure::years_of_experience(&rule_record.experience);

    let rule_score = score(&rule_record, Some(text));
    tracing::info!(rule_score, "rule-based extraction scored");

    let mut chosen = if rule_score >= confidence_threshold {
        rule_record
    } else {
        let mut llm_record = llm.extract(text).await;
        let llm_score = score(&llm_record, None);
        tracing::info!(llm_score, rule_score, "invoked LLM fallback");
        if llm_score > rule_score {
            llm_record.years_of_experience = tenure::years_of_experience(&llm_record.experience);
            llm_record
        } else {
            rule_record
        }
    };

    infer_experience_types(&mut chosen, text);
    repair_employer_department(&mut chosen);
    sanitize_descriptions(&mut chosen);

    chosen
}

/// Re-categorise experience entries whose type is still the default
/// (`employment`) by keyword search in position/employer.
fn infer_experience_types(record: &mut ParsedRecord, text: &str) {
    for entry in &mut record.experience {
        if entry.experience_type != ExperienceType::Employment {
            continue;
        }
        let haystack = format!(
            "{} {}",
            entry.position.as_deref().unwrap_or_default(),
            entry.employer.as_deref().unwrap_or_default()
        );

        if CLINICAL_RE.is_match(&haystack) {
            entry.experience_type = ExperienceType::ClinicalPlacement;
        } else if OJT_RE.is_match(&haystack) {
            entry.experience_type = ExperienceType::Ojt;
        } else if VOLUNTEER_RE.is_match(&haystack) {
            entry.experience_type = ExperienceType::Volunteer;
        } else if let Some(employer) = &entry.employer {
            if mentioned_under_header(text, employer, "CLINICAL PLACEMENT") {
                entry.experience_type = ExperienceType::ClinicalPlacement;
            } else if mentioned_under_header(text, employer, "VOLUNTEER EXPERIENCE") {
                entry.experience_type = ExperienceType::Volunteer;
            }
        }
    }
}

fn mentioned_under_header(text: &str, needle: &str, header_prefix: &str) -> bool {
    let lines: Vec<&str> = text.lines().collect();
    let Some(start) = lines.iter().position(|l| l.trim().to_uppercase().starts_with(header_prefix)) else {
        return false;
    };
    let mut end = lines.len();
    for (idx, line) in lines.iter().enumerate().skip(start + 1) {
        if is_all_caps_header(line, 8) {
            end = idx;
            break;
        }
    }
    lines[start..end].iter().any(|l| l.contains(needle))
}

/// When the chosen employer has neither a company keyword nor a known-
/// facility hit, look for one in the description bullets and promote it.
fn repair_employer_department(record: &mut ParsedRecord) {
    for entry in &mut record.experience {
        let employer_is_weak = entry.employer.as_deref().is_none_or(|e| {
            !lexicons::matches_any(e, COMPANY_KEYWORDS) && !lexicons::matches_any(e, KNOWN_FACILITIES)
        });
        if !employer_is_weak {
            continue;
        }
        let Some(description) = entry.description.clone() else { continue };

        let mut kept_lines = Vec::new();
        let mut promoted = false;
        for line in description.lines() {
            let bullet_text = line.trim_start_matches('•').trim();
            if !promoted && (lexicons::matches_any(bullet_text, COMPANY_KEYWORDS) || lexicons::matches_any(bullet_text, KNOWN_FACILITIES)) {
                let (new_employer, location) = split_on_separator(bullet_text);
                if let Some(old_employer) = entry.employer.take() {
                    entry.department = Some(old_employer);
                }
                entry.employer = Some(new_employer);
                if location.is_some() {
                    entry.location = location;
                }
                promoted = true;
                continue;
            }
            kept_lines.push(line.to_string());
        }

        entry.description = if kept_lines.is_empty() { None } else { Some(kept_lines.join("\n")) };
    }
}

fn split_on_separator(text: &str) -> (String, Option<String>) {
    for sep in ['|', '•'] {
        if let Some((head, tail)) = text.split_once(sep) {
            return (head.trim().to_string(), Some(tail.trim().to_string()));
        }
    }
    if let Some(idx) = text.find(", ") {
        return (text[..idx].trim().to_string(), Some(text[idx + 2..].trim().to_string()));
    }
    (text.to_string(), None)
}

/// Remove bullet lines that contain the employer, or equal the location or
/// department.
fn sanitize_descriptions(record: &mut ParsedRecord) {
    for entry in &mut record.experience {
        let Some(description) = entry.description.clone() else { continue };
        let kept: Vec<String> = description
            .lines()
            .filter(|line| {
                let bullet_text = line.trim_start_matches('•').trim();
                if let Some(employer) = &entry.employer {
                    if bullet_text.len() < 120 && bullet_text.contains(employer.as_str()) {
                        return false;
                    }
                }
                if Some(bullet_text) == entry.location.as_deref() || Some(bullet_text) == entry.department.as_deref() {
                    return false;
                }
                true
            })
            .map(str::to_string)
            .collect();
        entry.description = if kept.is_empty() { None } else { Some(kept.join("\n")) };
    }
}
