//! LLM Extractor Adapter
//!
//! `LlmExtractor` is the abstract collaborator the orchestrator falls back to
//! when the rule-based score is low. The trait shape (default method
//! delegating to a primary one) follows the `AI` trait convention used
//! elsewhere in the example pack; the HTTP mechanics (JSON POST, low
//! temperature, `response_json["response"]` unwrap) follow the prototype LLM
//! extractor CLI in the same pack.

use crate::core::resume::types::{Certification, EducationEntry, ExperienceEntry, ExperienceType, ParsedRecord};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const PROMPT_RULES: &str = "\
You are extracting structured data from a nursing resume. Respond with JSON only, matching this shape:
{\"summary\":string|null,\"address\":string|null,\"graduation_year\":number|null,\"salary\":string|null,\
\"hospitals\":[string],\"skills\":[string],\"certifications\":[{\"type\":string,\"number\":string|null,\"score\":string|null}],\
\"experience\":[{\"employer\":string|null,\"position\":string|null,\"type\":\"employment\"|\"clinical_placement\"|\"ojt\"|\"volunteer\",\
\"department\":string|null,\"start_date\":string|null,\"end_date\":string|null,\"description\":string|null,\"location\":string|null}],\
\"education\":[{\"institution\":string|null,\"degree\":string|null,\"field_of_study\":string|null,\"year\":number|null,\
\"institution_location\":string|null,\"start_date\":string|null,\"end_date\":string|null,\"status\":string|null}]}\n\
Rules: fix concatenated words that are missing spaces; format dates as \"Month Year\" or \"Present\"; prefix description lines with a bullet; \
separate department from employer; include clinical placements, OJT/internships, and volunteer experience with the correct type; include every \
education level found; extract US state RN license numbers; split \"Facility | City, State\" into employer and location.";

/// Raw shape of one `/api/generate` response: every field loosely typed and
/// optional, since the model is free to omit or mistype any of them. This is
/// the translation layer between the model's JSON and `ParsedRecord` — the
/// pipeline never deserializes the response into `ParsedRecord` directly.
#[derive(Debug, Default, Deserialize)]
struct RawLlmRecord {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    graduation_year: Option<i64>,
    #[serde(default)]
    salary: Option<String>,
    #[serde(default)]
    hospitals: Vec<Option<String>>,
    #[serde(default)]
    skills: Vec<Option<String>>,
    #[serde(default)]
    certifications: Vec<RawCertification>,
    #[serde(default)]
    experience: Vec<RawExperience>,
    #[serde(default)]
    education: Vec<RawEducation>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCertification {
    #[serde(default, rename = "type")]
    cert_type: Option<String>,
    #[serde(default)]
    number: Option<String>,
    #[serde(default)]
    score: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawExperience {
    #[serde(default)]
    employer: Option<String>,
    #[serde(default)]
    position: Option<String>,
    #[serde(default, rename = "type")]
    experience_type: Option<String>,
    #[serde(default)]
    department: Option<String>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    location: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawEducation {
    #[serde(default)]
    institution: Option<String>,
    #[serde(default)]
    degree: Option<String>,
    #[serde(default)]
    field_of_study: Option<String>,
    #[serde(default)]
    year: Option<i64>,
    #[serde(default)]
    institution_location: Option<String>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// Trim and collapse an empty string to `None`.
fn normalize_opt(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn normalize_list(raw: Vec<Option<String>>) -> Vec<String> {
    raw.into_iter().flatten().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
}

fn normalize_experience_type(raw: Option<&str>) -> ExperienceType {
    match raw.map(str::to_lowercase).as_deref() {
        Some("clinical_placement") => ExperienceType::ClinicalPlacement,
        Some("ojt") => ExperienceType::Ojt,
        Some("volunteer") => ExperienceType::Volunteer,
        _ => ExperienceType::Employment,
    }
}

/// Normalise the model's raw JSON into `ParsedRecord`: empty optional strings
/// collapse to `None`, empty skills/hospitals entries are dropped, and a
/// missing/unrecognised experience type defaults to `employment`.
fn into_parsed_record(raw: RawLlmRecord) -> ParsedRecord {
    ParsedRecord {
        summary: normalize_opt(raw.summary),
        address: normalize_opt(raw.address),
        graduation_year: raw.graduation_year.map(|y| y as i32),
        years_of_experience: 0,
        salary: normalize_opt(raw.salary),
        hospitals: normalize_list(raw.hospitals),
        skills: normalize_list(raw.skills),
        certifications: raw
            .certifications
            .into_iter()
            .filter_map(|c| {
                Some(Certification {
                    cert_type: normalize_opt(c.cert_type)?,
                    number: normalize_opt(c.number),
                    score: normalize_opt(c.score),
                })
            })
            .collect(),
        experience: raw
            .experience
            .into_iter()
            .map(|e| ExperienceEntry {
                employer: normalize_opt(e.employer),
                position: normalize_opt(e.position),
                experience_type: normalize_experience_type(e.experience_type.as_deref()),
                department: normalize_opt(e.department),
                start_date: normalize_opt(e.start_date),
                end_date: normalize_opt(e.end_date),
                description: normalize_opt(e.description),
                location: normalize_opt(e.location),
            })
            .collect(),
        education: raw
            .education
            .into_iter()
            .map(|e| EducationEntry {
                institution: normalize_opt(e.institution),
                degree: normalize_opt(e.degree),
                field_of_study: normalize_opt(e.field_of_study),
                year: e.year.map(|y| y as i32),
                institution_location: normalize_opt(e.institution_location),
                start_date: normalize_opt(e.start_date),
                end_date: normalize_opt(e.end_date),
                status: normalize_opt(e.status),
            })
            .collect(),
    }
}

/// Abstract LLM-backed extractor. `extract` is best-effort: any network or
/// parse failure is absorbed by the implementation and returns an empty
/// record (`LlmUnavailable` never escapes the pipeline).
#[async_trait]
pub trait LlmExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> ParsedRecord;
}

/// Always returns an empty record. Used in tests and whenever no LLM
/// endpoint is configured.
pub struct NullLlmExtractor;

#[async_trait]
impl LlmExtractor for NullLlmExtractor {
    async fn extract(&self, _text: &str) -> ParsedRecord {
        ParsedRecord::default()
    }
}

/// HTTP-backed extractor against an Ollama-compatible `/api/generate` endpoint.
pub struct HttpLlmExtractor {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl HttpLlmExtractor {
    #[must_use]
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    async fn try_extract(&self, text: &str) -> anyhow::Result<ParsedRecord> {
        let prompt = format!("{PROMPT_RULES}\n\nResume text:\n{text}");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
                "format": "json",
                "options": { "temperature": 0.1 },
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("LLM endpoint returned status {}", response.status());
        }

        let body: serde_json::Value = response.json().await?;
        let response_text = body["response"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("LLM response missing 'response' field"))?;

        let raw: RawLlmRecord = serde_json::from_str(response_text)?;
        Ok(into_parsed_record(raw))
    }
}

#[async_trait]
impl LlmExtractor for HttpLlmExtractor {
    async fn extract(&self, text: &str) -> ParsedRecord {
        match self.try_extract(text).await {
            Ok(mut record) => {
                record.dedup_case_insensitive();
                record
            }
            Err(err) => {
                tracing::warn!(error = %err, "LLM extraction failed, falling back to empty record");
                ParsedRecord::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn null_extractor_returns_empty_record() {
        let extractor = NullLlmExtractor;
        let record = extractor.extract("anything").await;
        assert!(record.is_empty());
    }

    #[tokio::test]
    async fn http_extractor_absorbs_connection_failure() {
        let extractor = HttpLlmExtractor::new("http://127.0.0.1:1/api/generate", "llama3", Duration::from_millis(200));
        let record = extractor.extract("resume text").await;
        assert!(record.is_empty());
    }

    #[test]
    fn raw_record_normalizes_blank_fields_and_defaults_experience_type() {
        let raw: RawLlmRecord = serde_json::from_value(json!({
            "summary": "   ",
            "address": "Manila",
            "hospitals": ["St. Luke's", "", null],
            "skills": ["Triage", "  "],
            "experience": [{"employer": "General Hospital", "type": "not_a_real_type"}],
        }))
        .unwrap();

        let record = into_parsed_record(raw);
        assert_eq!(record.summary, None);
        assert_eq!(record.address.as_deref(), Some("Manila"));
        assert_eq!(record.hospitals, vec!["St. Luke's".to_string()]);
        assert_eq!(record.skills, vec!["Triage".to_string()]);
        assert_eq!(record.experience[0].experience_type, ExperienceType::Employment);
    }

    #[tokio::test]
    async fn http_extractor_parses_a_successful_response() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        let record = ParsedRecord {
            summary: Some("ICU nurse".to_string()),
            ..Default::default()
        };
        let inner = serde_json::to_string(&record).unwrap();
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": inner })))
            .mount(&server)
            .await;

        let extractor = HttpLlmExtractor::new(format!("{}/api/generate", server.uri()), "llama3", Duration::from_secs(5));
        let result = extractor.extract("resume text").await;
        assert_eq!(result.summary.as_deref(), Some("ICU nurse"));
    }
}
