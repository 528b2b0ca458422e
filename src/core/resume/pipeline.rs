//! Pipeline entry point — the `uploadResume` equivalent.
//!
//! Ties the decoder, the hybrid orchestrator, and the storage collaborators
//! together into one fallible operation. Internal failures (decode trouble,
//! LLM unavailability) are absorbed before this boundary; only storage and
//! persistence failures escape as `PipelineError`.

use crate::core::config::PipelineConfig;
use crate::core::resume::decoder::{self, ResumeFormat};
use crate::core::resume::experience;
use crate::core::resume::llm::LlmExtractor;
use crate::core::resume::orchestrator;
use crate::core::resume::store::{BlobStore, MetadataStore};
use crate::core::resume::tenure::MONTH_NAMES;
use crate::core::resume::types::{ExperienceEntry, UploadOutcome};
use crate::error::{PipelineError, PipelineResult};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;

static ISO_DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Ingest one resume upload for `subject_id`.
///
/// Validates the extension and size, uploads the raw bytes, decodes them to
/// text, runs the hybrid rules/LLM extractor when text is available, and
/// persists whichever profile/experience/education/skills/certification rows
/// result. Profile scalar fields are only filled in when currently empty.
pub async fn ingest_resume(
    subject_id: &str,
    filename: &str,
    bytes: &[u8],
    config: &PipelineConfig,
    blobs: &dyn BlobStore,
    metadata: &dyn MetadataStore,
    llm: &dyn LlmExtractor,
) -> PipelineResult<UploadOutcome> {
    metadata
        .get_profile(subject_id)
        .await
        .map_err(|err| PipelineError::persistence_error(subject_id, err))?
        .ok_or_else(|| PipelineError::not_found(subject_id))?;

    if bytes.is_empty() {
        return Err(PipelineError::bad_request("resume file is empty"));
    }
    if bytes.len() as u64 > config.max_resume_bytes {
        return Err(PipelineError::bad_request(format!(
            "resume file exceeds the {} byte limit",
            config.max_resume_bytes
        )));
    }

    let format = ResumeFormat::from_extension(filename).ok_or_else(|| {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();
        PipelineError::unsupported_format(extension)
    })?;

    let content_type = match format {
        ResumeFormat::Pdf => "application/pdf",
        ResumeFormat::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ResumeFormat::Doc => "application/msword",
    };
    let extension = match format {
        ResumeFormat::Pdf => "pdf",
        ResumeFormat::Docx => "docx",
        ResumeFormat::Doc => "doc",
    };

    let blob_path = format!("{subject_id}/{}.{extension}", Utc::now().timestamp_millis());
    upload_with_fallback(blobs, &config.resume_bucket, subject_id, &blob_path, bytes, content_type).await?;

    let (text, warning) = match decoder::decode(format, bytes) {
        Ok(document) => (Some(document.text), document.warning),
        Err(err) => {
            tracing::warn!(subject_id, filename, error = %err, "resume decode failed, continuing without text");
            (None, Some("could not extract text from this file".to_string()))
        }
    };

    let mut record = None;
    if let Some(text) = text.as_deref().filter(|t| !t.trim().is_empty()) {
        let current_year = Utc::now().format("%Y").to_string().parse().unwrap_or(2024);
        let extracted = orchestrator::extract_record(text, llm, i32::from(config.confidence_threshold), current_year).await;
        record = Some(extracted);
    }

    let prior_resumes = metadata.take_resumes(subject_id).await.map_err(|err| PipelineError::persistence_error(subject_id, err))?;
    for prior in &prior_resumes {
        if let Err(err) = blobs.remove(&prior.bucket, &[prior.path.clone()]).await {
            tracing::warn!(subject_id, bucket = %prior.bucket, path = %prior.path, error = %err, "failed to remove prior resume blob");
        }
    }

    let parsed_data = record.as_ref().and_then(|r| serde_json::to_string(r).ok());
    let resume_id = metadata
        .insert_resume(subject_id, &config.resume_bucket, &blob_path, filename, content_type, text.as_deref(), parsed_data.as_deref())
        .await
        .map_err(|err| PipelineError::persistence_error(subject_id, err))?;

    if let Some(extracted) = &record {
        persist_record(metadata, subject_id, extracted).await?;
    }

    Ok(UploadOutcome {
        resume_id,
        has_text: record.is_some(),
        record,
        warning,
    })
}

async fn upload_with_fallback(
    blobs: &dyn BlobStore,
    bucket: &str,
    subject_id: &str,
    path: &str,
    bytes: &[u8],
    content_type: &str,
) -> PipelineResult<()> {
    if let Err(primary_err) = blobs.upload(bucket, path, bytes, content_type).await {
        tracing::warn!(bucket, path, error = %primary_err, "primary bucket upload failed, trying legacy fallback path");
        let fallback_path = format!("profile-images/{subject_id}/{path}");
        blobs
            .upload(bucket, &fallback_path, bytes, content_type)
            .await
            .map_err(|fallback_err| PipelineError::storage_error(path, fallback_err.context(primary_err)))?;
    }
    Ok(())
}

/// Convert an extractor date string to `YYYY-MM-DD` for persistence.
///
/// Already-ISO input passes through unchanged; `"Mon(th)? Year"` shapes map
/// to the first of that month; anything else (including `"Present"`/
/// `"Current"`) normalises to `None`.
fn to_date_string(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if ISO_DATE_RE.is_match(raw) {
        return Some(raw.to_string());
    }

    let mut parts = raw.split_whitespace();
    let month_token = parts.next()?.to_lowercase();
    let year_token = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let year: i32 = year_token.parse().ok()?;
    let month_index = MONTH_NAMES.iter().position(|m| month_token.starts_with(&m[..3]))?;
    Some(format!("{year:04}-{:02}-01", month_index + 1))
}

/// Normalise dates and drop sentence-like employers before the rows reach
/// `MetadataStore::replace_experience`. A missing/unparseable start date is
/// written as the `1900-01-01` sentinel so the column stays a real date.
fn normalize_experience_for_storage(entries: &[ExperienceEntry]) -> Vec<ExperienceEntry> {
    entries
        .iter()
        .filter(|e| !e.employer.as_deref().is_some_and(experience::employer_reads_like_a_sentence))
        .map(|e| ExperienceEntry {
            start_date: Some(e.start_date.as_deref().and_then(to_date_string).unwrap_or_else(|| "1900-01-01".to_string())),
            end_date: e.end_date.as_deref().and_then(to_date_string),
            ..e.clone()
        })
        .collect()
}

async fn persist_record(
    metadata: &dyn MetadataStore,
    subject_id: &str,
    record: &crate::core::resume::types::ParsedRecord,
) -> PipelineResult<()> {
    metadata
        .upsert_profile_if_empty(subject_id, record)
        .await
        .map_err(|err| PipelineError::persistence_error(subject_id, err))?;
    let storage_experience = normalize_experience_for_storage(&record.experience);
    metadata
        .replace_experience(subject_id, &storage_experience)
        .await
        .map_err(|err| PipelineError::persistence_error(subject_id, err))?;
    metadata
        .replace_education(subject_id, &record.education)
        .await
        .map_err(|err| PipelineError::persistence_error(subject_id, err))?;
    metadata
        .replace_skills(subject_id, &record.skills)
        .await
        .map_err(|err| PipelineError::persistence_error(subject_id, err))?;
    metadata
        .replace_certifications(subject_id, &record.certifications)
        .await
        .map_err(|err| PipelineError::persistence_error(subject_id, err))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resume::llm::NullLlmExtractor;
    use crate::core::resume::store::{InMemoryBlobStore, InMemoryMetadataStore};
    use crate::core::resume::types::ParsedRecord;

    fn sample_docx_free_text_resume() -> &'static [u8] {
        b"not a real resume binary, just bytes for a rejected extension test"
    }

    async fn with_seeded_profile(subject_id: &str) -> InMemoryMetadataStore {
        let metadata = InMemoryMetadataStore::default();
        metadata.upsert_profile_if_empty(subject_id, &ParsedRecord::default()).await.unwrap();
        metadata
    }

    #[tokio::test]
    async fn rejects_subject_with_no_profile() {
        let config = PipelineConfig::default();
        let blobs = InMemoryBlobStore::default();
        let metadata = InMemoryMetadataStore::default();
        let result = ingest_resume("no-such-subject", "resume.pdf", b"%PDF-1.4", &config, &blobs, &metadata, &NullLlmExtractor).await;
        assert!(matches!(result, Err(PipelineError::NotFound { .. })));
    }

    #[tokio::test]
    async fn rejects_unsupported_extension() {
        let config = PipelineConfig::default();
        let blobs = InMemoryBlobStore::default();
        let metadata = with_seeded_profile("subject-1").await;
        let result = ingest_resume(
            "subject-1",
            "resume.txt",
            sample_docx_free_text_resume(),
            &config,
            &blobs,
            &metadata,
            &NullLlmExtractor,
        )
        .await;
        assert!(matches!(result, Err(PipelineError::UnsupportedFormat { .. })));
    }

    #[tokio::test]
    async fn rejects_empty_bytes() {
        let config = PipelineConfig::default();
        let blobs = InMemoryBlobStore::default();
        let metadata = with_seeded_profile("subject-1").await;
        let result = ingest_resume("subject-1", "resume.pdf", &[], &config, &blobs, &metadata, &NullLlmExtractor).await;
        assert!(matches!(result, Err(PipelineError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn rejects_oversized_upload() {
        let mut config = PipelineConfig::default();
        config.max_resume_bytes = 4;
        let blobs = InMemoryBlobStore::default();
        let metadata = with_seeded_profile("subject-1").await;
        let result = ingest_resume("subject-1", "resume.pdf", b"too many bytes", &config, &blobs, &metadata, &NullLlmExtractor).await;
        assert!(matches!(result, Err(PipelineError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn decode_failure_still_records_the_upload_with_a_warning() {
        let config = PipelineConfig::default();
        let blobs = InMemoryBlobStore::default();
        let metadata = with_seeded_profile("subject-1").await;
        let outcome = ingest_resume(
            "subject-1",
            "resume.pdf",
            b"%PDF-1.4 this is not a parseable pdf stream",
            &config,
            &blobs,
            &metadata,
            &NullLlmExtractor,
        )
        .await
        .unwrap();
        assert!(!outcome.has_text);
        assert!(outcome.warning.is_some());
    }

    #[tokio::test]
    async fn blob_path_is_profile_id_slash_unix_millis_dot_extension() {
        let config = PipelineConfig::default();
        let blobs = InMemoryBlobStore::default();
        let metadata = with_seeded_profile("subject-1").await;
        ingest_resume("subject-1", "resume.pdf", b"%PDF-1.4 not parseable", &config, &blobs, &metadata, &NullLlmExtractor)
            .await
            .unwrap();

        let objects = blobs.objects.lock().unwrap();
        let (_, path) = objects.keys().find(|(bucket, _)| bucket == &config.resume_bucket).expect("blob uploaded");
        let (prefix, rest) = path.split_once('/').expect("path has a subject prefix");
        assert_eq!(prefix, "subject-1");
        let millis = rest.strip_suffix(".pdf").expect("extension suffix");
        assert!(millis.chars().all(|c| c.is_ascii_digit()) && !millis.is_empty());
    }

    #[tokio::test]
    async fn reupload_replaces_prior_blob_and_resume_row() {
        let config = PipelineConfig::default();
        let blobs = InMemoryBlobStore::default();
        let metadata = with_seeded_profile("subject-1").await;

        ingest_resume("subject-1", "resume.pdf", b"%PDF-1.4 first upload", &config, &blobs, &metadata, &NullLlmExtractor)
            .await
            .unwrap();
        ingest_resume("subject-1", "resume.pdf", b"%PDF-1.4 second upload", &config, &blobs, &metadata, &NullLlmExtractor)
            .await
            .unwrap();

        let objects = blobs.objects.lock().unwrap();
        let remaining = objects.keys().filter(|(bucket, _)| bucket == &config.resume_bucket).count();
        assert_eq!(remaining, 1);
    }
}
