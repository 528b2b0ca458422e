//! End-to-end decode -> extract -> score -> persist coverage against the
//! in-memory store implementations, exercising a real DOCX byte stream
//! instead of pre-decoded text.

use docx_rs::{Docx, Paragraph, Run};
use resume_pipeline::core::resume::llm::NullLlmExtractor;
use resume_pipeline::core::resume::store::{InMemoryBlobStore, InMemoryMetadataStore};
use resume_pipeline::{ingest_resume, MetadataStore, PipelineConfig};

fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    let mut docx = Docx::new();
    for text in paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
    }
    let mut buf = Vec::new();
    docx.build().pack(&mut std::io::Cursor::new(&mut buf)).expect("docx packs");
    buf
}

#[tokio::test]
async fn ingests_a_docx_resume_end_to_end() {
    let bytes = build_docx(&[
        "PROFESSIONAL SUMMARY",
        "Dedicated registered nurse with broad clinical experience across two hospitals.",
        "",
        "EXPERIENCE",
        "Staff Nurse  Jan 2020 - Present",
        "St. Luke's Medical Center",
        "",
        "EDUCATION",
        "Bachelor of Science in Nursing",
        "University of the Philippines",
        "Graduated: 2016",
        "",
        "SKILLS",
        "IV Therapy, Triage, BLS",
    ]);

    let config = PipelineConfig::default();
    let blobs = InMemoryBlobStore::default();
    let metadata = InMemoryMetadataStore::default();

    let outcome = ingest_resume("subject-e2e", "resume.docx", &bytes, &config, &blobs, &metadata, &NullLlmExtractor)
        .await
        .expect("ingestion succeeds");

    assert!(outcome.has_text);
    let record = outcome.record.expect("record extracted");
    assert!(!record.experience.is_empty());
    assert_eq!(record.experience[0].employer.as_deref(), Some("St. Luke's Medical Center"));
    assert!(!record.education.is_empty());
    assert!(record.skills.iter().any(|s| s.eq_ignore_ascii_case("IV Therapy")));

    let profile = metadata.get_profile("subject-e2e").await.unwrap().expect("profile persisted");
    assert!(profile.summary.is_some());
    assert_eq!(profile.graduation_year, Some(2016));
}

#[tokio::test]
async fn second_upload_does_not_overwrite_existing_profile_scalars() {
    let bytes = build_docx(&[
        "PROFESSIONAL SUMMARY",
        "Dedicated registered nurse with broad clinical experience across two hospitals.",
        "",
        "EXPERIENCE",
        "Staff Nurse  Jan 2020 - Present",
        "St. Luke's Medical Center",
    ]);

    let config = PipelineConfig::default();
    let blobs = InMemoryBlobStore::default();
    let metadata = InMemoryMetadataStore::default();

    ingest_resume("subject-repeat", "resume.docx", &bytes, &config, &blobs, &metadata, &NullLlmExtractor)
        .await
        .expect("first ingestion succeeds");
    let first_profile = metadata.get_profile("subject-repeat").await.unwrap().expect("profile persisted");

    let blank_resume = build_docx(&["Not much structured content here."]);
    ingest_resume("subject-repeat", "resume2.docx", &blank_resume, &config, &blobs, &metadata, &NullLlmExtractor)
        .await
        .expect("second ingestion succeeds");
    let second_profile = metadata.get_profile("subject-repeat").await.unwrap().expect("profile persisted");

    assert_eq!(first_profile.summary, second_profile.summary);
}
