//! Resume Ingestion and Structured-Extraction Pipeline
//!
//! Decodes a PDF/DOCX/DOC résumé to text, runs a rule-based extractor against
//! it, falls back to an LLM adapter when the rule-based result scores low,
//! and persists the result through the `BlobStore`/`MetadataStore`
//! collaborators. See `pipeline::ingest_resume` for the entry point.

pub mod confidence;
pub mod decoder;
pub mod education;
pub mod experience;
pub mod fields;
pub mod lexicons;
pub mod llm;
pub mod orchestrator;
pub mod pipeline;
pub mod sections;
pub mod store;
pub mod tenure;
pub mod types;

pub use pipeline::ingest_resume;
pub use store::{BlobStore, MetadataStore};
pub use types::{Certification, EducationEntry, ExperienceEntry, ExperienceType, ParsedRecord, UploadOutcome};
