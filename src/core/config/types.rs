//! Configuration type definitions

use serde::{Deserialize, Serialize};

/// Runtime configuration for the resume pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Minimum score (0-100) at which the rule-based record is accepted outright
    /// without invoking the LLM fallback. See the hybrid orchestrator.
    #[serde(default = "super::defaults::default_confidence_threshold")]
    pub confidence_threshold: u8,

    /// Upper bound, in seconds, on the LLM extractor's HTTP call.
    #[serde(default = "super::defaults::default_llm_timeout_secs")]
    pub llm_timeout_secs: u64,

    /// Base URL of the LLM endpoint (Ollama-compatible `/api/generate`).
    #[serde(default)]
    pub llm_endpoint: Option<String>,

    /// Model name passed to the LLM endpoint.
    #[serde(default = "super::defaults::default_llm_model")]
    pub llm_model: String,

    /// Maximum accepted resume blob size, in bytes.
    #[serde(default = "super::defaults::default_max_resume_bytes")]
    pub max_resume_bytes: u64,

    /// Maximum accepted profile picture blob size, in bytes.
    #[serde(default = "super::defaults::default_max_profile_picture_bytes")]
    pub max_profile_picture_bytes: u64,

    /// Bucket name for resume blobs.
    #[serde(default = "super::defaults::default_resume_bucket")]
    pub resume_bucket: String,

    /// Bucket name for profile picture blobs.
    #[serde(default = "super::defaults::default_profile_picture_bucket")]
    pub profile_picture_bucket: String,

    /// Root directory backing the filesystem `BlobStore` reference implementation.
    #[serde(default = "super::defaults::default_blob_root")]
    pub blob_root: String,

    /// Path to the SQLite database backing the `MetadataStore` reference implementation.
    #[serde(default = "super::defaults::default_database_path")]
    pub database_path: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: super::defaults::default_confidence_threshold(),
            llm_timeout_secs: super::defaults::default_llm_timeout_secs(),
            llm_endpoint: None,
            llm_model: super::defaults::default_llm_model(),
            max_resume_bytes: super::defaults::default_max_resume_bytes(),
            max_profile_picture_bytes: super::defaults::default_max_profile_picture_bytes(),
            resume_bucket: super::defaults::default_resume_bucket(),
            profile_picture_bucket: super::defaults::default_profile_picture_bucket(),
            blob_root: super::defaults::default_blob_root(),
            database_path: super::defaults::default_database_path(),
        }
    }
}
