//! Default values for pipeline configuration fields

/// Default confidence threshold (55, per the hybrid orchestrator's accept-outright cutoff)
#[must_use]
pub(crate) const fn default_confidence_threshold() -> u8 {
    55
}

/// Default LLM HTTP timeout in seconds
#[must_use]
pub(crate) const fn default_llm_timeout_secs() -> u64 {
    8
}

/// Default LLM model name
pub(crate) fn default_llm_model() -> String {
    "llama3".to_string()
}

/// Default max resume blob size (10 MiB)
#[must_use]
pub(crate) const fn default_max_resume_bytes() -> u64 {
    10 * 1024 * 1024
}

/// Default max profile picture blob size (5 MiB)
#[must_use]
pub(crate) const fn default_max_profile_picture_bytes() -> u64 {
    5 * 1024 * 1024
}

pub(crate) fn default_resume_bucket() -> String {
    "resumes".to_string()
}

pub(crate) fn default_profile_picture_bucket() -> String {
    "profile-pictures".to_string()
}

pub(crate) fn default_blob_root() -> String {
    "./data/blobs".to_string()
}

pub(crate) fn default_database_path() -> String {
    "./data/pipeline.db".to_string()
}
