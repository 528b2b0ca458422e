//! Configuration validation logic

use super::types::PipelineConfig;

/// Validate configuration values
pub fn validate_config(config: &PipelineConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.confidence_threshold > 100 {
        return Err("confidence_threshold must be between 0 and 100".into());
    }

    if config.llm_timeout_secs == 0 {
        return Err("llm_timeout_secs must be at least 1".into());
    }
    if config.llm_timeout_secs > 120 {
        return Err("llm_timeout_secs exceeds reasonable limit (120s)".into());
    }

    if config.max_resume_bytes == 0 {
        return Err("max_resume_bytes must be greater than 0".into());
    }
    if config.max_profile_picture_bytes == 0 {
        return Err("max_profile_picture_bytes must be greater than 0".into());
    }

    if config.resume_bucket.is_empty() {
        return Err("resume_bucket cannot be empty".into());
    }
    if config.profile_picture_bucket.is_empty() {
        return Err("profile_picture_bucket cannot be empty".into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&PipelineConfig::default()).is_ok());
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut cfg = PipelineConfig::default();
        cfg.llm_timeout_secs = 0;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn rejects_empty_bucket() {
        let mut cfg = PipelineConfig::default();
        cfg.resume_bucket = String::new();
        assert!(validate_config(&cfg).is_err());
    }
}
