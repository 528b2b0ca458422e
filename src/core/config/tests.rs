//! Configuration tests

#[cfg(test)]
mod tests {
    use super::super::types::PipelineConfig;
    use tempfile::TempDir;

    #[test]
    fn load_round_trips_through_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut cfg = PipelineConfig::default();
        cfg.confidence_threshold = 70;
        cfg.save(&path).unwrap();

        let loaded = PipelineConfig::load(&path).unwrap();
        assert_eq!(loaded.confidence_threshold, 70);
    }

    #[test]
    fn load_missing_file_errors() {
        let result = PipelineConfig::load(std::path::Path::new("/nonexistent/config.json"));
        assert!(result.is_err());
    }

    #[test]
    fn default_has_expected_confidence_threshold() {
        assert_eq!(PipelineConfig::default().confidence_threshold, 55);
    }
}
