//! macOS-Specific Implementation (macOS 13+)
//!
//! This module contains macOS-specific code for ResumePipeline.

use std::path::PathBuf;

/// Get macOS application support directory
///
/// Returns: ~/Library/Application Support/ResumePipeline
/// Example: /Users/username/Library/Application Support/ResumePipeline
pub fn get_data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| {
        dirs::home_dir()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|| ".".to_string())
    });

    PathBuf::from(home)
        .join("Library")
        .join("Application Support")
        .join("ResumePipeline")
}

/// Get macOS configuration directory
///
/// Returns: ~/.config/resume-pipeline
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg_config).join("resume-pipeline");
    }

    let home = std::env::var("HOME").unwrap_or_else(|_| {
        dirs::home_dir()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|| ".".to_string())
    });

    PathBuf::from(home).join(".config").join("resume-pipeline")
}

/// Initialize macOS-specific features
///
/// Creates application data/config directories if missing.
pub fn initialize() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = get_data_dir();
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        tracing::info!("Created data directory: {:?}", data_dir);
    }

    let config_dir = get_config_dir();
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        tracing::info!("Created config directory: {:?}", config_dir);
    }

    tracing::info!("macOS platform initialized");
    tracing::info!("Data directory: {:?}", data_dir);
    tracing::info!("Config directory: {:?}", config_dir);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_data_dir() {
        let dir = get_data_dir();
        assert!(dir.to_string_lossy().contains("ResumePipeline"));
        assert!(dir.to_string_lossy().contains("Library"));
        assert!(dir.to_string_lossy().contains("Application Support"));
    }

    #[test]
    fn test_get_config_dir() {
        let dir = get_config_dir();
        let dir_str = dir.to_string_lossy();
        assert!(dir_str.contains(".config") || dir_str.contains("resume-pipeline"));
    }
}
