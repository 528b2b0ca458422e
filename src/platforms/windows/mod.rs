//! Windows-Specific Implementation (Windows 11+)
//!
//! This module contains all Windows-specific code for ResumePipeline v1.0.

use std::path::PathBuf;

/// Get Windows application data directory
///
/// Returns: %LOCALAPPDATA%\ResumePipeline
/// Example: C:\Users\Username\AppData\Local\ResumePipeline
pub fn get_data_dir() -> PathBuf {
    let local_appdata = std::env::var("LOCALAPPDATA")
        .unwrap_or_else(|_| {
            // Fallback to %USERPROFILE%\AppData\Local
            let userprofile = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
            format!("{}\\AppData\\Local", userprofile)
        });

    PathBuf::from(local_appdata).join("ResumePipeline")
}

/// Get Windows configuration directory
///
/// Returns: %APPDATA%\ResumePipeline
/// Example: C:\Users\Username\AppData\Roaming\ResumePipeline
pub fn get_config_dir() -> PathBuf {
    let appdata = std::env::var("APPDATA")
        .unwrap_or_else(|_| {
            // Fallback to %USERPROFILE%\AppData\Roaming
            let userprofile = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
            format!("{}\\AppData\\Roaming", userprofile)
        });

    PathBuf::from(appdata).join("ResumePipeline")
}

/// Initialize Windows-specific features
///
/// - Creates application data directories
/// - Sets up Windows notifications
/// - Registers file associations (future)
pub fn initialize() -> Result<(), Box<dyn std::error::Error>> {
    // Create data directory if it doesn't exist
    let data_dir = get_data_dir();
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
    }

    // Create config directory if it doesn't exist
    let config_dir = get_config_dir();
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
    }

    tracing::info!("Windows platform initialized");
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
    }

    #[test]
    fn test_get_config_dir() {
        let dir = get_config_dir();
        assert!(dir.to_string_lossy().contains("ResumePipeline"));
    }
}
