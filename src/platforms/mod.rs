//! Platform-Specific Code
//!
//! Per-OS data/config directory resolution. Code is conditionally compiled
//! based on the target OS using #[cfg(...)] attributes.
//!
//! ## Supported Platforms
//!
//! - **Windows** (`windows`): %LOCALAPPDATA%/%APPDATA%
//! - **macOS** (`macos`): ~/Library/Application Support, ~/.config (XDG override)
//! - **Linux** (`linux`): XDG_DATA_HOME/XDG_CONFIG_HOME with ~/.local, ~/.config fallbacks
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use resume-pipeline::platforms;
//!
//! // Get platform-specific data directory
//! let data_dir = platforms::get_data_dir();
//! ```

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "linux")]
pub mod linux;

use std::path::PathBuf;

/// Get the platform-specific application data directory
///
/// - Windows: %LOCALAPPDATA%\ResumePipeline
/// - macOS: ~/Library/Application Support/ResumePipeline
/// - Linux: ~/.local/share/resume-pipeline
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }

    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }

    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
}

/// Get the platform-specific configuration directory
///
/// - Windows: %APPDATA%\ResumePipeline
/// - macOS: ~/.config/resume-pipeline
/// - Linux: ~/.config/resume-pipeline
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }

    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }

    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
}

/// Initialize platform-specific features
///
/// This should be called once during application startup.
pub fn initialize() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(target_os = "windows")]
    {
        windows::initialize()?;
    }

    #[cfg(target_os = "macos")]
    {
        macos::initialize()?;
    }

    #[cfg(target_os = "linux")]
    {
        linux::initialize()?;
    }

    Ok(())
}
