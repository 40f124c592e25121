//! Path management for ZenSplit
//!
//! ## Path Resolution Order
//!
//! 1. `ZENSPLIT_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory, e.g. `~/.config/zensplit` on
//!    Linux or `%APPDATA%\zensplit` on Windows

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::ZenSplitError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "ZENSPLIT_DATA_DIR";

/// Manages all paths used by ZenSplit
#[derive(Debug, Clone)]
pub struct ZenSplitPaths {
    base_dir: PathBuf,
}

impl ZenSplitPaths {
    /// Resolve the base directory from the environment or the platform
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, ZenSplitError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "zensplit")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    ZenSplitError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the default expense file
    pub fn expenses_file(&self) -> PathBuf {
        self.base_dir.join("data").join("expenses.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), ZenSplitError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ZenSplitError::Io(format!("Failed to create base directory: {}", e)))
    }
}
