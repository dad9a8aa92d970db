//! Error types for configuration operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Failed to parse JSON
    #[error("failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// File extension is neither `.toml` nor `.json`
    #[error("unsupported config format '{path}' (expected .toml or .json)")]
    UnsupportedFormat {
        /// Path with the unrecognized extension.
        path: PathBuf,
    },

    /// Preset not found
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// A preset field is outside the range the engine accepts
    #[error("invalid preset '{preset}': {reason}")]
    InvalidPreset {
        /// Name of the rejected preset.
        preset: String,
        /// Description of the problem.
        reason: String,
    },

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid preset error.
    pub fn invalid_preset(preset: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidPreset {
            preset: preset.into(),
            reason: reason.into(),
        }
    }
}
