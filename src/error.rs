//! Comprehensive error types for installer operations.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for installer operations
pub type Result<T> = std::result::Result<T, InstallerError>;

/// Main error type for all installer operations
#[derive(Error, Debug)]
pub enum InstallerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The manifest is not valid TOML
    #[error("Invalid TOML in {}: {source}", path.display())]
    Toml {
        /// Manifest path
        path: PathBuf,
        /// Parse failure
        #[source]
        source: toml::de::Error,
    },

    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),

    /// The manifest could not be opened or read
    #[error("Cannot read manifest {}: {source}", path.display())]
    ManifestAccess {
        /// Manifest path
        path: PathBuf,
        /// Underlying IO failure
        #[source]
        source: std::io::Error,
    },

    /// The manifest has no `version = "..."` line
    #[error("No `version = \"...\"` line found in {}", path.display())]
    VersionNotFound {
        /// Manifest path
        path: PathBuf,
    },

    /// The version token is not a semantic version
    #[error("Invalid version '{version}' in {}: {source}", path.display())]
    InvalidVersion {
        /// Token captured from the manifest
        version: String,
        /// Manifest path
        path: PathBuf,
        /// Parse failure
        #[source]
        source: semver::Error,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl InstallerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            Self::ManifestAccess { path, .. } => vec![format!(
                "Run from the repository root or pass --manifest (looked for {})",
                path.display()
            )],
            Self::VersionNotFound { .. } => {
                vec!["Add a line such as `version = \"1.2.3\"` to the manifest".to_string()]
            }
            Self::InvalidVersion { .. } => {
                vec!["Use a semantic version (MAJOR.MINOR.PATCH)".to_string()]
            }
            Self::Toml { .. } => {
                vec!["Fix the manifest syntax; only the version line is optional".to_string()]
            }
            Self::Bundler(crate::bundler::Error::ArchError(_)) => {
                vec!["Pass --target x86_64-pc-windows-gnu or i686-pc-windows-gnu".to_string()]
            }
            Self::Bundler(crate::bundler::Error::ToolsetNotFound(_)) => vec![
                "Install the WiX Toolset v3 or pass --wix-toolset".to_string(),
                "Allow the toolset download by omitting --offline".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
