//! Error types for bundling operations.
//!
//! Provides the bundler [`Error`] enum together with the [`Context`] and
//! [`ErrorExt`] helper traits and the crate-wide [`bail!`](crate::bail) macro.

use std::path::{Path, PathBuf};
use thiserror::Error as ThisError;

/// Result type alias for bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while generating or building installer artifacts.
#[derive(ThisError, Debug)]
pub enum Error {
    /// Free-form failure.
    #[error("{0}")]
    GenericError(String),

    /// Raw IO failure.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// IO failure with the operation and path that caused it.
    #[error("{context} ({}): {error}", path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        error: std::io::Error,
    },

    /// An external command could not be spawned.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command name
        command: String,
        /// Spawn failure
        #[source]
        error: std::io::Error,
    },

    /// An external tool ran but exited unsuccessfully.
    #[error("`{tool}` exited with {status}: {stderr}")]
    ToolFailed {
        /// Tool name
        tool: String,
        /// Exit status description
        status: String,
        /// Captured stderr
        stderr: String,
    },

    /// The WiX toolset could not be located or acquired.
    #[error("WiX toolset not found: {0}")]
    ToolsetNotFound(String),

    /// Unsupported architecture.
    #[error("Architecture error: {0}")]
    ArchError(String),

    /// The installer layout is inconsistent.
    #[error("Invalid installer layout: {0}")]
    InvalidLayout(String),

    /// The version cannot be expressed as an MSI ProductVersion.
    #[error("Invalid product version: {0}")]
    InvalidVersion(String),

    /// Template registration or rendering failed.
    #[error("Template error: {0}")]
    Template(String),

    /// HTTP download failed.
    #[error("Download failed: {0}")]
    Download(#[from] reqwest::Error),

    /// Downloaded content did not match its pinned digest.
    #[error("Checksum mismatch for {url}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Source URL
        url: String,
        /// Pinned SHA-256
        expected: String,
        /// Computed SHA-256
        actual: String,
    },

    /// Archive extraction failed.
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Directory traversal failed.
    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

/// Convert missing values into bundler errors with a message.
pub trait Context<T> {
    /// Attach a message, turning a missing value into [`Error`].
    fn context<C: std::fmt::Display>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: std::fmt::Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

/// Attach filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wrap an IO error with the operation being performed and the path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Return early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
