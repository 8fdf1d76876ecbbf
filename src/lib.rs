//! Windows Installer packager for octobuild
//!
//! This library provides the pieces used to produce the octobuild MSI:
//! - the manifest version reader
//! - the WiX source generator and toolset driver
//! - the environment-change broadcast run after installation
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod layout;
pub mod metadata;

// Re-export commonly used types
pub use error::{CliError, InstallerError, Result};
