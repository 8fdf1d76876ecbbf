//! Windows Installer bundling.
//!
//! Turns [`Settings`] (package metadata, WiX options and the declarative
//! [`InstallerLayout`]) into installer artifacts:
//!
//! - `.wxs` WiX source, rendered by this crate
//! - `.msi` packages, compiled by the WiX toolset (`candle` + `light`)
//!
//! # Module Organization
//!
//! - [`builder`] - [`Bundler`] orchestrator, checksums and tool detection
//! - [`error`] - bundler error type and helpers
//! - [`platform`] - package types and the Windows/WiX backend
//! - [`settings`] - configuration structures and [`SettingsBuilder`]
//! - [`utils`] - filesystem and HTTP helpers

pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod utils;

pub use builder::Bundler;
pub use error::{Error, Result};
pub use platform::PackageType;
pub use platform::windows::wix::environment::{
    EnvAction, EnvPart, EnvironmentVariable, InstallScope, ScopedEnvironmentVariable,
};
pub use platform::windows::wix::tree::{
    Entry, ExeCustomAction, Feature, InstallerLayout, Property, Sequence, SetPropertyAction,
};
pub use settings::{
    Arch, PackageSettings, Settings, SettingsBuilder, WindowsSettings, WixInstallScope, WixSettings,
    WixUi,
};

use serde::Serialize;
use std::path::PathBuf;

/// A package produced by the bundler.
#[derive(Debug, Clone, Serialize)]
pub struct BundledArtifact {
    /// Kind of artifact.
    pub package_type: PackageType,

    /// Files making up the artifact.
    pub paths: Vec<PathBuf>,

    /// Total size of all paths in bytes.
    pub size: u64,

    /// Hex-encoded SHA-256 of the first path.
    pub checksum: String,
}
