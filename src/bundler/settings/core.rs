//! Core Settings struct and implementations.

use super::{Arch, PackageSettings, WindowsSettings};
use crate::bundler::platform::{PackageType, windows::wix::tree::InstallerLayout};
use std::path::{Path, PathBuf};

/// Main settings for installer builds.
///
/// Central configuration for the bundler, constructed via [`SettingsBuilder`](super::SettingsBuilder).
/// Contains package metadata, WiX configuration and the installer layout.
///
/// # See Also
///
/// - [`PackageSettings`] - Package metadata
/// - [`WindowsSettings`] - WiX configuration
/// - [`InstallerLayout`] - Installed files, features and actions
#[derive(Clone, Debug)]
pub struct Settings {
    /// Package metadata.
    package: PackageSettings,

    /// Windows installer configuration.
    windows: WindowsSettings,

    /// What the package installs.
    layout: InstallerLayout,

    /// Output directory for artifacts.
    project_out_directory: PathBuf,

    /// Package types to create.
    ///
    /// None means use host defaults.
    package_types: Option<Vec<PackageType>>,

    /// Target triple of the packaged binaries (e.g., "x86_64-pc-windows-gnu").
    target: String,

    /// Architecture derived from `target`.
    arch: Arch,
}

impl Settings {
    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.package.product_name
    }

    /// Returns the product version.
    pub fn version(&self) -> &semver::Version {
        &self.package.version
    }

    /// Returns the version as written in the manifest.
    pub fn version_string(&self) -> String {
        self.package.version.to_string()
    }

    /// Returns the package description.
    pub fn description(&self) -> &str {
        &self.package.description
    }

    /// Returns the manufacturer.
    pub fn manufacturer(&self) -> &str {
        &self.package.manufacturer
    }

    /// Returns the "about" URL.
    pub fn url_info_about(&self) -> Option<&str> {
        self.package.url_info_about.as_deref()
    }

    /// Returns the project output directory.
    pub fn project_out_directory(&self) -> &Path {
        &self.project_out_directory
    }

    /// Artifact file stem: `<product>-<version>`, product lowercased.
    pub fn output_file_stem(&self) -> String {
        format!(
            "{}-{}",
            self.product_name().to_lowercase().replace(' ', "-"),
            self.package.version
        )
    }

    /// Path of the artifact for `package_type` inside the output directory.
    pub fn artifact_path(&self, package_type: PackageType) -> PathBuf {
        self.project_out_directory.join(format!(
            "{}.{}",
            self.output_file_stem(),
            package_type.extension()
        ))
    }

    /// Returns the binary architecture derived from the target triple.
    pub fn binary_arch(&self) -> Arch {
        self.arch
    }

    /// Returns the target triple.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the Windows settings.
    pub fn windows(&self) -> &WindowsSettings {
        &self.windows
    }

    /// Returns the installer layout.
    pub fn layout(&self) -> &InstallerLayout {
        &self.layout
    }

    /// Returns the package types to create.
    ///
    /// None means use host defaults.
    pub fn package_types(&self) -> Option<&[PackageType]> {
        self.package_types.as_deref()
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        package: PackageSettings,
        windows: WindowsSettings,
        layout: InstallerLayout,
        project_out_directory: PathBuf,
        package_types: Option<Vec<PackageType>>,
        target: String,
        arch: Arch,
    ) -> Self {
        Self {
            package,
            windows,
            layout,
            project_out_directory,
            package_types,
            target,
            arch,
        }
    }
}
