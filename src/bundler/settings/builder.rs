//! Builder for constructing Settings.

use super::{Arch, PackageSettings, Settings, WindowsSettings};
use crate::bundler::platform::{PackageType, windows::wix::tree::InstallerLayout};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Provides a fluent API for building installer settings with validation.
///
/// # Examples
///
/// ```no_run
/// use octobuild_installer::bundler::{InstallerLayout, PackageSettings, SettingsBuilder};
///
/// # fn example(layout: InstallerLayout) -> octobuild_installer::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_out_directory("target")
///     .package_settings(PackageSettings {
///         product_name: "Octobuild".into(),
///         version: semver::Version::new(0, 1, 14),
///         ..Default::default()
///     })
///     .layout(layout)
///     .target("x86_64-pc-windows-gnu".into())
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    project_out_directory: Option<PathBuf>,
    package_settings: Option<PackageSettings>,
    windows_settings: WindowsSettings,
    layout: InstallerLayout,
    package_types: Option<Vec<PackageType>>,
    target: Option<String>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the directory artifacts are written to.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn project_out_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_out_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets package metadata.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Sets Windows installer configuration.
    ///
    /// Default: [`WindowsSettings::default`]
    pub fn windows_settings(mut self, settings: WindowsSettings) -> Self {
        self.windows_settings = settings;
        self
    }

    /// Sets the installer layout.
    pub fn layout(mut self, layout: InstallerLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets specific package types to create.
    ///
    /// Default: None (host defaults)
    pub fn package_types(mut self, types: Vec<PackageType>) -> Self {
        self.package_types = Some(types);
        self
    }

    /// Sets target triple.
    ///
    /// Default: `TARGET` environment variable, else `x86_64-pc-windows-gnu`
    pub fn target(mut self, target: String) -> Self {
        self.target = Some(target);
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing, the target is not a
    /// packageable architecture or the layout is inconsistent:
    /// - `project_out_directory`
    /// - `package_settings`
    pub fn build(self) -> crate::bundler::Result<Settings> {
        use crate::bundler::error::Context;

        let target = self.target.unwrap_or_else(|| {
            std::env::var("TARGET").unwrap_or_else(|_| "x86_64-pc-windows-gnu".to_string())
        });
        let arch = Arch::from_target(&target)?;

        self.layout.validate()?;

        Ok(Settings::new(
            self.package_settings
                .context("package_settings is required")?,
            self.windows_settings,
            self.layout,
            self.project_out_directory
                .context("project_out_directory is required")?,
            self.package_types,
            target,
            arch,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{Entry, Feature};

    fn layout() -> InstallerLayout {
        InstallerLayout {
            install_dir_id: "APPLICATIONFOLDER".into(),
            install_dir_name: "Octobuild".into(),
            features: vec![Feature::new("Main", "Main")],
            entries: vec![Entry::file("Main", "LICENSE")],
            ..Default::default()
        }
    }

    #[test]
    fn requires_package_settings() {
        let err = SettingsBuilder::new()
            .project_out_directory("target")
            .layout(layout())
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("package_settings is required"));
    }

    #[test]
    fn artifact_names_use_lowercase_product() {
        let settings = SettingsBuilder::new()
            .project_out_directory("target")
            .package_settings(PackageSettings {
                product_name: "Octobuild".into(),
                version: semver::Version::new(0, 1, 14),
                ..Default::default()
            })
            .layout(layout())
            .target("x86_64-pc-windows-gnu".into())
            .build()
            .unwrap();

        assert_eq!(
            settings.artifact_path(PackageType::Msi),
            Path::new("target").join("octobuild-0.1.14.msi")
        );
        assert_eq!(settings.binary_arch(), Arch::X86_64);
    }

    #[test]
    fn rejects_unsupported_target() {
        let err = SettingsBuilder::new()
            .project_out_directory("target")
            .package_settings(PackageSettings::default())
            .layout(layout())
            .target("aarch64-pc-windows-msvc".into())
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("aarch64-pc-windows-msvc"));
    }
}
