//! Main bundler orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that coordinates
//! the WiX backend to create installer artifacts.

use crate::{
    bail,
    bundler::{BundledArtifact, PackageType, Result, Settings, platform::windows::wix},
};

use super::{checksum::calculate_sha256, tool_detection};
use crate::bundler::utils::fs;

/// Main bundler orchestrator.
///
/// # Examples
///
/// ```no_run
/// use octobuild_installer::bundler::{Bundler, Settings, PackageType};
///
/// # async fn example(settings: Settings) -> octobuild_installer::bundler::Result<()> {
/// let bundler = Bundler::new(settings);
///
/// // Bundle with host defaults
/// let artifacts = bundler.bundle().await?;
///
/// // Or bundle specific types
/// let artifacts = bundler.bundle_types(&[PackageType::Wxs]).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler {
    settings: Settings,
}

impl Bundler {
    /// Creates a new bundler with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Executes bundling operations for the default package types.
    ///
    /// Uses [`Settings::package_types()`] when set, host defaults otherwise:
    ///
    /// - **Windows**: Msi, Wxs
    /// - **Other hosts**: Wxs, plus Msi when `wine` is available
    pub async fn bundle(&self) -> Result<Vec<BundledArtifact>> {
        let package_types = self.determine_package_types();
        self.bundle_types(&package_types).await
    }

    /// Executes bundling operations for specific package types.
    ///
    /// Types are built in the order given. Each produced artifact is
    /// measured and hashed.
    pub async fn bundle_types(&self, types: &[PackageType]) -> Result<Vec<BundledArtifact>> {
        let mut artifacts = Vec::new();

        for package_type in types {
            let paths = match package_type {
                PackageType::Msi => wix::bundle_msi(&self.settings).await?,
                PackageType::Wxs => wix::bundle_wxs(&self.settings).await?,
            };

            let size = fs::total_size(&paths).await?;

            let checksum = if let Some(first_path) = paths.first() {
                calculate_sha256(first_path).await?
            } else {
                bail!(
                    "Platform bundler for {:?} returned no paths - this indicates a bundler bug",
                    package_type
                );
            };

            artifacts.push(BundledArtifact {
                package_type: *package_type,
                paths,
                size,
                checksum,
            });
        }

        Ok(artifacts)
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Determines which package types to build on this host.
    fn determine_package_types(&self) -> Vec<PackageType> {
        // If explicit types specified, use those
        if let Some(types) = self.settings.package_types() {
            return types.to_vec();
        }

        if tool_detection::can_build_msi() {
            vec![PackageType::Msi, PackageType::Wxs]
        } else {
            log::debug!("No way to run the WiX toolset on this host - skipping MSI");
            vec![PackageType::Wxs]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{
        Entry, Feature, InstallerLayout, PackageSettings, SettingsBuilder, WindowsSettings,
        WixSettings,
    };

    #[tokio::test]
    async fn wxs_artifact_has_size_and_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SettingsBuilder::new()
            .project_out_directory(dir.path())
            .package_settings(PackageSettings {
                product_name: "Octobuild".into(),
                version: semver::Version::new(0, 4, 2),
                ..Default::default()
            })
            .windows_settings(WindowsSettings {
                wix: WixSettings {
                    upgrade_code: uuid::Uuid::from_u128(7),
                    ..Default::default()
                },
            })
            .layout(InstallerLayout {
                install_dir_id: "APPLICATIONFOLDER".into(),
                install_dir_name: "Octobuild".into(),
                features: vec![Feature::new("Main", "Main")],
                entries: vec![Entry::file("Main", "LICENSE")],
                ..Default::default()
            })
            .package_types(vec![PackageType::Wxs])
            .target("x86_64-pc-windows-gnu".into())
            .build()
            .unwrap();

        let artifacts = Bundler::new(settings).bundle().await.unwrap();
        assert_eq!(artifacts.len(), 1);

        let artifact = &artifacts[0];
        assert_eq!(artifact.package_type, PackageType::Wxs);
        assert_eq!(artifact.paths, vec![dir.path().join("octobuild-0.4.2.wxs")]);
        assert!(artifact.size > 0);
        assert_eq!(artifact.checksum.len(), 64);
    }
}
