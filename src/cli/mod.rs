//! Command line interface for the octobuild installer.
//!
//! Resolves configuration (built-in defaults, `[package.metadata.wix]`
//! overrides, command line flags), builds the requested artifacts and
//! reports them.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::{
    bundler::{BundledArtifact, Bundler, Settings, SettingsBuilder, WixUi},
    error::{CliError, InstallerError, Result},
    layout::{self, LayoutPaths},
    metadata::{self, ManifestMetadata},
};
use chrono::{DateTime, Utc};
use path_absolutize::Absolutize;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Machine-readable result of a run (`--json`).
#[derive(Debug, Serialize)]
pub struct BuildSummary {
    pub product: String,
    pub version: String,
    pub built_at: DateTime<Utc>,
    pub artifacts: Vec<BundledArtifact>,
}

/// Main CLI entry point, run with already parsed arguments
pub async fn run_with(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;
    let config = RuntimeConfig::from(&args);
    let output = config.output();

    let manifest = args.manifest.absolutize()?.to_path_buf();
    let version = metadata::require_version(&manifest)?;
    let manifest_metadata = metadata::load_manifest(&manifest)?;
    log::info!("Version {} from {}", version, manifest.display());

    let settings = build_settings(&args, &manifest, version, &manifest_metadata)?;
    output.section(&format!("{} {}", settings.product_name(), settings.version()))?;
    output.verbose(&format!(
        "Output directory: {}",
        settings.project_out_directory().display()
    ))?;

    let bundler = Bundler::new(settings);
    output.progress("Building installer artifacts")?;
    let artifacts = bundler.bundle().await?;

    if args.json {
        let summary = BuildSummary {
            product: bundler.settings().product_name().to_string(),
            version: bundler.settings().version_string(),
            built_at: Utc::now(),
            artifacts,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for artifact in &artifacts {
            for path in &artifact.paths {
                output.success(&format!("{}: {}", artifact.package_type, path.display()))?;
            }
            output.indent(&format!("size: {} bytes", artifact.size))?;
            output.indent(&format!("sha256: {}", artifact.checksum))?;
        }
        if artifacts.is_empty() {
            output.warn("No artifacts were requested")?;
        }
    }

    Ok(0)
}

/// Assemble [`Settings`] from defaults, manifest overrides and arguments.
pub fn build_settings(
    args: &Args,
    manifest: &Path,
    version: semver::Version,
    manifest_metadata: &ManifestMetadata,
) -> Result<Settings> {
    let root = manifest
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut paths = LayoutPaths::from_root(&root).with_target(args.target.clone());
    if let Some(exe) = &args.broadcast_exe {
        paths.broadcast_exe = exe.clone();
    }
    if let Some(dir) = &args.target_dir {
        paths.target_dir = dir.clone();
    }
    if let Some(dir) = &args.wixcs_dir {
        paths.wixcs_dir = dir.clone();
    }

    let mut package = layout::octobuild_package(version);
    if let Some(description) = &manifest_metadata.package.description {
        package.description = description.clone();
    }

    let mut windows = layout::octobuild_wix_settings(&paths);
    let overrides = &manifest_metadata.wix;
    let invalid = |reason: String| InstallerError::Cli(CliError::InvalidArguments { reason });

    if let Some(name) = &overrides.product_name {
        package.product_name = name.clone();
    }
    if let Some(manufacturer) = &overrides.manufacturer {
        package.manufacturer = manufacturer.clone();
    }
    if let Some(about) = &overrides.url_info_about {
        url::Url::parse(about)
            .map_err(|e| invalid(format!("url_info_about '{}': {}", about, e)))?;
        package.url_info_about = Some(about.clone());
    }
    if let Some(code) = &overrides.upgrade_code {
        windows.wix.upgrade_code = uuid::Uuid::parse_str(code)
            .map_err(|e| invalid(format!("upgrade_code '{}': {}", code, e)))?;
    }
    if let Some(license) = &overrides.license {
        windows.wix.license = Some(license.clone());
    }
    if let Some(ui) = &overrides.ui {
        windows.wix.ui = ui.parse::<WixUi>().map_err(invalid)?;
    }
    if let Some(options) = &overrides.light_options {
        windows.wix.light_options = options.clone();
    }
    if let Some(cultures) = &overrides.cultures {
        windows.wix.cultures = cultures.clone();
    }

    windows.wix.toolset = args.wix_toolset.clone();
    windows.wix.allow_download = !args.offline;

    let mut builder = SettingsBuilder::new()
        .project_out_directory(args.output_dir.clone().unwrap_or_else(|| root.join("target")))
        .package_settings(package)
        .windows_settings(windows)
        .layout(layout::octobuild_layout(&paths)?)
        .target(args.target.clone());
    if !args.packages.is_empty() {
        builder = builder.package_types(args.packages.clone());
    }

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::WixOverrides;
    use clap::Parser;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["octobuild_installer"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_follow_manifest_directory() {
        let settings = build_settings(
            &args(&[]),
            Path::new("/repo/Cargo.toml"),
            semver::Version::new(0, 1, 14),
            &ManifestMetadata::default(),
        )
        .unwrap();

        assert_eq!(settings.product_name(), "Octobuild");
        assert_eq!(settings.project_out_directory(), Path::new("/repo/target"));
        assert_eq!(settings.windows().wix.upgrade_code, layout::UPGRADE_CODE);
        assert_eq!(
            settings.windows().wix.license.as_deref(),
            Some(Path::new("/repo/LICENSE.rtf"))
        );
        assert!(settings.package_types().is_none());
    }

    #[test]
    fn manifest_overrides_apply() {
        let metadata = ManifestMetadata {
            wix: WixOverrides {
                manufacturer: Some("Someone Else".into()),
                ui: Some("minimal".into()),
                upgrade_code: Some("00000000-0000-0000-0000-000000000001".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let settings = build_settings(
            &args(&["--offline", "-p", "wxs"]),
            Path::new("/repo/Cargo.toml"),
            semver::Version::new(1, 0, 0),
            &metadata,
        )
        .unwrap();

        assert_eq!(settings.manufacturer(), "Someone Else");
        assert_eq!(settings.windows().wix.ui, WixUi::Minimal);
        assert_eq!(settings.windows().wix.upgrade_code, uuid::Uuid::from_u128(1));
        assert!(!settings.windows().wix.allow_download);
        assert_eq!(
            settings.package_types(),
            Some(&[crate::bundler::PackageType::Wxs][..])
        );
    }

    #[test]
    fn target_and_broadcast_exe_reach_the_layout() {
        let settings = build_settings(
            &args(&[
                "--target",
                "i686-pc-windows-gnu",
                "--broadcast-exe",
                "/dist/broadcast_setting_change.exe",
            ]),
            Path::new("/repo/Cargo.toml"),
            semver::Version::new(1, 0, 0),
            &ManifestMetadata::default(),
        )
        .unwrap();

        assert_eq!(settings.binary_arch(), crate::bundler::Arch::X86);
        let sources = settings.layout().source_files();
        assert!(sources.contains(&PathBuf::from(
            "/repo/target/i686-pc-windows-gnu/release/xgConsole.exe"
        )));
        assert_eq!(
            settings.layout().custom_actions[0].binary,
            PathBuf::from("/dist/broadcast_setting_change.exe")
        );
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        let metadata = ManifestMetadata {
            wix: WixOverrides {
                url_info_about: Some("not a url".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = build_settings(
            &args(&[]),
            Path::new("/repo/Cargo.toml"),
            semver::Version::new(1, 0, 0),
            &metadata,
        )
        .unwrap_err();
        assert!(err.to_string().contains("url_info_about"));
    }
}
