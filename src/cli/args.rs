//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with proper
//! validation and error handling.

use crate::bundler::{Arch, PackageType};
use clap::Parser;
use std::path::PathBuf;

/// Windows Installer packager for octobuild
#[derive(Parser, Debug, Clone)]
#[command(
    name = "octobuild_installer",
    version,
    about = "Windows Installer packager for octobuild",
    long_about = "Builds the octobuild Windows Installer package (.msi) and its WiX source (.wxs).

Reads the product version from the manifest, lays out the cross-compiled binaries
from the target directory and drives the WiX toolset (candle + light).

The MSI embeds broadcast_setting_change.exe as a custom action. By default it is
taken from the directory of this executable; build this crate for Windows or pass
--broadcast-exe (env OCTOBUILD_BROADCAST_EXE) to point elsewhere.

Usage:
  octobuild_installer
  octobuild_installer --manifest ../octobuild/Cargo.toml --package wxs
  octobuild_installer --wix-toolset \"C:\\Program Files (x86)\\WiX Toolset v3.11\" --json

Exit code 0 = every requested artifact exists in the output directory."
)]
pub struct Args {
    /// Manifest the product version is read from
    #[arg(short = 'm', long, value_name = "PATH", default_value = "Cargo.toml")]
    pub manifest: PathBuf,

    /// Cargo target directory holding the Windows builds [default: <manifest dir>/target]
    #[arg(long, value_name = "DIR")]
    pub target_dir: Option<PathBuf>,

    /// Directory with installer resources [default: <manifest dir>/wixcs]
    #[arg(long, value_name = "DIR")]
    pub wixcs_dir: Option<PathBuf>,

    /// Directory the artifacts are written to [default: <manifest dir>/target]
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Artifact to build: msi, wxs (repeatable; default depends on the host)
    #[arg(short, long = "package", value_name = "TYPE")]
    pub packages: Vec<PackageType>,

    /// WiX toolset directory containing candle.exe and light.exe
    #[arg(long, env = "WIX_TOOLSET", value_name = "DIR")]
    pub wix_toolset: Option<PathBuf>,

    /// Target triple of the packaged main binaries (x86_64 or i686 Windows)
    #[arg(long, value_name = "TRIPLE", default_value = "x86_64-pc-windows-gnu")]
    pub target: String,

    /// broadcast_setting_change.exe embedded as the environment-change custom action
    /// [default: next to this executable]
    #[arg(long, env = "OCTOBUILD_BROADCAST_EXE", value_name = "PATH")]
    pub broadcast_exe: Option<PathBuf>,

    /// Never download the WiX toolset
    #[arg(long)]
    pub offline: bool,

    /// Print the artifact summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.manifest.as_os_str().is_empty() {
            return Err("Manifest path cannot be empty".to_string());
        }

        if self.target.is_empty() {
            return Err("Target triple cannot be empty".to_string());
        }

        if !self.target.contains("windows") {
            return Err(format!(
                "Invalid target: {}. The installer packages Windows binaries",
                self.target
            ));
        }

        Arch::from_target(&self.target).map_err(|e| e.to_string())?;

        let mut seen = Vec::new();
        for package in &self.packages {
            if seen.contains(package) {
                return Err(format!("Package type {} given more than once", package));
            }
            seen.push(*package);
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        // JSON output owns stdout
        let output = super::OutputManager::new(args.verbose, args.json);

        Self { output }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["octobuild_installer"]).unwrap();
        assert_eq!(args.manifest, PathBuf::from("Cargo.toml"));
        assert_eq!(args.target, "x86_64-pc-windows-gnu");
        assert!(args.packages.is_empty());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn repeated_package_types() {
        let args = Args::try_parse_from([
            "octobuild_installer",
            "--package",
            "wxs",
            "-p",
            "msi",
        ])
        .unwrap();
        assert_eq!(args.packages, vec![PackageType::Wxs, PackageType::Msi]);

        let dup = Args::try_parse_from(["octobuild_installer", "-p", "wxs", "-p", "WXS"]).unwrap();
        assert!(dup.validate().is_err());
    }

    #[test]
    fn rejects_unknown_package_type() {
        assert!(Args::try_parse_from(["octobuild_installer", "-p", "deb"]).is_err());
    }

    #[test]
    fn rejects_non_windows_target() {
        let args =
            Args::try_parse_from(["octobuild_installer", "--target", "x86_64-unknown-linux-gnu"])
                .unwrap();
        assert!(args.validate().is_err());
    }

    #[test]
    fn target_architectures() {
        let x86 = Args::try_parse_from(["octobuild_installer", "--target", "i686-pc-windows-gnu"])
            .unwrap();
        assert!(x86.validate().is_ok());

        let arm =
            Args::try_parse_from(["octobuild_installer", "--target", "aarch64-pc-windows-msvc"])
                .unwrap();
        assert!(arm.validate().unwrap_err().contains("aarch64"));
    }
}
