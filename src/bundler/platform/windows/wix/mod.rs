//! Windows MSI installer creation with the WiX toolset.
//!
//! # Module Organization
//!
//! - `environment` - environment variable declarations and scope expansion
//! - `tree` - declarative installer layout
//! - `template` - WXS template constant
//! - `script` - WXS generation from settings and layout
//! - `toolset` - WiX toolset location and download
//! - `build` - candle/light execution
//! - `utils` - architecture mapping, version formatting, identifiers

pub mod build;
pub mod environment;
pub mod script;
mod template;
pub mod toolset;
pub mod tree;
pub mod utils;

use crate::bundler::{PackageType, error::Result, settings::Settings, utils::fs};
use std::path::PathBuf;

/// Write the product WiX source next to the other artifacts.
///
/// # Returns
///
/// Vector containing the path to `<product>-<version>.wxs`
pub async fn bundle_wxs(settings: &Settings) -> Result<Vec<PathBuf>> {
    let wxs_path = settings.artifact_path(PackageType::Wxs);
    let path = script::generate_wxs(settings, &wxs_path).await?;
    log::info!("✓ Created WiX source: {}", path.display());
    Ok(vec![path])
}

/// Bundle project as MSI package.
///
/// # Process
///
/// 1. Acquire the WiX toolset (installed, cached or downloaded)
/// 2. Map target architecture to the WiX arch string
/// 3. Check that every source file exists
/// 4. Generate the WXS source into an intermediate directory
/// 5. Compile with candle and link with light
///
/// # Returns
///
/// Vector containing the path to `<product>-<version>.msi`
pub async fn bundle_msi(settings: &Settings) -> Result<Vec<PathBuf>> {
    log::info!("Building MSI package for {}", settings.product_name());

    let wix = &settings.windows().wix;
    let toolset = toolset::get_wix_toolset(wix).await?;
    log::info!("WiX toolset: {}", toolset.bin_dir.display());

    let arch = utils::map_arch(settings.binary_arch());

    let mut sources = settings.layout().source_files();
    sources.extend(wix.license.iter().cloned());
    fs::check_sources_exist(&sources)?;

    let work_dir = settings.project_out_directory().join("wix").join(arch);
    fs::create_dir_all(&work_dir, true).await?;

    let wxs_path = script::generate_wxs(settings, &work_dir.join("main.wxs")).await?;
    let wixobj_path = work_dir.join("main.wixobj");
    build::run_candle(&toolset, wix, arch, &wxs_path, &wixobj_path).await?;

    let msi_path = settings.artifact_path(PackageType::Msi);
    build::run_light(&toolset, wix, &wixobj_path, &msi_path).await?;

    log::info!("✓ Created MSI package: {}", msi_path.display());
    Ok(vec![msi_path])
}
