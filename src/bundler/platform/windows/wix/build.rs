//! WiX compilation.
//!
//! Runs `candle` (WXS -> WIXOBJ) and `light` (WIXOBJ -> MSI). On non-Windows
//! hosts the tools are started through `wine`.

use super::toolset::WixToolset;
use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::WixSettings,
};
use std::ffi::OsString;
use std::path::Path;

/// Build the command line for a Windows executable on this host.
fn windows_command(program: &Path, args: Vec<OsString>) -> (OsString, Vec<OsString>) {
    if cfg!(windows) {
        (program.as_os_str().to_owned(), args)
    } else {
        let mut wine_args = Vec::with_capacity(args.len() + 1);
        wine_args.push(program.as_os_str().to_owned());
        wine_args.extend(args);
        (OsString::from("wine"), wine_args)
    }
}

/// Arguments for `candle`.
pub fn candle_args(
    settings: &WixSettings,
    arch: &str,
    wxs_path: &Path,
    wixobj_path: &Path,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-nologo".into(), "-arch".into(), arch.into()];
    for extension in &settings.extensions {
        args.push("-ext".into());
        args.push(extension.into());
    }
    args.push("-out".into());
    args.push(wixobj_path.into());
    args.push(wxs_path.into());
    args
}

/// Arguments for `light`.
pub fn light_args(settings: &WixSettings, wixobj_path: &Path, msi_path: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-nologo".into()];
    for extension in &settings.extensions {
        args.push("-ext".into());
        args.push(extension.into());
    }
    if !settings.cultures.is_empty() {
        args.push(format!("-cultures:{}", settings.cultures.join(";")).into());
    }
    args.extend(settings.light_options.iter().map(OsString::from));
    args.push("-out".into());
    args.push(msi_path.into());
    args.push(wixobj_path.into());
    args
}

async fn run_tool(tool: &str, program: &Path, args: Vec<OsString>) -> Result<()> {
    let (command, args) = windows_command(program, args);
    log::debug!("Running {:?} {:?}", command, args);

    let output = tokio::process::Command::new(&command)
        .args(&args)
        .output()
        .await
        .map_err(|e| Error::CommandFailed {
            command: command.to_string_lossy().into_owned(),
            error: e,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
        log::debug!("{}: {}", tool, line);
    }

    if !output.status.success() {
        // WiX reports errors on stdout.
        let mut details = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if details.is_empty() {
            details = stdout.trim().to_string();
        }
        return Err(Error::ToolFailed {
            tool: tool.to_string(),
            status: output.status.to_string(),
            stderr: details,
        });
    }

    Ok(())
}

/// Run candle to compile the WXS source into an object file.
pub async fn run_candle(
    toolset: &WixToolset,
    settings: &WixSettings,
    arch: &str,
    wxs_path: &Path,
    wixobj_path: &Path,
) -> Result<()> {
    log::info!("Running candle...");
    run_tool(
        "candle",
        &toolset.candle(),
        candle_args(settings, arch, wxs_path, wixobj_path),
    )
    .await
}

/// Run light to link the object file into an MSI package.
pub async fn run_light(
    toolset: &WixToolset,
    settings: &WixSettings,
    wixobj_path: &Path,
    msi_path: &Path,
) -> Result<()> {
    log::info!("Running light...");

    if let Some(parent) = msi_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating MSI output directory", parent)?;
    }

    run_tool(
        "light",
        &toolset.light(),
        light_args(settings, wixobj_path, msi_path),
    )
    .await
}
