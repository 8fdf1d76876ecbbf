//! External tool detection and availability checking.
//!
//! Building an MSI on a non-Windows host needs `wine` to run the WiX tools.

use std::sync::LazyLock;

/// Check if wine is available for running candle/light.
///
/// Cached result to avoid repeated subprocess calls during bundling.
pub static HAS_WINE: LazyLock<bool> = LazyLock::new(|| match which::which("wine") {
    Ok(path) => {
        log::debug!("Found wine at: {}", path.display());

        match std::process::Command::new(&path).arg("--version").output() {
            Ok(output) if output.status.success() => {
                let version = String::from_utf8_lossy(&output.stdout);
                log::info!("✓ wine available: {}", version.trim());
                true
            }
            Ok(output) => {
                log::warn!(
                    "wine found at {} but --version check failed (exit code: {:?}). \
                         MSI packages will be skipped. \
                         Stderr: {}",
                    path.display(),
                    output.status.code(),
                    String::from_utf8_lossy(&output.stderr)
                );
                false
            }
            Err(e) => {
                log::warn!(
                    "wine found at {} but failed to execute: {}. \
                         MSI packages will be skipped.",
                    path.display(),
                    e
                );
                false
            }
        }
    }
    Err(e) => {
        log::debug!("wine not found in PATH: {}. MSI packages will be skipped.", e);
        false
    }
});

/// Whether this host can run the WiX toolset.
pub fn can_build_msi() -> bool {
    cfg!(windows) || *HAS_WINE
}
