//! CPU architecture types and utilities.

use crate::bundler::error::{Error, Result};

/// CPU architecture of the packaged binaries.
///
/// Detected from the Rust target triple the installer payload was built for.
/// Only the platforms WiX 3 can package are representable.
///
/// # Examples
///
/// ```no_run
/// use octobuild_installer::bundler::Arch;
///
/// let arch = Arch::from_target("x86_64-pc-windows-gnu").unwrap();
/// assert_eq!(arch, Arch::X86_64);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// x86_64 / AMD64 (64-bit)
    X86_64,
    /// x86 / i686 (32-bit)
    X86,
}

impl Arch {
    /// Detects the architecture from a target triple.
    pub fn from_target(target: &str) -> Result<Self> {
        let cpu = target.split('-').next().unwrap_or_default();
        match cpu {
            "x86_64" => Ok(Arch::X86_64),
            "i386" | "i586" | "i686" => Ok(Arch::X86),
            _ => Err(Error::ArchError(format!(
                "unsupported target {} (expected an x86_64 or i686 Windows triple)",
                target
            ))),
        }
    }

    /// Whether binaries for this architecture install under `ProgramFiles64Folder`.
    pub fn is_64bit(self) -> bool {
        matches!(self, Arch::X86_64)
    }
}
