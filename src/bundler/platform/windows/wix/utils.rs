//! WiX utility functions.
//!
//! Helpers for architecture mapping, MSI version formatting and
//! deterministic identifier generation.

use crate::bundler::{
    error::{Error, Result},
    settings::Arch,
};
use uuid::Uuid;

/// Map architecture to the WiX `-arch` / `Platform` value.
pub fn map_arch(arch: Arch) -> &'static str {
    match arch {
        Arch::X86_64 => "x64",
        Arch::X86 => "x86",
    }
}

/// Format a semantic version as an MSI `ProductVersion`.
///
/// Windows Installer only compares `major.minor.build`, with limits of
/// 255, 255 and 65535. Pre-release and build metadata are dropped:
/// - "1.2.3" -> "1.2.3"
/// - "0.1.14-rc.1" -> "0.1.14"
pub fn format_version_for_msi(version: &semver::Version) -> Result<String> {
    if version.major > 255 || version.minor > 255 || version.patch > 65535 {
        return Err(Error::InvalidVersion(format!(
            "{} exceeds the MSI limits 255.255.65535",
            version
        )));
    }

    Ok(format!("{}.{}.{}", version.major, version.minor, version.patch))
}

/// Deterministic GUID for a component, derived from the upgrade code and a key.
///
/// Stable across rebuilds so component rules hold between versions.
pub fn component_guid(upgrade_code: &Uuid, key: &str) -> String {
    Uuid::new_v5(upgrade_code, format!("component/{key}").as_bytes())
        .hyphenated()
        .to_string()
        .to_uppercase()
}

/// Deterministic WiX identifier `<prefix>_<hex>` for a key.
///
/// WiX identifiers are limited to 72 characters of `[A-Za-z0-9_.]`; the
/// 32 hex digits of a v5 UUID keep it well within that.
pub fn wix_id(prefix: &str, upgrade_code: &Uuid, key: &str) -> String {
    let digest = Uuid::new_v5(upgrade_code, format!("{prefix}/{key}").as_bytes());
    format!("{}_{}", prefix, digest.simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODE: Uuid = Uuid::from_u128(0xb4505233_6377_406b_955b_2547d86a99a7);

    #[test]
    fn msi_version_drops_prerelease() {
        let v = semver::Version::parse("0.1.14-rc.1+build.5").unwrap();
        assert_eq!(format_version_for_msi(&v).unwrap(), "0.1.14");
    }

    #[test]
    fn msi_version_limits() {
        let ok = semver::Version::new(255, 255, 65535);
        assert!(format_version_for_msi(&ok).is_ok());
        assert!(format_version_for_msi(&semver::Version::new(256, 0, 0)).is_err());
        assert!(format_version_for_msi(&semver::Version::new(1, 0, 65536)).is_err());
    }

    #[test]
    fn ids_are_stable_and_valid() {
        let a = wix_id("cmp", &CODE, "msbuild/octobuild.x64.dll");
        let b = wix_id("cmp", &CODE, "msbuild/octobuild.x64.dll");
        assert_eq!(a, b);
        assert!(a.len() <= 72);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        assert_ne!(a, wix_id("cmp", &CODE, "msbuild/octobuild.x86.dll"));
    }

    #[test]
    fn guid_is_uppercase_hyphenated() {
        let guid = component_guid(&CODE, "xgConsole.exe");
        assert_eq!(guid.len(), 36);
        assert_eq!(guid, guid.to_uppercase());
    }

    #[test]
    fn wix_platform_names() {
        assert_eq!(map_arch(Arch::X86_64), "x64");
        assert_eq!(map_arch(Arch::X86), "x86");
    }
}
