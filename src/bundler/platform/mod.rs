//! Platform-specific installer backends.

pub mod windows;

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Installer artifact kinds the bundler can produce.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    /// Windows Installer package, compiled by the WiX toolset.
    Msi,
    /// WiX XML source describing the package.
    Wxs,
}

impl PackageType {
    /// File extension (without dot) of the produced artifact.
    pub fn extension(self) -> &'static str {
        match self {
            PackageType::Msi => "msi",
            PackageType::Wxs => "wxs",
        }
    }

    /// All supported package types, in build order.
    pub fn all() -> &'static [PackageType] {
        &[PackageType::Msi, PackageType::Wxs]
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for PackageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "msi" => Ok(PackageType::Msi),
            "wxs" => Ok(PackageType::Wxs),
            other => Err(format!(
                "Invalid package type: {}. Valid package types: msi, wxs",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("MSI".parse::<PackageType>(), Ok(PackageType::Msi));
        assert_eq!("wxs".parse::<PackageType>(), Ok(PackageType::Wxs));
        assert!("exe".parse::<PackageType>().is_err());
    }
}
