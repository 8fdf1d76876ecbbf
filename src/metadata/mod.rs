//! Version and installer metadata discovery from the product manifest.

use crate::error::{InstallerError, Result};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// `version = "X"` with optional leading whitespace; captures the quoted token.
static VERSION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*version\s*=\s*"(\S+)""#).expect("version pattern is a valid regex")
});

const BOM: char = '\u{feff}';

/// Scan lines for the first `version = "X"` and return `X`.
///
/// Stops at the first matching line. Returns `Ok(None)` when the input is
/// exhausted without a match. Invalid UTF-8 is decoded lossily and a
/// leading byte-order mark is ignored; only I/O failures are errors.
pub fn scan_version<R: BufRead>(mut reader: R) -> std::io::Result<Option<String>> {
    let mut buf = Vec::new();
    let mut first = true;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }

        let decoded = String::from_utf8_lossy(&buf);
        let mut line = decoded.trim_end_matches(['\n', '\r']);
        if first {
            line = line.strip_prefix(BOM).unwrap_or(line);
            first = false;
        }

        if let Some(captures) = VERSION_LINE.captures(line) {
            return Ok(Some(captures[1].to_string()));
        }
    }
}

/// Read the version token from a manifest file.
///
/// # Errors
///
/// Returns [`InstallerError::ManifestAccess`] if the file is missing or unreadable.
/// A readable file without a version line is `Ok(None)`.
pub fn read_version(path: &Path) -> Result<Option<String>> {
    let access = |source| InstallerError::ManifestAccess {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(access)?;
    scan_version(BufReader::new(file)).map_err(access)
}

/// Read and validate the product version.
///
/// Unlike [`read_version`], a missing version line is an error, and the token
/// must parse as a semantic version.
pub fn require_version(path: &Path) -> Result<semver::Version> {
    let token = read_version(path)?.ok_or_else(|| InstallerError::VersionNotFound {
        path: path.to_path_buf(),
    })?;

    semver::Version::parse(&token).map_err(|source| InstallerError::InvalidVersion {
        version: token,
        path: path.to_path_buf(),
        source,
    })
}

/// Optional package metadata used for installer branding.
#[derive(Debug, Clone, Default)]
pub struct PackageMetadata {
    /// `[package] name`
    pub name: Option<String>,

    /// `[package] description`
    pub description: Option<String>,

    /// `[package] homepage`, falling back to `repository`
    pub homepage: Option<String>,
}

/// Overrides from the `[package.metadata.wix]` table.
#[derive(Debug, Clone, Default)]
pub struct WixOverrides {
    pub product_name: Option<String>,
    pub manufacturer: Option<String>,
    pub url_info_about: Option<String>,
    pub upgrade_code: Option<String>,
    pub license: Option<PathBuf>,
    pub ui: Option<String>,
    pub light_options: Option<Vec<String>>,
    pub cultures: Option<Vec<String>>,
}

/// Metadata parsed from the manifest (besides the version).
#[derive(Debug, Clone, Default)]
pub struct ManifestMetadata {
    /// Package metadata (`[package]` section)
    pub package: PackageMetadata,

    /// Installer overrides (`[package.metadata.wix]` section)
    pub wix: WixOverrides,
}

/// Load package metadata and WiX overrides from a TOML manifest.
///
/// Every field is optional; a manifest without a `[package]` section yields
/// empty metadata. Relative `license` paths resolve against the manifest's
/// directory. The content is decoded the same way as in [`scan_version`].
pub fn load_manifest(manifest_path: &Path) -> Result<ManifestMetadata> {
    let bytes = std::fs::read(manifest_path).map_err(|source| InstallerError::ManifestAccess {
        path: manifest_path.to_path_buf(),
        source,
    })?;
    let decoded = String::from_utf8_lossy(&bytes);
    let manifest = decoded.strip_prefix(BOM).unwrap_or(decoded.as_ref());

    let toml_value: toml::Value =
        toml::from_str(manifest).map_err(|source| InstallerError::Toml {
            path: manifest_path.to_path_buf(),
            source,
        })?;

    let Some(package) = toml_value.get("package") else {
        log::debug!("No [package] section in {}", manifest_path.display());
        return Ok(ManifestMetadata::default());
    };

    let string = |table: &toml::Value, key: &str| {
        table.get(key).and_then(|v| v.as_str()).map(String::from)
    };
    let strings = |table: &toml::Value, key: &str| {
        table.get(key).and_then(|v| v.as_array()).map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect::<Vec<_>>()
        })
    };

    let metadata = PackageMetadata {
        name: string(package, "name"),
        description: string(package, "description"),
        homepage: string(package, "homepage").or_else(|| string(package, "repository")),
    };

    let base_dir = manifest_path.parent().unwrap_or_else(|| Path::new(""));
    let wix = match package.get("metadata").and_then(|m| m.get("wix")) {
        Some(table) => WixOverrides {
            product_name: string(table, "product_name"),
            manufacturer: string(table, "manufacturer"),
            url_info_about: string(table, "url_info_about"),
            upgrade_code: string(table, "upgrade_code"),
            license: string(table, "license").map(|p| base_dir.join(p)),
            ui: string(table, "ui"),
            light_options: strings(table, "light_options"),
            cultures: strings(table, "cultures"),
        },
        None => WixOverrides::default(),
    };

    Ok(ManifestMetadata {
        package: metadata,
        wix,
    })
}
