//! WiX toolset acquisition and management.
//!
//! Locates `candle`/`light`, downloading the pinned WiX 3.11 binaries into
//! the user cache directory when nothing is installed.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::WixSettings,
    utils::http,
};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

pub const TOOLSET_URL: &str =
    "https://github.com/wixtoolset/wix3/releases/download/wix3112rtm/wix311-binaries.zip";
pub const TOOLSET_SHA256: &str =
    "2c1888d5d1dba377fc7fa14444cf556963747ff9a0a289a3599cf09da03b9e2e";

const CANDLE: &str = "candle.exe";

/// Directory holding `candle.exe` and `light.exe`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WixToolset {
    pub bin_dir: PathBuf,
}

impl WixToolset {
    pub fn candle(&self) -> PathBuf {
        self.bin_dir.join(CANDLE)
    }

    pub fn light(&self) -> PathBuf {
        self.bin_dir.join("light.exe")
    }
}

fn has_candle(dir: &Path) -> bool {
    dir.join(CANDLE).is_file()
}

/// Get WiX toolset.
///
/// Lookup order:
/// 1. `settings.toolset` (either the bin directory or the install root)
/// 2. `%WIX%\bin`, as set by the WiX installer
/// 3. `candle` on `PATH`
/// 4. the cache directory
/// 5. a verified download into the cache directory, unless disabled
pub async fn get_wix_toolset(settings: &WixSettings) -> Result<WixToolset> {
    if let Some(dir) = &settings.toolset {
        for candidate in [dir.clone(), dir.join("bin")] {
            if has_candle(&candidate) {
                return Ok(WixToolset { bin_dir: candidate });
            }
        }
        return Err(Error::ToolsetNotFound(format!(
            "{} does not contain {}",
            dir.display(),
            CANDLE
        )));
    }

    if let Some(root) = std::env::var_os("WIX") {
        let bin_dir = PathBuf::from(root).join("bin");
        if has_candle(&bin_dir) {
            log::debug!("Using WiX toolset from %WIX%: {}", bin_dir.display());
            return Ok(WixToolset { bin_dir });
        }
    }

    if let Ok(path) = which::which("candle") {
        if let Some(bin_dir) = path.parent() {
            log::debug!("Using WiX toolset from PATH: {}", bin_dir.display());
            return Ok(WixToolset {
                bin_dir: bin_dir.to_path_buf(),
            });
        }
    }

    let cache_dir = cache_directory()?;
    if let Some(bin_dir) = find_candle_dir(&cache_dir)? {
        log::debug!("Using cached WiX toolset: {}", bin_dir.display());
        return Ok(WixToolset { bin_dir });
    }

    if !settings.allow_download {
        return Err(Error::ToolsetNotFound(
            "no installed toolset and downloads are disabled".into(),
        ));
    }

    download_toolset(&cache_dir).await?;
    find_candle_dir(&cache_dir)?
        .map(|bin_dir| WixToolset { bin_dir })
        .ok_or_else(|| {
            Error::ToolsetNotFound(format!(
                "downloaded archive did not contain {}",
                CANDLE
            ))
        })
}

/// Cache location of the downloaded toolset.
fn cache_directory() -> Result<PathBuf> {
    dirs::cache_dir()
        .map(|dir| dir.join("octobuild-installer").join("wix311"))
        .ok_or_else(|| Error::ToolsetNotFound("no user cache directory available".into()))
}

/// Find the directory containing `candle.exe` below `root`.
fn find_candle_dir(root: &Path) -> Result<Option<PathBuf>> {
    if !root.is_dir() {
        return Ok(None);
    }
    for entry in walkdir::WalkDir::new(root).max_depth(2) {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name().eq_ignore_ascii_case(CANDLE) {
            return Ok(entry.path().parent().map(Path::to_path_buf));
        }
    }
    Ok(None)
}

/// Hex SHA-256 of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Check downloaded bytes against the pinned digest.
pub fn verify_sha256(url: &str, data: &[u8], expected: &str) -> Result<()> {
    let actual = sha256_hex(data);
    if actual.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(Error::ChecksumMismatch {
            url: url.to_string(),
            expected: expected.to_string(),
            actual,
        })
    }
}

async fn download_toolset(cache_dir: &Path) -> Result<()> {
    let data = http::download(TOOLSET_URL).await?;
    verify_sha256(TOOLSET_URL, &data, TOOLSET_SHA256)?;

    tokio::fs::create_dir_all(cache_dir)
        .await
        .fs_context("creating WiX cache directory", cache_dir)?;

    let target = cache_dir.to_path_buf();
    tokio::task::spawn_blocking(move || -> Result<()> {
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data))?;
        archive.extract(&target)?;
        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("WiX extraction task panicked: {}", e)))??;

    log::info!("Extracted WiX toolset to {}", cache_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_rejects_tampered_data() {
        let expected = sha256_hex(b"wix");
        assert!(verify_sha256("u", b"wix", &expected).is_ok());
        assert!(verify_sha256("u", b"wix", &expected.to_uppercase()).is_ok());
        let err = verify_sha256("u", b"wi", &expected).unwrap_err();
        assert!(matches!(err, Error::ChecksumMismatch { .. }));
    }

    #[tokio::test]
    async fn explicit_toolset_accepts_install_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("bin")).unwrap();
        std::fs::write(dir.path().join("bin").join(CANDLE), b"").unwrap();

        let settings = WixSettings {
            toolset: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let toolset = get_wix_toolset(&settings).await.unwrap();
        assert_eq!(toolset.bin_dir, dir.path().join("bin"));
        assert_eq!(toolset.light(), dir.path().join("bin").join("light.exe"));
    }

    #[tokio::test]
    async fn explicit_toolset_without_candle_fails() {
        let dir = tempfile::tempdir().unwrap();
        let settings = WixSettings {
            toolset: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        assert!(matches!(
            get_wix_toolset(&settings).await,
            Err(Error::ToolsetNotFound(_))
        ));
    }

    #[test]
    fn finds_candle_in_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("wix311")).unwrap();
        std::fs::write(dir.path().join("wix311").join("Candle.exe"), b"").unwrap();
        assert_eq!(
            find_candle_dir(dir.path()).unwrap(),
            Some(dir.path().join("wix311"))
        );
    }
}
