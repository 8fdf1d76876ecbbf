//! File system utilities for bundling.
//!
//! Provides idempotent directory operations and source-file checks with
//! path-aware error messages.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{io, path::Path, path::PathBuf};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(Error::Fs {
            context: "removing directory",
            path: path.to_path_buf(),
            error: e,
        }),
    }
}

/// Fails with every missing or non-file path listed when any source is absent.
pub fn check_sources_exist(paths: &[PathBuf]) -> Result<()> {
    let missing: Vec<String> = paths
        .iter()
        .filter(|p| !p.is_file())
        .map(|p| p.display().to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidLayout(format!(
            "missing source files: {}",
            missing.join(", ")
        )))
    }
}

/// Total size in bytes of the given files.
pub async fn total_size(paths: &[PathBuf]) -> Result<u64> {
    let mut size = 0u64;
    for p in paths {
        let metadata = fs::metadata(p)
            .await
            .fs_context("reading artifact metadata", p)?;
        size += metadata.len();
    }
    Ok(size)
}
