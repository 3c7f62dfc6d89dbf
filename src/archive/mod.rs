//! Pulls the runtime shared library out of a release archive.
//!
//! Release archives nest the library inside a version-named top-level
//! directory, so entries are matched by name suffix rather than full path.
//! The first matching entry wins and the rest of the archive is not
//! scanned.

mod tar_gz;
mod zip;

use crate::host::Host;
use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

pub use tar_gz::extract_from_tar_gz;
pub use zip::extract_from_zip;

/// Extracts `target_file` from the archive at `archive_path` into
/// `dest_path`.
///
/// The format is chosen by the archive's file name: `.zip` goes through
/// the zip reader, everything else is treated as a gzip-compressed
/// tarball.
pub fn extract_library<H: Host>(
    host: &H,
    archive_path: &Path,
    dest_path: &Path,
    target_file: &str,
) -> Result<()> {
    let name = archive_path.to_string_lossy().to_lowercase();
    if name.ends_with(".zip") {
        extract_from_zip(host, archive_path, dest_path, target_file)
    } else {
        extract_from_tar_gz(host, archive_path, dest_path, target_file)
    }
}

/// Streams a matched archive entry to `dest_path` through a temporary
/// sibling file, so a half-written library is never visible under its
/// final name.
fn write_entry<H: Host>(host: &H, entry: &mut dyn Read, dest_path: &Path) -> Result<()> {
    let temp_path = temp_extract_path(dest_path);

    let result = copy_then_rename(host, entry, &temp_path, dest_path);
    if result.is_err() && host.exists(&temp_path) {
        let _ = host.remove_file(&temp_path);
    }
    result
}

fn copy_then_rename<H: Host>(
    host: &H,
    entry: &mut dyn Read,
    temp_path: &Path,
    dest_path: &Path,
) -> Result<()> {
    {
        let mut writer = host
            .create_file(temp_path)
            .with_context(|| format!("Failed to create file at {:?}", temp_path))?;
        std::io::copy(entry, &mut writer)
            .with_context(|| format!("Failed to write {:?}", temp_path))?;
    }

    host.rename(temp_path, dest_path).with_context(|| {
        format!("Failed to move extracted file into place at {:?}", dest_path)
    })
}

fn temp_extract_path(dest: &Path) -> PathBuf {
    let mut path = dest.as_os_str().to_owned();
    path.push(".extract");
    PathBuf::from(path)
}
