use crate::host::Host;
use anyhow::{Context, Result, anyhow};
use flate2::read::GzDecoder;
use log::debug;
use std::path::Path;
use tar::Archive;

/// Extracts the first entry whose path ends with `target_file` from a
/// gzip-compressed tarball into `dest_path`.
#[tracing::instrument(skip(host))]
pub fn extract_from_tar_gz<H: Host>(
    host: &H,
    archive_path: &Path,
    dest_path: &Path,
    target_file: &str,
) -> Result<()> {
    debug!("Extracting {} from {:?}...", target_file, archive_path);

    let file = host
        .open(archive_path)
        .with_context(|| format!("Failed to open archive at {:?}", archive_path))?;
    let gz = GzDecoder::new(file);
    let mut archive = Archive::new(gz);

    let entries = archive
        .entries()
        .context("Failed to read tar archive")?;

    for entry in entries {
        let mut entry = entry.context("Failed to read tar entry")?;
        let matches = entry
            .path()
            .map(|path| path.to_string_lossy().ends_with(target_file))
            .context("Failed to read tar entry path")?;

        if matches {
            return super::write_entry(host, &mut entry, dest_path);
        }
    }

    Err(anyhow!("file {} not found in archive", target_file))
}
