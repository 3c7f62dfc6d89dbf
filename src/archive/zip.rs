use crate::host::Host;
use anyhow::{Context, Result, anyhow};
use log::debug;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Extracts the first entry whose name ends with `target_file` from a zip
/// archive into `dest_path`.
#[tracing::instrument(skip(host))]
pub fn extract_from_zip<H: Host>(
    host: &H,
    archive_path: &Path,
    dest_path: &Path,
    target_file: &str,
) -> Result<()> {
    debug!("Extracting {} from {:?}...", target_file, archive_path);

    let mut reader = host
        .open(archive_path)
        .with_context(|| format!("Failed to open archive at {:?}", archive_path))?;

    // The zip reader needs Read + Seek, but Host::open hands back a plain
    // reader, so buffer the archive in memory.
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .with_context(|| format!("Failed to read archive {:?}", archive_path))?;
    let cursor = std::io::Cursor::new(buffer);

    let mut archive = ZipArchive::new(cursor).context("Failed to parse ZIP archive")?;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .with_context(|| format!("Failed to read ZIP entry {}", i))?;

        if entry.name().ends_with(target_file) {
            return super::write_entry(host, &mut entry, dest_path);
        }
    }

    Err(anyhow!("file {} not found in archive", target_file))
}
