//! Resolves, downloads, caches, and unpacks the ONNX Runtime shared
//! library on first use, so host applications never have to ship or
//! manually manage the native binary.

pub mod archive;
pub mod config;
pub mod download;
pub mod env;
pub mod fetch;
pub mod host;
pub mod http;
pub mod platform;
pub mod runtime;

/// Test fixtures: synthetic release archives.
#[cfg(test)]
pub mod test_utils {
    use anyhow::Result;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;
    use tar::Builder;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    /// Builds a gzip-compressed tarball at `path` with the given
    /// (entry name, contents) pairs, in order.
    pub fn create_test_tar_gz(path: &Path, files: &[(&str, &[u8])]) -> Result<()> {
        let file = File::create(path)?;
        let enc = GzEncoder::new(file, Compression::default());
        let mut tar = Builder::new(enc);

        for (name, content) in files {
            let mut header = tar::Header::new_gnu();
            header.set_path(name)?;
            header.set_size(content.len() as u64);
            header.set_cksum();
            tar.append(&header, *content)?;
        }

        tar.finish()?;
        Ok(())
    }

    /// Builds a zip archive at `path` with the given (entry name,
    /// contents) pairs, in order.
    pub fn create_test_zip(path: &Path, files: &[(&str, &[u8])]) -> Result<()> {
        let file = File::create(path)?;
        let mut zip = ZipWriter::new(file);
        let options: FileOptions<()> =
            FileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, content) in files {
            zip.start_file(*name, options)?;
            zip.write_all(content)?;
        }

        zip.finish()?;
        Ok(())
    }
}
