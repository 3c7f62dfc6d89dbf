//! The acquisition pipeline: turns a [`RuntimeConfig`] into a local path
//! to a ready-to-load ONNX Runtime shared library.

use crate::archive::extract_library;
use crate::config::RuntimeConfig;
use crate::download::Downloader;
use crate::host::Host;
use crate::platform::RuntimeTarget;
use anyhow::{Context, Result, bail};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Subdirectory of the cache root that holds runtime files.
const RUNTIME_DIR: &str = "runtime";

/// Directory under the home directory used when no cache root is
/// configured.
const DEFAULT_CACHE_DIR: &str = ".onnx_cache";

/// Resolves a usable shared library for `config`, downloading and
/// unpacking the release archive when the cache cannot satisfy it.
///
/// Short-circuits in order: an explicitly configured library path wins
/// over everything (validated, never copied into the cache); an already
/// extracted library in the cache is returned as is; otherwise the
/// release archive is fetched, the library extracted next to it, and the
/// archive removed.
#[tracing::instrument(skip(host, downloader, config))]
pub async fn ensure_library<H: Host, D: Downloader>(
    host: &H,
    downloader: &D,
    config: &RuntimeConfig,
) -> Result<PathBuf> {
    let target = RuntimeTarget::current(&config.version, config.gpu)?;
    ensure_library_for(host, downloader, config, &target).await
}

/// Same as [`ensure_library`] for an already resolved target. Split out
/// so tests can drive platforms other than the one they run on.
pub(crate) async fn ensure_library_for<H: Host, D: Downloader>(
    host: &H,
    downloader: &D,
    config: &RuntimeConfig,
    target: &RuntimeTarget,
) -> Result<PathBuf> {
    let library_name = target.library_name();

    if let Some(library_path) = &config.library_path {
        validate_override(host, library_path, &library_name)?;
        return Ok(library_path.clone());
    }

    let runtime_dir = cache_root(host, config)?.join(RUNTIME_DIR);
    host.create_dir_all(&runtime_dir)
        .with_context(|| format!("Failed to create cache directory {:?}", runtime_dir))?;

    let library_path = runtime_dir.join(&library_name);
    if host.exists(&library_path) {
        debug!("Using cached runtime library at {:?}", library_path);
        return Ok(library_path);
    }

    let archive_path = runtime_dir.join(target.archive_name());
    if host.exists(&archive_path) {
        // Leftover from an interrupted run; extraction will tell us
        // whether it is usable.
        debug!("Reusing previously downloaded archive at {:?}", archive_path);
    } else {
        let url = target.archive_url(&config.base_url);
        downloader
            .download(&url, &archive_path)
            .await
            .context("Failed to download runtime archive")?;
    }

    extract_library(host, &archive_path, &library_path, &library_name)
        .context("Failed to extract runtime library")?;

    host.remove_file(&archive_path)
        .with_context(|| format!("Failed to remove archive {:?}", archive_path))?;

    info!("Runtime library ready at {:?}", library_path);
    Ok(library_path)
}

/// An explicit library path must carry the extension the resolved platform
/// expects, and must exist. The extension check runs first so a wrong-OS
/// library is reported as such even when the path is also missing.
fn validate_override<H: Host>(host: &H, path: &Path, library_name: &str) -> Result<()> {
    if path.extension() != Path::new(library_name).extension() {
        bail!(
            "configured library {:?} is not valid for the current platform (expected something like {})",
            path,
            library_name
        );
    }
    if !host.exists(path) {
        bail!("configured library path {:?} does not exist", path);
    }
    Ok(())
}

fn cache_root<H: Host>(host: &H, config: &RuntimeConfig) -> Result<PathBuf> {
    match &config.cache_dir {
        Some(dir) => Ok(dir.clone()),
        None => host
            .home_dir()
            .map(|home| home.join(DEFAULT_CACHE_DIR))
            .context("Failed to determine home directory for the runtime cache"),
    }
}
