//! Atomic download of a release archive to its cache destination.

use crate::host::Host;
use crate::http::HttpClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use std::path::{Path, PathBuf};

/// Fetches a URL into a destination file.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Download `url` to `dest`, atomically from the caller's perspective:
    /// `dest` either appears complete or not at all.
    async fn download(&self, url: &str, dest: &Path) -> Result<()>;
}

/// [`Downloader`] backed by an [`HttpClient`], writing through a [`Host`].
///
/// The body is streamed to a sibling path suffixed `.download` and renamed
/// into place only once the response has been fully written, so no reader
/// ever observes a partial file under the destination name.
pub struct HttpDownloader<H: Host> {
    host: H,
    client: HttpClient,
}

impl<H: Host> HttpDownloader<H> {
    pub fn new(host: H, client: HttpClient) -> Self {
        Self { host, client }
    }

    async fn fetch_to_temp(&self, url: &str, temp_path: &Path, dest: &Path) -> Result<()> {
        self.client
            .download_file(url, || {
                self.host.create_file(temp_path).with_context(|| {
                    format!("Failed to create temporary file at {:?}", temp_path)
                })
            })
            .await?;

        self.host.rename(temp_path, dest).with_context(|| {
            format!("Failed to move downloaded file into place at {:?}", dest)
        })
    }
}

#[async_trait]
impl<H: Host> Downloader for HttpDownloader<H> {
    #[tracing::instrument(skip(self))]
    async fn download(&self, url: &str, dest: &Path) -> Result<()> {
        info!("Downloading {} to {:?}...", url, dest);

        let temp_path = temp_download_path(dest);
        let result = self.fetch_to_temp(url, &temp_path, dest).await;

        // On success the rename has already moved the file out from under
        // this cleanup; it only catches aborted attempts.
        if self.host.exists(&temp_path) {
            let _ = self.host.remove_file(&temp_path);
        }

        result
    }
}

fn temp_download_path(dest: &Path) -> PathBuf {
    let mut path = dest.as_os_str().to_owned();
    path.push(".download");
    PathBuf::from(path)
}
