//! The top-level runtime session: configure, acquire, initialize, use,
//! close.

use crate::config::RuntimeConfig;
use crate::download::{Downloader, HttpDownloader};
use crate::env::{EnvironmentSession, NativeEnvironment};
use crate::fetch::ensure_library_for;
use crate::host::{Host, RealHost};
use crate::http::HttpClient;
use crate::platform::RuntimeTarget;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// A configured and initialized ONNX Runtime: the shared library has been
/// resolved to a local file and handed to the native binding.
pub struct OnnxRuntime<E: NativeEnvironment> {
    config: RuntimeConfig,
    target: RuntimeTarget,
    library_path: PathBuf,
    session: EnvironmentSession<E>,
}

impl<E: NativeEnvironment> OnnxRuntime<E> {
    /// Acquires the runtime library per `config` and brings the native
    /// environment up around it.
    pub async fn new<H: Host, D: Downloader>(
        host: &H,
        downloader: &D,
        env: E,
        config: RuntimeConfig,
    ) -> Result<Self> {
        let target = RuntimeTarget::current(&config.version, config.gpu)?;
        let library_path = ensure_library_for(host, downloader, &config, &target)
            .await
            .context("Failed to ensure runtime library")?;
        let session = EnvironmentSession::init(env, &library_path)?;

        Ok(Self {
            config,
            target,
            library_path,
            session,
        })
    }

    /// [`new`](OnnxRuntime::new) wired to the real host and an HTTP
    /// downloader.
    pub async fn with_defaults(env: E, config: RuntimeConfig) -> Result<Self> {
        let downloader = HttpDownloader::new(RealHost, HttpClient::default());
        Self::new(&RealHost, &downloader, env, config).await
    }

    /// The platform descriptor the library was resolved for.
    pub fn target(&self) -> &RuntimeTarget {
        &self.target
    }

    /// Path to the shared library in use.
    pub fn library_path(&self) -> &Path {
        &self.library_path
    }

    /// The configuration this runtime was built from.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Shuts the native environment down.
    pub fn close(self) -> Result<()> {
        self.session.close()
    }
}
