//! Configuration for runtime acquisition.

use std::path::PathBuf;

/// Default release host for ONNX Runtime builds.
pub const DEFAULT_BASE_URL: &str =
    "https://github.com/microsoft/onnxruntime/releases/download";

/// ONNX Runtime version fetched when the caller does not pin one.
pub const DEFAULT_VERSION: &str = "1.20.0";

/// Settings controlling where the runtime library comes from and where it
/// is cached. Built once with the `with_*` setters, then handed to the
/// acquisition pipeline and never mutated again.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Base URL of the release host.
    pub base_url: String,
    /// Runtime version to acquire.
    pub version: String,
    /// Cache root; `None` means `.onnx_cache` under the home directory.
    pub cache_dir: Option<PathBuf>,
    /// Explicit path to an already available library. Takes precedence
    /// over the cache and the network.
    pub library_path: Option<PathBuf>,
    /// Request the GPU-accelerated build where one is published.
    pub gpu: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            version: DEFAULT_VERSION.to_string(),
            cache_dir: None,
            library_path: None,
            gpu: false,
        }
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(cache_dir.into());
        self
    }

    pub fn with_library_path(mut self, library_path: impl Into<PathBuf>) -> Self {
        self.library_path = Some(library_path.into());
        self
    }

    pub fn with_gpu(mut self, gpu: bool) -> Self {
        self.gpu = gpu;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.version, DEFAULT_VERSION);
        assert_eq!(config.cache_dir, None);
        assert_eq!(config.library_path, None);
        assert!(!config.gpu);
    }

    #[test]
    fn test_setters_are_independent() {
        let config = RuntimeConfig::new()
            .with_gpu(true)
            .with_version("1.19.2")
            .with_base_url("https://mirror.example.com/releases")
            .with_cache_dir("/var/cache/onnx")
            .with_library_path("/opt/lib/libonnxruntime.so.1.19.2");

        assert_eq!(config.base_url, "https://mirror.example.com/releases");
        assert_eq!(config.version, "1.19.2");
        assert_eq!(config.cache_dir, Some(PathBuf::from("/var/cache/onnx")));
        assert_eq!(
            config.library_path,
            Some(PathBuf::from("/opt/lib/libonnxruntime.so.1.19.2"))
        );
        assert!(config.gpu);
    }
}
