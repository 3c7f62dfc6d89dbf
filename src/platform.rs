//! Platform resolution for ONNX Runtime release artifacts.
//!
//! Maps the running operating system and CPU architecture, plus the
//! requested version and GPU flag, to the archive and library names the
//! upstream release layout publishes.

use anyhow::{Context, Result, bail};

/// Operating system family, named the way release archives name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Windows,
    MacOs,
    Linux,
}

impl Os {
    /// Detect the current operating system.
    ///
    /// Anything that is not Windows or macOS falls into the Linux branch,
    /// matching the upstream release layout which only distinguishes these
    /// three families.
    pub fn detect() -> Self {
        #[cfg(target_os = "windows")]
        {
            Os::Windows
        }
        #[cfg(target_os = "macos")]
        {
            Os::MacOs
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            Os::Linux
        }
    }

    /// Tag used in release archive names.
    pub fn tag(&self) -> &'static str {
        match self {
            Os::Windows => "win",
            Os::MacOs => "osx",
            Os::Linux => "linux",
        }
    }

    /// Extension of release archives for this OS.
    pub fn archive_extension(&self) -> &'static str {
        match self {
            Os::Windows => "zip",
            Os::MacOs | Os::Linux => "tgz",
        }
    }
}

/// CPU architectures the upstream project publishes builds for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X64,
    Aarch64,
    X86,
}

impl Arch {
    /// Detect the current CPU architecture, or `None` when no upstream
    /// build exists for it.
    pub fn detect() -> Option<Self> {
        #[cfg(target_arch = "x86_64")]
        {
            Some(Arch::X64)
        }
        #[cfg(target_arch = "aarch64")]
        {
            Some(Arch::Aarch64)
        }
        #[cfg(target_arch = "x86")]
        {
            Some(Arch::X86)
        }
        #[cfg(not(any(
            target_arch = "x86_64",
            target_arch = "aarch64",
            target_arch = "x86"
        )))]
        {
            None
        }
    }
}

/// Resolved description of the runtime build to acquire: which OS and
/// architecture tags go into the download URL, which version is wanted,
/// and what the extracted shared library file is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeTarget {
    pub os: Os,
    pub arch: Arch,
    pub version: String,
    pub gpu: bool,
}

impl RuntimeTarget {
    /// Resolves a target for the given platform.
    ///
    /// Fails when the architecture is unknown, or for 32-bit x86 anywhere
    /// but Windows, where the upstream project publishes no build.
    pub fn resolve(os: Os, arch: Option<Arch>, version: &str, gpu: bool) -> Result<Self> {
        let arch = arch.with_context(|| {
            format!("unsupported architecture: {}", std::env::consts::ARCH)
        })?;
        if arch == Arch::X86 && os != Os::Windows {
            bail!("no x86 runtime build is published for {}", os.tag());
        }
        Ok(Self {
            os,
            arch,
            version: version.to_string(),
            gpu,
        })
    }

    /// Resolves a target for the platform this process is running on.
    pub fn current(version: &str, gpu: bool) -> Result<Self> {
        Self::resolve(Os::detect(), Arch::detect(), version, gpu)
    }

    /// File name of the shared library once extracted. Linux and macOS
    /// embed the version in the name; Windows does not.
    pub fn library_name(&self) -> String {
        match self.os {
            Os::Windows => "onnxruntime.dll".to_string(),
            Os::MacOs => format!("libonnxruntime.{}.dylib", self.version),
            Os::Linux => format!("libonnxruntime.so.{}", self.version),
        }
    }

    /// Architecture tag as it appears in archive names. The same
    /// architecture is spelled differently per OS in the upstream layout.
    fn arch_tag(&self) -> &'static str {
        match (self.arch, self.os) {
            (Arch::X64, Os::MacOs) => "x86_64",
            (Arch::X64, _) => "x64",
            (Arch::Aarch64, Os::Linux) => "aarch64",
            (Arch::Aarch64, _) => "arm64",
            // resolve() only admits x86 on Windows
            (Arch::X86, _) => "x86",
        }
    }

    /// Whether a GPU-accelerated build exists for this target. Upstream
    /// offers GPU builds only for 64-bit x86 on Windows and Linux.
    fn gpu_build(&self) -> bool {
        self.gpu && matches!(self.os, Os::Windows | Os::Linux) && self.arch == Arch::X64
    }

    /// Basename of the release archive for this target.
    pub fn archive_name(&self) -> String {
        let mut name = format!("onnxruntime-{}-{}", self.os.tag(), self.arch_tag());
        if self.gpu_build() {
            name.push_str("-gpu");
        }
        format!("{}-{}.{}", name, self.version, self.os.archive_extension())
    }

    /// Full download URL for this target's release archive.
    pub fn archive_url(&self, base_url: &str) -> String {
        format!("{}/v{}/{}", base_url, self.version, self.archive_name())
    }
}
