//! Lifecycle management for the native runtime environment.
//!
//! The binding layer receives three calls: point it at the shared library,
//! initialize the environment, destroy the environment. The session type
//! here makes that an explicit-lifecycle resource whose release is
//! guaranteed even when the caller forgets to close it.

use anyhow::{Context, Result};
use log::warn;
use std::path::Path;

/// The native binding surface driven once a library path is acquired.
#[cfg_attr(test, mockall::automock)]
pub trait NativeEnvironment: Send + Sync {
    /// Point the binding at the shared library to load. Must happen
    /// before [`initialize`](NativeEnvironment::initialize).
    fn set_library_path(&self, path: &Path) -> Result<()>;

    /// Bring the native environment up. Called exactly once per session.
    fn initialize(&self) -> Result<()>;

    /// Tear the native environment down.
    fn destroy(&self) -> Result<()>;
}

/// A live native environment.
///
/// Created by [`init`](EnvironmentSession::init), released by
/// [`close`](EnvironmentSession::close). Both consume their input, so
/// double initialization and use after close are compile errors rather
/// than undefined native behavior. Dropping an unclosed session destroys
/// the environment as a fallback.
#[derive(Debug)]
pub struct EnvironmentSession<E: NativeEnvironment> {
    env: E,
    initialized: bool,
}

impl<E: NativeEnvironment> EnvironmentSession<E> {
    /// Sets the library path and initializes the native environment.
    pub fn init(env: E, library_path: &Path) -> Result<Self> {
        env.set_library_path(library_path)
            .context("Failed to set runtime library path")?;
        env.initialize()
            .context("Failed to initialize runtime environment")?;
        Ok(Self {
            env,
            initialized: true,
        })
    }

    /// Destroys the native environment. Consuming `self` means a closed
    /// session cannot be closed or used again.
    pub fn close(mut self) -> Result<()> {
        self.initialized = false;
        self.env
            .destroy()
            .context("Failed to destroy runtime environment")
    }
}

impl<E: NativeEnvironment> Drop for EnvironmentSession<E> {
    fn drop(&mut self) {
        if self.initialized
            && let Err(e) = self.env.destroy()
        {
            warn!("Failed to destroy runtime environment on drop: {}", e);
        }
    }
}
