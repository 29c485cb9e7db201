//! Platform installer strategies.
//!
//! Exactly one strategy runs per invocation: [`WindowsInstaller`] unpacks the
//! prebuilt win32 bundle and runs its `install.bat`; [`UnixInstaller`] builds
//! from the source tarball with configure/make.

mod unix;
mod windows;

pub use unix::{is_legacy_version, UnixInstaller};
pub use windows::WindowsInstaller;

use crate::config::Settings;
use crate::core::SetupResult;
use crate::download::Fetcher;
use crate::pipeline::Pipeline;
use crate::platform::Platform;
use crate::process::CommandRunner;
use std::path::PathBuf;

/// What to install and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    pub version: String,
    /// Scratch directory for the downloaded archive and its extracted tree
    pub build_dir: PathBuf,
    pub install_dir: PathBuf,
    /// Existing Lua installation (only the Unix build uses it)
    pub lua_path: PathBuf,
}

/// External collaborators an installer works through
pub struct Host<'a, P, R, F> {
    pub pipeline: &'a P,
    pub runner: &'a R,
    pub fetcher: &'a F,
    pub settings: &'a Settings,
}

#[allow(async_fn_in_trait)]
pub trait Installer {
    fn name(&self) -> &'static str;

    async fn install<P, R, F>(
        &self,
        host: &Host<'_, P, R, F>,
        request: &InstallRequest,
    ) -> SetupResult<()>
    where
        P: Pipeline,
        R: CommandRunner,
        F: Fetcher;
}

/// Run the installer strategy for `platform`
pub async fn install_for<P, R, F>(
    platform: Platform,
    host: &Host<'_, P, R, F>,
    request: &InstallRequest,
) -> SetupResult<()>
where
    P: Pipeline,
    R: CommandRunner,
    F: Fetcher,
{
    match platform {
        Platform::Windows => run_installer(&WindowsInstaller, host, request).await,
        Platform::Unix => run_installer(&UnixInstaller, host, request).await,
    }
}

async fn run_installer<I, P, R, F>(
    installer: &I,
    host: &Host<'_, P, R, F>,
    request: &InstallRequest,
) -> SetupResult<()>
where
    I: Installer,
    P: Pipeline,
    R: CommandRunner,
    F: Fetcher,
{
    tracing::info!(
        "Installing LuaRocks {} with the {} installer into {}",
        request.version,
        installer.name(),
        request.install_dir.display()
    );
    installer.install(host, request).await
}
