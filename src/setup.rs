//! End-to-end orchestration: path setup, one installer, then the exporter.

use crate::config::Inputs;
use crate::core::path::{bin_dir, ensure_dir};
use crate::core::{ErrorHelp, FailureStyle, SetupError, SetupResult};
use crate::download::Fetcher;
use crate::exporter::{export_environment, LuaRocksPaths};
use crate::installer::{install_for, Host, InstallRequest};
use crate::pipeline::Pipeline;
use crate::platform::Platform;
use crate::process::CommandRunner;

/// Install LuaRocks and publish its paths.
///
/// The install bin directory goes on PATH before the installer runs, so it is
/// visible even while the binary does not exist yet. An aborted install marks
/// the run failed but still falls through to the exporter; any other installer
/// error is returned.
pub async fn run<P, R, F>(
    platform: Platform,
    inputs: &Inputs,
    pipeline: &P,
    runner: &R,
    fetcher: &F,
) -> SetupResult<LuaRocksPaths>
where
    P: Pipeline,
    R: CommandRunner,
    F: Fetcher,
{
    ensure_dir(&inputs.build_dir)?;

    pipeline.add_path(&bin_dir(&inputs.install_dir))?;

    let host = Host {
        pipeline,
        runner,
        fetcher,
        settings: &inputs.settings,
    };
    let request = InstallRequest {
        version: inputs.luarocks_version.clone(),
        build_dir: inputs.build_dir.clone(),
        install_dir: inputs.install_dir.clone(),
        lua_path: inputs.lua_path.clone(),
    };
    if let Err(err) = install_for(platform, &host, &request).await {
        match err.style() {
            FailureStyle::Aborted => {
                tracing::debug!("Installer aborted: {:?}", err);
                pipeline.set_failed(&err.failure_message());
            }
            FailureStyle::Propagated => return Err(err),
        }
    }

    let paths = export_environment(pipeline, runner).await?;
    tracing::info!("LuaRocks {} is ready", inputs.luarocks_version);
    Ok(paths)
}

/// Report a failure that ended the run
pub fn report_failure<P: Pipeline>(pipeline: &P, err: &SetupError) {
    tracing::debug!("Run failed ({:?}): {:?}", err.style(), err);
    pipeline.set_failed(&err.failure_message());
    if let Some(help) = err.help() {
        pipeline.warning(&help);
    }
}
