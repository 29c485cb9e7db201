use clap::Parser;
use setup_luarocks::config::{Inputs, Settings};
use setup_luarocks::download::ReleaseFetcher;
use setup_luarocks::platform::Platform;
use setup_luarocks::process::SystemRunner;
use setup_luarocks::setup::{self, report_failure};
use setup_luarocks::{GithubActions, Pipeline, SetupResult};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "setup-luarocks")]
#[command(about = "Install LuaRocks on a CI runner and expose it to later steps")]
#[command(version)]
struct Cli {
    /// LuaRocks version to install (e.g. "3.11.1")
    #[arg(long, env = "INPUT_LUAROCKSVERSION")]
    luarocks_version: Option<String>,

    /// Existing Lua installation to build against (defaults to ./.lua)
    #[arg(long, env = "INPUT_WITHLUAPATH")]
    with_lua_path: Option<String>,

    /// Runner temp directory for downloads and build files
    #[arg(long, env = "RUNNER_TEMP")]
    runner_temp: Option<PathBuf>,

    /// Optional YAML settings file
    #[arg(long, env = "SETUP_LUAROCKS_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries workflow commands
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let pipeline = GithubActions::from_env();

    if let Err(err) = run(cli, &pipeline).await {
        report_failure(&pipeline, &err);
    }

    if pipeline.has_failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn run(cli: Cli, pipeline: &GithubActions) -> SetupResult<()> {
    let config_file = cli.config.filter(|p| !p.as_os_str().is_empty());
    let settings = Settings::load(config_file.as_deref())?;

    let workdir = std::env::current_dir()?;
    let inputs = Inputs::resolve(
        cli.luarocks_version.as_deref(),
        cli.with_lua_path.as_deref(),
        cli.runner_temp.as_deref(),
        &workdir,
        settings,
    )?;

    let platform = Platform::current();
    tracing::debug!("Resolved inputs for {}: {:?}", platform, inputs);

    setup::run(
        platform,
        &inputs,
        pipeline,
        &SystemRunner::new(),
        &ReleaseFetcher::new(),
    )
    .await?;
    Ok(())
}
