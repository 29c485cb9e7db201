use crate::core::path::{bin_dir, ensure_dir};
use crate::core::{SetupError, SetupResult};
use crate::download::Fetcher;
use crate::installer::{Host, InstallRequest, Installer};
use crate::pipeline::Pipeline;
use crate::process::{capture_stdout, exec_checked, CommandRunner, CommandSpec};
use std::path::Path;

/// Set by the MSVC developer environment; without it LuaRocks is pointed at MinGW
const MSVC_MARKER_VAR: &str = "VCINSTALLDIR";

/// Installs the prebuilt win32 bundle with its `install.bat`.
///
/// The Lua interpreter is taken from PATH; `InstallRequest::lua_path` is not
/// consulted on this platform.
pub struct WindowsInstaller;

impl WindowsInstaller {
    fn install_script(build_dir: &Path, version: &str) -> std::path::PathBuf {
        build_dir
            .join(format!("luarocks-{}-win32", version))
            .join("install.bat")
    }

    /// Ask the Lua interpreter on PATH for its major.minor version
    async fn detect_lua_version<R: CommandRunner>(runner: &R) -> SetupResult<String> {
        let version = capture_stdout(
            runner,
            CommandSpec::new("lua").args(["-e", "print(_VERSION:sub(5))"]),
        )
        .await?;

        if version.is_empty() {
            return Err(SetupError::LuaVersionNotFound);
        }
        Ok(version)
    }

    fn mark_executable(path: &Path) -> SetupResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
        }
        #[cfg(not(unix))]
        let _ = path;
        Ok(())
    }
}

impl Installer for WindowsInstaller {
    fn name(&self) -> &'static str {
        "windows"
    }

    async fn install<P, R, F>(
        &self,
        host: &Host<'_, P, R, F>,
        request: &InstallRequest,
    ) -> SetupResult<()>
    where
        P: Pipeline,
        R: CommandRunner,
        F: Fetcher,
    {
        let url = host.settings.windows_binary_url(&request.version);
        let archive = host.fetcher.download(&url, &request.build_dir).await?;
        host.fetcher.extract_zip(&archive, &request.build_dir)?;

        let lua_version = Self::detect_lua_version(host.runner).await?;
        tracing::debug!("Detected Lua {}", lua_version);

        let dst_dir = bin_dir(&request.install_dir);
        ensure_dir(&dst_dir)?;

        let install_bat = Self::install_script(&request.build_dir, &request.version);
        if !install_bat.exists() {
            return Err(SetupError::InstallScriptMissing(install_bat));
        }
        Self::mark_executable(&install_bat)?;

        host.pipeline.info("Installing LuaRocks");
        let spec = CommandSpec::new(install_bat.to_string_lossy())
            .args([
                "/LV".to_string(),
                lua_version.clone(),
                "/P".to_string(),
                dst_dir.to_string_lossy().into_owned(),
                "/Q".to_string(),
                "/NOADMIN".to_string(),
            ])
            .capture();
        let output = host.runner.exec(&spec).await?;
        for line in output.stdout.lines() {
            host.pipeline.info(line);
        }
        for line in output.stderr.lines() {
            host.pipeline.error(line);
        }
        if !output.success() {
            return Err(SetupError::InstallScriptFailed(output.code));
        }
        host.pipeline.info("Done installing LuaRocks");

        host.pipeline.info("Configuring LuaRocks");
        exec_checked(
            host.runner,
            &CommandSpec::new("luarocks").args(["config", "lua_version", lua_version.as_str()]),
        )
        .await?;

        // MinGW without MSVC; LuaRocks 3.9.2 and later detect this on their own
        if host.pipeline.var(MSVC_MARKER_VAR).is_none() {
            let compiler = host.settings.mingw_compiler.as_str();
            exec_checked(
                host.runner,
                &CommandSpec::new("luarocks").args(["config", "variables.CC", compiler]),
            )
            .await?;
            exec_checked(
                host.runner,
                &CommandSpec::new("luarocks").args(["config", "variables.LD", compiler]),
            )
            .await?;
        }
        host.pipeline.info("Done configuring LuaRocks");

        Ok(())
    }
}
