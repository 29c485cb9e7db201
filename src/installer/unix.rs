use crate::core::{SetupError, SetupResult};
use crate::download::Fetcher;
use crate::installer::{Host, InstallRequest, Installer};
use crate::pipeline::Pipeline;
use crate::process::{exec_checked, CommandRunner, CommandSpec};
use regex::Regex;

/// Builds LuaRocks from the source tarball against an existing Lua install
pub struct UnixInstaller;

/// LuaRocks 2.x needs a separate `make build` before `make install`
pub fn is_legacy_version(version: &str) -> SetupResult<bool> {
    let re = Regex::new(r"^2\.")
        .map_err(|e| SetupError::Config(format!("Invalid regex pattern: {}", e)))?;
    Ok(re.is_match(version))
}

impl Installer for UnixInstaller {
    fn name(&self) -> &'static str {
        "unix"
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
        let url = host.settings.source_url(&request.version);
        let archive = host.fetcher.download(&url, &request.build_dir).await?;
        host.fetcher.extract_tar(&archive, &request.build_dir)?;

        let source_dir = request
            .build_dir
            .join(format!("luarocks-{}", request.version));

        let configure = CommandSpec::new("./configure")
            .arg(format!("--with-lua={}", request.lua_path.display()))
            .arg(format!("--prefix={}", request.install_dir.display()))
            .cwd(&source_dir);
        exec_checked(host.runner, &configure).await?;

        exec_checked(host.runner, &CommandSpec::new("make").cwd(&source_dir)).await?;

        if is_legacy_version(&request.version)? {
            exec_checked(
                host.runner,
                &CommandSpec::new("make").arg("build").cwd(&source_dir),
            )
            .await?;
        }

        exec_checked(
            host.runner,
            &CommandSpec::new("make").arg("install").cwd(&source_dir),
        )
        .await?;

        Ok(())
    }
}
