use crate::core::SetupResult;
use crate::pipeline::Pipeline;
use crate::process::{capture_stdout, exec_checked, CommandRunner, CommandSpec};
use std::path::Path;

/// Lua's "append the builtin defaults" marker in LUA_PATH / LUA_CPATH
pub const DEFAULT_PATH_MARKER: &str = ";;";

/// Path fragments reported by `luarocks path`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LuaRocksPaths {
    pub bin: String,
    pub lua_path: String,
    pub lua_cpath: String,
}

fn luarocks_path(flag: &str) -> CommandSpec {
    CommandSpec::new("luarocks").args(["path", flag])
}

/// Query the installed LuaRocks for its paths.
///
/// `--lr-bin` is asked twice and the raw answers are concatenated before trimming.
pub async fn query_paths<R: CommandRunner>(runner: &R) -> SetupResult<LuaRocksPaths> {
    let mut bin = String::new();
    for _ in 0..2 {
        let output = exec_checked(runner, &luarocks_path("--lr-bin").capture()).await?;
        bin.push_str(&output.stdout);
    }

    let lua_path = capture_stdout(runner, luarocks_path("--lr-path")).await?;
    let lua_cpath = capture_stdout(runner, luarocks_path("--lr-cpath")).await?;

    Ok(LuaRocksPaths {
        bin: bin.trim().to_string(),
        lua_path,
        lua_cpath,
    })
}

/// Publish the queried paths to the pipeline, skipping empty fragments
pub fn publish<P: Pipeline>(pipeline: &P, paths: &LuaRocksPaths) -> SetupResult<()> {
    if !paths.bin.is_empty() {
        pipeline.add_path(Path::new(&paths.bin))?;
    }

    if !paths.lua_path.is_empty() {
        pipeline.export_variable("LUA_PATH", &format!("{}{}", DEFAULT_PATH_MARKER, paths.lua_path))?;
    }

    if !paths.lua_cpath.is_empty() {
        pipeline.export_variable("LUA_CPATH", &format!("{}{}", DEFAULT_PATH_MARKER, paths.lua_cpath))?;
    }

    Ok(())
}

/// Query LuaRocks and publish its paths
pub async fn export_environment<P, R>(pipeline: &P, runner: &R) -> SetupResult<LuaRocksPaths>
where
    P: Pipeline,
    R: CommandRunner,
{
    let paths = query_paths(runner).await?;
    publish(pipeline, &paths)?;
    Ok(paths)
}
