use crate::core::error::SetupResult;
use std::path::{Path, PathBuf};

/// Scratch directory name under the runner's temp root
pub const BUILD_PREFIX: &str = ".build-luarocks";

/// Default location of an existing Lua installation (as laid out by gh-actions-lua)
pub const LUA_PREFIX: &str = ".lua";

/// Default location of the LuaRocks installation
pub const LUAROCKS_PREFIX: &str = ".luarocks";

/// Get the scratch directory for downloads and extraction (<temp root>/.build-luarocks)
pub fn build_dir(temp_root: &Path) -> PathBuf {
    temp_root.join(BUILD_PREFIX)
}

/// Get the LuaRocks install directory (<workdir>/.luarocks)
pub fn install_dir(workdir: &Path) -> PathBuf {
    workdir.join(LUAROCKS_PREFIX)
}

/// Get the default Lua installation directory (<workdir>/.lua)
pub fn default_lua_dir(workdir: &Path) -> PathBuf {
    workdir.join(LUA_PREFIX)
}

/// Get the bin directory inside an install directory
pub fn bin_dir(install_dir: &Path) -> PathBuf {
    install_dir.join("bin")
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> SetupResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
