use crate::core::path::{build_dir, default_lua_dir, install_dir};
use crate::core::{SetupError, SetupResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Optional settings file (YAML)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Base URL that release archives are downloaded from
    #[serde(default = "default_release_url")]
    pub release_url: String,

    /// Compiler/linker configured on Windows runners without MSVC
    #[serde(default = "default_mingw_compiler")]
    pub mingw_compiler: String,
}

fn default_release_url() -> String {
    "https://luarocks.org/releases".to_string()
}

fn default_mingw_compiler() -> String {
    "x86_64-w64-mingw32-gcc".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            release_url: default_release_url(),
            mingw_compiler: default_mingw_compiler(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file, or defaults when no file is given
    pub fn load(path: Option<&Path>) -> SetupResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path).map_err(|e| {
            SetupError::Config(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content).map_err(|e| {
            SetupError::Config(format!(
                "Failed to parse settings file {}: {}",
                path.display(),
                e
            ))
        })
    }

    pub fn parse(content: &str) -> SetupResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn source_url(&self, version: &str) -> String {
        format!(
            "{}/luarocks-{}.tar.gz",
            self.release_url.trim_end_matches('/'),
            version
        )
    }

    pub fn windows_binary_url(&self, version: &str) -> String {
        format!(
            "{}/luarocks-{}-win32.zip",
            self.release_url.trim_end_matches('/'),
            version
        )
    }
}

/// Everything the run needs, resolved once before dispatch
#[derive(Debug, Clone)]
pub struct Inputs {
    pub luarocks_version: String,
    pub lua_path: PathBuf,
    pub build_dir: PathBuf,
    pub install_dir: PathBuf,
    pub settings: Settings,
}

impl Inputs {
    /// Resolve raw pipeline inputs against the working directory and temp root.
    ///
    /// Values are trimmed and empty values count as absent, matching how the
    /// runner passes `INPUT_*` variables.
    pub fn resolve(
        luarocks_version: Option<&str>,
        with_lua_path: Option<&str>,
        runner_temp: Option<&Path>,
        workdir: &Path,
        settings: Settings,
    ) -> SetupResult<Self> {
        let luarocks_version =
            non_empty(luarocks_version).ok_or(SetupError::MissingInput("luaRocksVersion"))?;

        let lua_path = match non_empty(with_lua_path) {
            Some(path) => PathBuf::from(path),
            None => default_lua_dir(workdir),
        };

        let temp_root = match runner_temp.filter(|p| !p.as_os_str().is_empty()) {
            Some(dir) => dir.to_path_buf(),
            None => {
                let fallback = std::env::temp_dir();
                tracing::warn!(
                    "RUNNER_TEMP is not set, using {} for build files",
                    fallback.display()
                );
                fallback
            }
        };

        Ok(Self {
            luarocks_version,
            lua_path,
            build_dir: build_dir(&temp_root),
            install_dir: install_dir(workdir),
            settings,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
