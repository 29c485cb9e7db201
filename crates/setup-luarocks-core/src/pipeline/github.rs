use crate::core::{SetupError, SetupResult};
use crate::pipeline::Pipeline;
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// Pipeline backed by a GitHub Actions runner.
///
/// Uses the runner's file commands (`GITHUB_PATH`, `GITHUB_ENV`) when they are
/// available and falls back to the legacy `::add-path::` / `::set-env::`
/// workflow commands otherwise. Changes are mirrored into this process's
/// environment so later subprocesses see them too.
#[derive(Debug, Default)]
pub struct GithubActions {
    path_file: Option<PathBuf>,
    env_file: Option<PathBuf>,
    failed: AtomicBool,
}

impl GithubActions {
    /// Create a pipeline from the runner-provided environment
    pub fn from_env() -> Self {
        Self::with_files(
            env::var_os("GITHUB_PATH").map(PathBuf::from),
            env::var_os("GITHUB_ENV").map(PathBuf::from),
        )
    }

    pub fn with_files(path_file: Option<PathBuf>, env_file: Option<PathBuf>) -> Self {
        Self {
            path_file: path_file.filter(|p| !p.as_os_str().is_empty()),
            env_file: env_file.filter(|p| !p.as_os_str().is_empty()),
            failed: AtomicBool::new(false),
        }
    }

    fn append_line(file: &Path, line: &str) -> SetupResult<()> {
        let mut handle = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
            .map_err(|e| {
                SetupError::Pipeline(format!("Unable to open {}: {}", file.display(), e))
            })?;
        writeln!(handle, "{}", line)?;
        Ok(())
    }

    fn heredoc_delimiter() -> String {
        let nanos = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_default();
        format!("ghadelimiter_{}_{}", std::process::id(), nanos)
    }
}

impl Pipeline for GithubActions {
    fn add_path(&self, dir: &Path) -> SetupResult<()> {
        match &self.path_file {
            Some(file) => Self::append_line(file, &dir.to_string_lossy())?,
            None => println!("::add-path::{}", escape_data(&dir.to_string_lossy())),
        }

        let mut paths = vec![dir.to_path_buf()];
        if let Some(current) = env::var_os("PATH") {
            paths.extend(env::split_paths(&current));
        }
        let joined = env::join_paths(paths)
            .map_err(|e| SetupError::Path(format!("Invalid PATH entry {}: {}", dir.display(), e)))?;
        env::set_var("PATH", joined);

        tracing::debug!("Added {} to PATH", dir.display());
        Ok(())
    }

    fn export_variable(&self, name: &str, value: &str) -> SetupResult<()> {
        env::set_var(name, value);

        match &self.env_file {
            Some(file) => {
                let delimiter = Self::heredoc_delimiter();
                if name.contains(&delimiter) {
                    return Err(SetupError::Pipeline(format!(
                        "Unexpected input: name should not contain the delimiter \"{}\"",
                        delimiter
                    )));
                }
                if value.contains(&delimiter) {
                    return Err(SetupError::Pipeline(format!(
                        "Unexpected input: value should not contain the delimiter \"{}\"",
                        delimiter
                    )));
                }
                Self::append_line(
                    file,
                    &format!("{}<<{}\n{}\n{}", name, delimiter, value, delimiter),
                )?;
            }
            None => println!(
                "::set-env name={}::{}",
                escape_property(name),
                escape_data(value)
            ),
        }

        tracing::debug!("Exported {}={}", name, value);
        Ok(())
    }

    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok().filter(|v| !v.is_empty())
    }

    fn info(&self, message: &str) {
        println!("{}", message);
    }

    fn warning(&self, message: &str) {
        println!("::warning::{}", escape_data(message));
    }

    fn error(&self, message: &str) {
        println!("::error::{}", escape_data(message));
    }

    fn set_failed(&self, message: &str) {
        self.failed.store(true, Ordering::SeqCst);
        self.error(message);
    }

    fn has_failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }
}

/// Escape workflow command data (the part after `::`)
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a workflow command property value
pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}
