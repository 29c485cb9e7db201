use std::path::PathBuf;
use thiserror::Error;

pub type SetupResult<T> = Result<T, SetupError>;

/// How a failure is surfaced to the pipeline.
///
/// Most failures propagate to the top level and are reported with a generic
/// "Failed to install LuaRocks" prefix. A few Windows installer conditions are
/// reported at the point of detection with their own message instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStyle {
    Propagated,
    Aborted,
}

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input required and not supplied: {0}")]
    MissingInput(&'static str),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Download failed for {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("Extraction failed for {}: {reason}", .archive.display())]
    Extract { archive: PathBuf, reason: String },

    #[error("Failed to run '{command}': {reason}")]
    Exec { command: String, reason: String },

    #[error("The process '{command}' failed with exit code {code}")]
    CommandFailed { command: String, code: i32 },

    #[error("Lua version not found.")]
    LuaVersionNotFound,

    #[error("install.bat does not exist at {}", .0.display())]
    InstallScriptMissing(PathBuf),

    #[error("install.bat failed with exit code {0}")]
    InstallScriptFailed(i32),

    #[error("Pipeline command error: {0}")]
    Pipeline(String),
}

impl SetupError {
    pub fn style(&self) -> FailureStyle {
        match self {
            SetupError::InstallScriptMissing(_) | SetupError::InstallScriptFailed(_) => {
                FailureStyle::Aborted
            }
            _ => FailureStyle::Propagated,
        }
    }

    /// The message reported to the pipeline when this error ends the run.
    pub fn failure_message(&self) -> String {
        match self.style() {
            FailureStyle::Aborted => self.to_string(),
            FailureStyle::Propagated => format!("Failed to install LuaRocks: {}", self),
        }
    }
}
