//! Subprocess execution.
//!
//! Installers describe what to run with [`CommandSpec`] and hand it to a
//! [`CommandRunner`]. Output is captured synchronously into one buffer per
//! invocation; nothing streams.

mod runner;

pub use runner::SystemRunner;

use crate::core::{SetupError, SetupResult};
use std::path::PathBuf;

/// A command to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    /// Collect stdout/stderr instead of inheriting the parent's streams
    pub capture: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            capture: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn capture(mut self) -> Self {
        self.capture = true;
        self
    }

    /// Program and arguments joined with spaces, for logs and error messages
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    pub code: i32,
    /// Empty unless the command was captured
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a command to completion. A non-zero exit is not an error here.
    async fn exec(&self, spec: &CommandSpec) -> SetupResult<ExecOutput>;
}

/// Run a command and fail on a non-zero exit code
pub async fn exec_checked<R: CommandRunner>(
    runner: &R,
    spec: &CommandSpec,
) -> SetupResult<ExecOutput> {
    let output = runner.exec(spec).await?;
    if !output.success() {
        return Err(SetupError::CommandFailed {
            command: spec.command_line(),
            code: output.code,
        });
    }
    Ok(output)
}

/// Run a command and return its trimmed stdout
pub async fn capture_stdout<R: CommandRunner>(runner: &R, spec: CommandSpec) -> SetupResult<String> {
    let output = exec_checked(runner, &spec.capture()).await?;
    Ok(output.stdout.trim().to_string())
}
