use crate::core::{SetupError, SetupResult};
use crate::process::{CommandRunner, CommandSpec, ExecOutput};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Runs commands on the host with `tokio::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the program to an executable path.
    ///
    /// Programs given with a directory component resolve against the command's
    /// working directory; bare names are searched on the current PATH.
    fn resolve_program(spec: &CommandSpec) -> SetupResult<PathBuf> {
        let program = Path::new(&spec.program);
        if program.components().count() > 1 {
            let resolved = match &spec.cwd {
                Some(cwd) if program.is_relative() => cwd.join(program),
                _ => program.to_path_buf(),
            };
            return Ok(resolved);
        }

        which::which(&spec.program).map_err(|e| SetupError::Exec {
            command: spec.command_line(),
            reason: format!("Unable to locate executable file '{}': {}", spec.program, e),
        })
    }
}

impl CommandRunner for SystemRunner {
    async fn exec(&self, spec: &CommandSpec) -> SetupResult<ExecOutput> {
        let program = Self::resolve_program(spec)?;
        tracing::info!("[command]{}", spec.command_line());

        let mut cmd = Command::new(&program);
        cmd.args(&spec.args);
        if let Some(cwd) = &spec.cwd {
            cmd.current_dir(cwd);
        }

        let spawn_error = |e: std::io::Error| SetupError::Exec {
            command: spec.command_line(),
            reason: e.to_string(),
        };

        if spec.capture {
            let output = cmd
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output()
                .await
                .map_err(spawn_error)?;
            Ok(ExecOutput {
                code: output.status.code().unwrap_or(1),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        } else {
            let status = cmd.status().await.map_err(spawn_error)?;
            Ok(ExecOutput {
                code: status.code().unwrap_or(1),
                ..ExecOutput::default()
            })
        }
    }
}
