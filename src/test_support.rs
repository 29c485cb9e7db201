//! Recording doubles for the pipeline, process runner, and fetcher.
//!
//! All three write into a shared [`Journal`] so tests can assert on the
//! relative order of downloads, commands, and environment changes.

use crate::core::{SetupError, SetupResult};
use crate::download::Fetcher;
use crate::pipeline::Pipeline;
use crate::process::{CommandRunner, CommandSpec, ExecOutput};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// Index of the first entry starting with `prefix`
    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.entries().iter().position(|e| e.starts_with(prefix))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    AddPath(PathBuf),
    Export(String, String),
    Info(String),
    Warning(String),
    Error(String),
    Failed(String),
}

#[derive(Debug, Default)]
pub struct RecordingPipeline {
    journal: Journal,
    vars: HashMap<String, String>,
    events: Mutex<Vec<PipelineEvent>>,
}

impl RecordingPipeline {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            ..Self::default()
        }
    }

    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }

    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn added_paths(&self) -> Vec<PathBuf> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PipelineEvent::AddPath(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn exported(&self, name: &str) -> Option<String> {
        self.events().into_iter().find_map(|e| match e {
            PipelineEvent::Export(n, v) if n == name => Some(v),
            _ => None,
        })
    }

    pub fn failures(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PipelineEvent::Failed(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: PipelineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Pipeline for RecordingPipeline {
    fn add_path(&self, dir: &Path) -> SetupResult<()> {
        self.journal.push(format!("add-path {}", dir.display()));
        self.record(PipelineEvent::AddPath(dir.to_path_buf()));
        Ok(())
    }

    fn export_variable(&self, name: &str, value: &str) -> SetupResult<()> {
        self.journal.push(format!("export {}={}", name, value));
        self.record(PipelineEvent::Export(name.to_string(), value.to_string()));
        Ok(())
    }

    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).filter(|v| !v.is_empty()).cloned()
    }

    fn info(&self, message: &str) {
        self.record(PipelineEvent::Info(message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.record(PipelineEvent::Warning(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.record(PipelineEvent::Error(message.to_string()));
    }

    fn set_failed(&self, message: &str) {
        self.journal.push(format!("failed {}", message));
        self.record(PipelineEvent::Failed(message.to_string()));
    }

    fn has_failed(&self) -> bool {
        !self.failures().is_empty()
    }
}

/// Runner that answers from a script instead of spawning processes.
///
/// Commands without a scripted answer succeed with empty output.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    journal: Journal,
    responses: Vec<(String, ExecOutput)>,
    commands: Mutex<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_journal(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            ..Self::default()
        }
    }

    /// Answer commands whose command line equals (or else contains) `command`
    pub fn respond(self, command: &str, code: i32, stdout: &str) -> Self {
        self.respond_output(
            command,
            ExecOutput {
                code,
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        )
    }

    pub fn respond_output(mut self, command: &str, output: ExecOutput) -> Self {
        self.responses.push((command.to_string(), output));
        self
    }

    pub fn commands(&self) -> Vec<CommandSpec> {
        self.commands.lock().unwrap().clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.commands().iter().map(CommandSpec::command_line).collect()
    }

    fn answer(&self, line: &str) -> ExecOutput {
        self.responses
            .iter()
            .find(|(key, _)| key == line)
            .or_else(|| self.responses.iter().find(|(key, _)| line.contains(key.as_str())))
            .map(|(_, output)| output.clone())
            .unwrap_or_default()
    }
}

impl CommandRunner for ScriptedRunner {
    async fn exec(&self, spec: &CommandSpec) -> SetupResult<ExecOutput> {
        let line = spec.command_line();
        self.journal.push(format!("exec {}", line));
        self.commands.lock().unwrap().push(spec.clone());
        Ok(self.answer(&line))
    }
}

/// Fetcher that "downloads" nothing and stages files on extraction
#[derive(Debug, Default)]
pub struct StagedFetcher {
    journal: Journal,
    files: Vec<(PathBuf, String)>,
    download_error: Option<String>,
    downloads: Mutex<Vec<String>>,
}

impl StagedFetcher {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            ..Self::default()
        }
    }

    /// Write `content` to `<dest>/<relative>` when an archive is extracted
    pub fn stage(mut self, relative: &str, content: &str) -> Self {
        self.files.push((PathBuf::from(relative), content.to_string()));
        self
    }

    pub fn failing(mut self, reason: &str) -> Self {
        self.download_error = Some(reason.to_string());
        self
    }

    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }

    fn unpack(&self, kind: &str, archive: &Path, dest_dir: &Path) -> SetupResult<()> {
        self.journal
            .push(format!("extract-{} {}", kind, archive.display()));
        for (relative, content) in &self.files {
            let target = dest_dir.join(relative);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&target, content)?;
        }
        Ok(())
    }
}

impl Fetcher for StagedFetcher {
    async fn download(&self, url: &str, dest_dir: &Path) -> SetupResult<PathBuf> {
        self.journal.push(format!("download {}", url));
        self.downloads.lock().unwrap().push(url.to_string());
        if let Some(reason) = &self.download_error {
            return Err(SetupError::Download {
                url: url.to_string(),
                reason: reason.clone(),
            });
        }
        let name = url.rsplit('/').next().unwrap_or("download");
        Ok(dest_dir.join(name))
    }

    fn extract_zip(&self, archive: &Path, dest_dir: &Path) -> SetupResult<()> {
        self.unpack("zip", archive, dest_dir)
    }

    fn extract_tar(&self, archive: &Path, dest_dir: &Path) -> SetupResult<()> {
        self.unpack("tar", archive, dest_dir)
    }
}
