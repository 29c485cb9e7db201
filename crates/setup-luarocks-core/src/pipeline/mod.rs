//! CI pipeline capability.
//!
//! Everything the installer does to the surrounding pipeline goes through the
//! [`Pipeline`] trait: extending the executable search path, exporting
//! variables to later steps, reading the environment, and reporting
//! annotations. [`GithubActions`] talks to a GitHub Actions runner; tests
//! substitute a recording implementation.

mod github;

pub use github::{escape_data, escape_property, GithubActions};

use crate::core::SetupResult;
use std::path::Path;

pub trait Pipeline {
    /// Prepend a directory to the executable search path for this process and later steps
    fn add_path(&self, dir: &Path) -> SetupResult<()>;

    /// Export an environment variable for this process and later steps
    fn export_variable(&self, name: &str, value: &str) -> SetupResult<()>;

    /// Read an environment variable; empty values count as unset
    fn var(&self, name: &str) -> Option<String>;

    fn info(&self, message: &str);

    fn warning(&self, message: &str);

    fn error(&self, message: &str);

    /// Report a fatal failure; the run ends with a failing status
    fn set_failed(&self, message: &str);

    fn has_failed(&self) -> bool;
}
