//! setup-luarocks: installs LuaRocks into a CI runner and exposes it to later steps
//!
//! This crate provides the installer library, re-exporting core functionality
//! from `setup-luarocks-core` and organizing the platform strategies, process
//! execution, downloads, and environment export.

pub use setup_luarocks_core::{
    ErrorHelp, FailureStyle, GithubActions, Pipeline, SetupError, SetupResult,
};

/// Core module re-exported for convenience.
pub mod core {
    pub use setup_luarocks_core::core::*;

    /// Path conventions re-exported from setup-luarocks-core.
    pub mod path {
        pub use setup_luarocks_core::core::path::*;
    }
}

/// Pipeline capability re-exported from setup-luarocks-core.
pub mod pipeline {
    pub use setup_luarocks_core::pipeline::*;
}

/// Input resolution and settings.
pub mod config;

/// Host platform detection.
pub mod platform;

/// Subprocess execution.
pub mod process;

/// Release downloads and archive extraction.
pub mod download;

/// Platform installer strategies.
pub mod installer;

/// Publishing LuaRocks paths to the pipeline.
pub mod exporter;

/// End-to-end orchestration.
pub mod setup;

#[cfg(test)]
pub(crate) mod test_support;
