// Core functionality
pub mod core;

// CI pipeline commands (PATH, environment, annotations)
pub mod pipeline;

// Re-export commonly used types
pub use crate::core::{ErrorHelp, FailureStyle, SetupError, SetupResult};
pub use crate::pipeline::{GithubActions, Pipeline};
