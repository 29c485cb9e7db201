pub mod error;
pub mod error_help;
pub mod path;

pub use error::{FailureStyle, SetupError, SetupResult};
pub use error_help::ErrorHelp;
