use std::fmt;

/// Installer family for the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    /// Everything that is not Windows, including platforms nobody has tested
    Unix,
}

impl Platform {
    /// Classify a platform identifier (e.g. "windows", "win32", "linux", "macos")
    pub fn from_identifier(id: &str) -> Self {
        if id.starts_with("win") {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    /// Platform of the running host
    pub fn current() -> Self {
        Self::from_identifier(std::env::consts::OS)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => write!(f, "windows"),
            Platform::Unix => write!(f, "unix"),
        }
    }
}
