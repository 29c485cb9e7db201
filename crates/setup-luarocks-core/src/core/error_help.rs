use crate::core::SetupError;

/// Provides helpful suggestions for common errors
pub trait ErrorHelp {
    fn help(&self) -> Option<String>;
}

impl ErrorHelp for SetupError {
    fn help(&self) -> Option<String> {
        match self {
            SetupError::MissingInput(name) => Some(format!(
                "Suggestion: Set the '{}' input on the step (e.g. {}: \"3.11.1\")",
                name, name
            )),
            SetupError::Config(msg) => {
                if msg.contains("settings file") {
                    Some(
                        "Suggestion: Check the YAML syntax of the settings file, or remove --config to use defaults"
                            .to_string(),
                    )
                } else {
                    None
                }
            }
            SetupError::Download { reason, .. } => {
                if reason.contains("404") {
                    Some(
                        "Suggestion: Check that the requested LuaRocks version exists at https://luarocks.org/releases"
                            .to_string(),
                    )
                } else {
                    Some(
                        "Suggestion: Check the runner's network access to the LuaRocks release host"
                            .to_string(),
                    )
                }
            }
            SetupError::Http(e) => {
                if e.is_timeout() || e.is_connect() {
                    Some(
                        "Suggestion: Check the runner's internet connection and firewall settings"
                            .to_string(),
                    )
                } else {
                    None
                }
            }
            SetupError::Exec { command, .. } => {
                if command.starts_with("lua ") || command == "lua" {
                    Some(
                        "Suggestion: Install Lua before this step (for example with leafo/gh-actions-lua)"
                            .to_string(),
                    )
                } else if command.starts_with("make") {
                    Some(
                        "Suggestion: Install 'make' and a C toolchain on the runner".to_string(),
                    )
                } else {
                    None
                }
            }
            SetupError::LuaVersionNotFound => Some(
                "Suggestion: Make sure a working 'lua' interpreter is on PATH before this step"
                    .to_string(),
            ),
            SetupError::CommandFailed { command, .. } if command.starts_with("./configure") => {
                Some(
                    "Suggestion: Check 'withLuaPath' points at a Lua installation with headers (include/lua.h)"
                        .to_string(),
                )
            }
            _ => None,
        }
    }
}
