//! Session configuration
//!
//! Explicit per-session settings: which executable to launch, the base
//! argument list, and whether outbound commands are echoed to the log.
//! Sessions with different settings can coexist in one process.

use std::path::PathBuf;

use hc_runtime::Result;

/// Base arguments that put Chrome into headless REPL mode.
pub fn default_args() -> Vec<String> {
    vec![
        "--headless".to_string(),
        "--disable-gpu".to_string(),
        "--repl".to_string(),
    ]
}

/// Settings for launching one Chrome session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Path to the Chrome executable.
    pub executable: PathBuf,
    /// Base argument list; the target URL is appended at launch.
    pub args: Vec<String>,
    /// Log every outbound command before it is written.
    pub echo_writes: bool,
}

impl SessionConfig {
    /// Configuration for an explicit executable path, with the default
    /// headless REPL arguments.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            args: default_args(),
            echo_writes: false,
        }
    }

    /// Configuration using a discovered Chrome install.
    ///
    /// # Errors
    ///
    /// Returns `Error::ExecutableNotFound` if no Chrome executable can
    /// be located.
    pub fn discover() -> Result<Self> {
        Ok(Self::new(hc_runtime::default_executable()?))
    }

    /// Append an extra startup argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Enable or disable echoing outbound commands to the log.
    pub fn echo_writes(mut self, echo: bool) -> Self {
        self.echo_writes = echo;
        self
    }
}
