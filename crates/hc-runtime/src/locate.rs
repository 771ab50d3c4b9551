//! Chrome executable discovery
//!
//! Locates a Chrome or Chromium binary to run in headless REPL mode.

use std::path::PathBuf;
use std::process::Command;

use crate::error::{Error, Result};

/// Well-known binary names resolvable through PATH.
const BINARY_NAMES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "chrome",
];

/// Locate the Chrome executable to launch.
///
/// This function attempts to locate Chrome in the following order:
/// 1. CHROME_PATH environment variable (runtime override)
/// 2. `which`/`where` lookup of well-known binary names
/// 3. Platform common install locations
///
/// # Errors
///
/// Returns `Error::ExecutableNotFound` if no candidate exists in any of
/// the search paths.
pub fn default_executable() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("CHROME_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Ok(path);
        }
        tracing::warn!(
            target = "hc",
            path = %path.display(),
            "CHROME_PATH does not exist; trying fallback locations"
        );
    }

    for name in BINARY_NAMES {
        if let Some(path) = find_in_path(name) {
            return Ok(path);
        }
    }

    #[cfg(target_os = "macos")]
    let common_locations = [
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
    ];

    #[cfg(all(unix, not(target_os = "macos")))]
    let common_locations = [
        "/usr/bin/google-chrome",
        "/usr/bin/google-chrome-stable",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
        "/snap/bin/chromium",
    ];

    #[cfg(windows)]
    let common_locations = [
        "C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe",
        "C:\\Program Files (x86)\\Google\\Chrome\\Application\\chrome.exe",
    ];

    for location in &common_locations {
        let path = PathBuf::from(location);
        if path.exists() {
            return Ok(path);
        }
    }

    Err(Error::ExecutableNotFound)
}

/// Resolve a binary name through the platform's PATH lookup tool.
fn find_in_path(name: &str) -> Option<PathBuf> {
    #[cfg(not(windows))]
    let which_cmd = "which";
    #[cfg(windows)]
    let which_cmd = "where";

    let output = Command::new(which_cmd).arg(name).output().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first = stdout.lines().next()?.trim();
    if first.is_empty() {
        return None;
    }

    let path = PathBuf::from(first);
    path.exists().then_some(path)
}
