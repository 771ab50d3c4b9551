//! Chrome process management
//!
//! Spawns and tears down the headless Chrome child process whose
//! interactive console the session layer drives over stdio.

use std::path::Path;

use tokio::process::{Child, Command};

use crate::error::{Error, Result};

/// Handle to a running headless Chrome process.
///
/// Communication happens over the child's stdin/stdout pipes.
#[derive(Debug)]
pub struct ChromeProcess {
    /// The Chrome child process.
    ///
    /// This is public to allow the session layer to take the stdin/stdout
    /// pipes. Everything else should go through the transport instead of
    /// accessing the process directly.
    pub process: Child,
}

impl ChromeProcess {
    /// Spawn Chrome with the given argument list.
    ///
    /// stdin and stdout are piped (the REPL speaks over them); stderr is
    /// inherited.
    ///
    /// # Errors
    ///
    /// Returns `Error::LaunchFailed` if the process cannot be spawned or
    /// exits immediately after spawning.
    pub async fn launch(executable: &Path, args: &[String]) -> Result<Self> {
        let mut cmd = Command::new(executable);
        cmd.args(args)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit());

        let mut child = cmd
            .spawn()
            .map_err(|e| Error::LaunchFailed(format!("Failed to spawn process: {}", e)))?;

        // Check if process started successfully
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        match child.try_wait() {
            Ok(Some(status)) => {
                return Err(Error::LaunchFailed(format!(
                    "Chrome exited immediately with status: {}",
                    status
                )));
            }
            Ok(None) => {
                // Process is still running, good!
            }
            Err(e) => {
                return Err(Error::LaunchFailed(format!(
                    "Failed to check process status: {}",
                    e
                )));
            }
        }

        Ok(Self { process: child })
    }

    /// Force kill the Chrome process.
    ///
    /// # Platform-Specific Behavior
    ///
    /// **Windows**: Explicitly closes stdio pipes before killing the
    /// process. On Windows, tokio uses a blocking threadpool for child
    /// process stdio, and failing to close pipes before terminating can
    /// cause the cleanup to hang indefinitely.
    pub async fn kill(mut self) -> Result<()> {
        #[cfg(windows)]
        {
            drop(self.process.stdin.take());
            drop(self.process.stdout.take());
            drop(self.process.stderr.take());
        }

        self.process
            .kill()
            .await
            .map_err(|e| Error::LaunchFailed(format!("Failed to kill process: {}", e)))?;

        #[cfg(windows)]
        {
            let _ =
                tokio::time::timeout(std::time::Duration::from_secs(2), self.process.wait()).await;
        }

        #[cfg(not(windows))]
        {
            let _ =
                tokio::time::timeout(std::time::Duration::from_millis(500), self.process.wait())
                    .await;
        }

        Ok(())
    }

    /// Stop managing the process without killing it.
    ///
    /// Detaches a background reaper that waits for the child to exit on
    /// its own. Used after a cooperative `quit` has been issued.
    pub fn release(mut self) {
        tokio::spawn(async move {
            let _ = self.process.wait().await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_launch_unreachable_executable_fails() {
        let result =
            ChromeProcess::launch(Path::new("/definitely/not/a/real/chrome"), &[]).await;
        assert!(matches!(result, Err(Error::LaunchFailed(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_launch_detects_immediate_exit() {
        // `true` exits at once, which should be reported as a launch failure
        let result = ChromeProcess::launch(Path::new("/bin/true"), &[]).await;
        assert!(matches!(result, Err(Error::LaunchFailed(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_launch_and_kill() {
        // `cat` blocks on its piped stdin until terminated
        let process = ChromeProcess::launch(Path::new("/bin/cat"), &[])
            .await
            .expect("cat should launch");
        process.kill().await.expect("kill should succeed");
    }
}
