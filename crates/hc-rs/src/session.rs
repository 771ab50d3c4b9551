//! Interactive Chrome console session
//!
//! Owns the Chrome child process and the line plumbing around its REPL:
//! a reader task pumping stdout into the raw channel, the output router
//! filtering prompt echoes, and the outbound command pipe.

use tokio::process::ChildStdin;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use hc_runtime::transport::{PipeSender, PipeTransport};
use hc_runtime::{ChromeProcess, Error, Result};

use crate::config::SessionConfig;
use crate::js;
use crate::router;

/// Greeting Chrome's REPL prints on startup.
const EXPECTED_FIRST_LINE: &str =
    r#"Type a Javascript expression to evaluate or "quit" to exit."#;

/// Command that asks the console to terminate cooperatively.
const QUIT_COMMAND: &str = "quit";

/// Capacity of the filtered output channel. A consumer that stops
/// draining eventually backpressures the router and, through the raw
/// channel, the child's stdout pipe.
const OUTPUT_CAPACITY: usize = 5000;

/// An interactive console session with one headless Chrome instance.
///
/// Created once per browser instance; commands go out through [`write`]
/// and the convenience methods, results arrive asynchronously on the
/// filtered output stream via [`read_line`].
///
/// [`write`]: ChromeSession::write
/// [`read_line`]: ChromeSession::read_line
pub struct ChromeSession {
    process: ChromeProcess,
    writer: PipeSender<ChildStdin>,
    output: mpsc::Receiver<String>,
    cancel: CancellationToken,
    echo_writes: bool,
}

impl ChromeSession {
    /// Launch Chrome against `url` and wire up the console session.
    ///
    /// Appends the URL to the configured argument list, spawns the
    /// process, starts the reader and router tasks, then performs the
    /// startup handshake: the first console line is checked against the
    /// REPL greeting. A mismatch is logged and the session is returned
    /// anyway; only a failed spawn aborts construction.
    ///
    /// # Errors
    ///
    /// Returns `Error::LaunchFailed` if the process cannot be spawned,
    /// exits immediately, or its stdio pipes cannot be taken.
    pub async fn launch(url: &str, config: &SessionConfig) -> Result<Self> {
        let mut args = config.args.clone();
        args.push(url.to_string());

        debug!(
            target = "hc",
            executable = %config.executable.display(),
            %url,
            "launching chrome"
        );
        let mut process = ChromeProcess::launch(&config.executable, &args).await?;

        let stdin = process
            .process
            .stdin
            .take()
            .ok_or_else(|| Error::LaunchFailed("Failed to get chrome stdin".to_string()))?;
        let stdout = process
            .process
            .stdout
            .take()
            .ok_or_else(|| Error::LaunchFailed("Failed to get chrome stdout".to_string()))?;

        let (transport, raw_rx) = PipeTransport::new(stdin, stdout);
        let (writer, receiver) = transport.into_parts();

        tokio::spawn(async move {
            if let Err(e) = receiver.run().await {
                debug!(target = "hc", error = %e, "console read loop ended");
            }
        });

        let (filtered_tx, filtered_rx) = mpsc::channel(OUTPUT_CAPACITY);
        let cancel = CancellationToken::new();
        tokio::spawn(router::route_output(raw_rx, filtered_tx, cancel.clone()));

        let mut session = Self {
            process,
            writer,
            output: filtered_rx,
            cancel,
            echo_writes: config.echo_writes,
        };

        // Best-effort sanity check, not a hard precondition
        match session.output.recv().await {
            Some(line) if line.contains(EXPECTED_FIRST_LINE) => {}
            Some(line) => {
                warn!(
                    target = "hc",
                    %line,
                    "unexpected first line from chrome console"
                );
            }
            None => {
                warn!(
                    target = "hc",
                    "chrome console closed before printing its greeting"
                );
            }
        }

        Ok(session)
    }

    /// Send a one-line command to the console.
    ///
    /// Fire-and-forget: there is no delivery confirmation and no reply
    /// correlation; results show up on the filtered output stream.
    pub async fn write(&mut self, command: &str) -> Result<()> {
        if self.echo_writes {
            debug!(target = "hc", %command, "writing to console");
        }
        self.writer.send(command).await
    }

    /// Receive the next line of console output, prompt echoes excluded.
    ///
    /// Returns `None` once the process has exited and the stream is
    /// drained.
    pub async fn read_line(&mut self) -> Option<String> {
        self.output.recv().await
    }

    /// Print console output to stdout until the stream closes.
    pub async fn print_output(&mut self) {
        while let Some(line) = self.output.recv().await {
            println!("{}", line);
        }
    }

    /// Ask the console to quit, then stop the session's tasks.
    ///
    /// Writes the literal `quit` command exactly once, cancels the
    /// router, and releases the process without waiting for it to
    /// terminate.
    pub async fn exit(mut self) -> Result<()> {
        let result = self.writer.send(QUIT_COMMAND).await;
        self.cancel.cancel();
        self.process.release();
        result
    }

    /// Terminate the process immediately, skipping the cooperative quit.
    pub async fn force_close(self) -> Result<()> {
        self.cancel.cancel();
        self.process.kill().await
    }

    /// Click the first element matching `selector`.
    pub async fn click_selector(&mut self, selector: &str) -> Result<()> {
        self.write(&js::click_selector(selector)).await
    }

    /// Click the element with the given id.
    pub async fn click_id(&mut self, id: &str) -> Result<()> {
        self.write(&js::click_id(id)).await
    }

    /// Click the item at `index` among elements with the provided
    /// classes. Multiple classes are separated by spaces.
    pub async fn click_classes(&mut self, classes: &str, index: usize) -> Result<()> {
        self.write(&js::click_classes(classes, index)).await
    }

    /// Fetch the inner content of the first element matching `selector`.
    pub async fn content_of_selector(&mut self, selector: &str) -> Result<()> {
        self.write(&js::content_of_selector(selector)).await
    }

    /// Fetch the inner content of the item at `index` among elements
    /// with the provided classes.
    pub async fn content_of_classes(&mut self, classes: &str, index: usize) -> Result<()> {
        self.write(&js::content_of_classes(classes, index)).await
    }

    /// Fetch the form value of the item at `index` among elements with
    /// the provided classes.
    pub async fn value_of_classes(&mut self, classes: &str, index: usize) -> Result<()> {
        self.write(&js::value_of_classes(classes, index)).await
    }

    /// Set the inner content of the element with the given id.
    pub async fn set_text_by_id(&mut self, id: &str, text: &str) -> Result<()> {
        self.write(&js::set_text_by_id(id, text)).await
    }

    /// Set the inner content of the item at `index` among elements with
    /// the provided classes.
    pub async fn set_text_by_classes(
        &mut self,
        classes: &str,
        index: usize,
        text: &str,
    ) -> Result<()> {
        self.write(&js::set_text_by_classes(classes, index, text)).await
    }

    /// Set the form value of the item at `index` among elements with
    /// the provided classes.
    pub async fn set_input_by_classes(
        &mut self,
        classes: &str,
        index: usize,
        text: &str,
    ) -> Result<()> {
        self.write(&js::set_input_by_classes(classes, index, text)).await
    }

    /// Click the item at `index` among `element_type` elements whose
    /// inner content starts with `text`. Requires jQuery on the page.
    pub async fn click_by_inner_html(
        &mut self,
        element_type: &str,
        text: &str,
        index: usize,
    ) -> Result<()> {
        self.write(&js::click_by_inner_html(element_type, text, index))
            .await
    }

    /// Fetch the item at `index` among `element_type` elements whose
    /// inner content starts with `text`. Requires jQuery on the page.
    pub async fn item_by_inner_html(
        &mut self,
        element_type: &str,
        text: &str,
        index: usize,
    ) -> Result<()> {
        self.write(&js::item_by_inner_html(element_type, text, index))
            .await
    }
}
