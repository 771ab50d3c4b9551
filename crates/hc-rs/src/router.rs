//! Output routing
//!
//! Separates the console's printed output from the echoed input prompt.
//! One router task runs per session, draining the raw line channel and
//! forwarding everything that is not a prompt echo.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Prefix marking an echoed input line in the console output.
pub const PROMPT_PREFIX: &str = ">>>";

/// True for lines that echo the operator's own input.
pub fn is_prompt_echo(line: &str) -> bool {
    line.starts_with(PROMPT_PREFIX)
}

/// Drain `raw`, forwarding every non-echo line to `filtered` in arrival
/// order. Prompt echoes are dropped silently; everything else passes
/// through unchanged.
///
/// Ends when the raw channel closes (the process exited), when the
/// filtered receiver is gone, or when `cancel` fires.
pub async fn route_output(
    mut raw: mpsc::Receiver<String>,
    filtered: mpsc::Sender<String>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            line = raw.recv() => {
                let Some(line) = line else { return };
                if is_prompt_echo(&line) {
                    continue;
                }
                if filtered.send(line).await.is_err() {
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREETING: &str = r#"Type a Javascript expression to evaluate or "quit" to exit."#;

    async fn run_router(
        input: &[&str],
    ) -> (mpsc::Receiver<String>, tokio::task::JoinHandle<()>) {
        let (raw_tx, raw_rx) = mpsc::channel(64);
        let (filtered_tx, filtered_rx) = mpsc::channel(64);
        let handle = tokio::spawn(route_output(
            raw_rx,
            filtered_tx,
            CancellationToken::new(),
        ));

        for line in input {
            raw_tx.send(line.to_string()).await.unwrap();
        }
        drop(raw_tx);

        (filtered_rx, handle)
    }

    #[tokio::test]
    async fn test_prompt_echo_dropped_rest_forwarded_in_order() {
        let (mut rx, handle) = run_router(&[GREETING, ">>> 1+1", "2"]).await;

        assert_eq!(rx.recv().await.unwrap(), GREETING);
        assert_eq!(rx.recv().await.unwrap(), "2");
        assert!(rx.recv().await.is_none());

        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_lines_pass_through_unchanged() {
        let (mut rx, handle) =
            run_router(&["  padded  ", "", "ReferenceError: x is not defined"]).await;

        assert_eq!(rx.recv().await.unwrap(), "  padded  ");
        assert_eq!(rx.recv().await.unwrap(), "");
        assert_eq!(rx.recv().await.unwrap(), "ReferenceError: x is not defined");

        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_only_leading_prompt_marker_is_filtered() {
        // The marker mid-line is ordinary output
        let (mut rx, handle) = run_router(&[">>> echoed", "result >>> kept"]).await;

        assert_eq!(rx.recv().await.unwrap(), "result >>> kept");
        assert!(rx.recv().await.is_none());

        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_all_echo_input_yields_nothing() {
        let (mut rx, handle) = run_router(&[">>> a", ">>> b", ">>>"]).await;

        assert!(rx.recv().await.is_none());
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_cancellation_stops_router_while_stream_is_open() {
        let (raw_tx, raw_rx) = mpsc::channel(64);
        let (filtered_tx, mut filtered_rx) = mpsc::channel(64);
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(route_output(raw_rx, filtered_tx, cancel.clone()));

        raw_tx.send("before".to_string()).await.unwrap();
        assert_eq!(filtered_rx.recv().await.unwrap(), "before");

        // Raw channel stays open; cancellation alone must stop the task
        cancel.cancel();
        handle.await.unwrap();
        assert!(filtered_rx.recv().await.is_none());
        drop(raw_tx);
    }

    #[tokio::test]
    async fn test_dropped_consumer_stops_router() {
        let (raw_tx, raw_rx) = mpsc::channel(64);
        let (filtered_tx, filtered_rx) = mpsc::channel(1);
        let handle = tokio::spawn(route_output(
            raw_rx,
            filtered_tx,
            CancellationToken::new(),
        ));

        drop(filtered_rx);
        raw_tx.send("lost".to_string()).await.unwrap();

        handle.await.unwrap();
    }
}
