//! Line-oriented stdio transport
//!
//! Bidirectional text-line communication with the Chrome REPL over the
//! child's stdin/stdout pipes. Outbound lines are console commands;
//! inbound lines are pumped into a bounded channel by a background read
//! loop.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use crate::error::{Error, Result};

/// Capacity of the raw inbound line channel.
///
/// When the channel is full the read loop blocks, which backpressures
/// the child's stdout pipe.
const RAW_CHANNEL_CAPACITY: usize = 256;

/// Line transport over a pair of byte streams.
///
/// Generic over the streams so production code can use the child's
/// stdio pipes and tests can use in-memory duplex pipes.
#[derive(Debug)]
pub struct PipeTransport<W, R> {
    sender: PipeSender<W>,
    receiver: PipeReceiver<R>,
}

impl<W, R> PipeTransport<W, R>
where
    W: AsyncWrite + Unpin,
    R: AsyncRead + Unpin,
{
    /// Create a transport over the given write/read streams.
    ///
    /// Returns the transport and the receiving end of the raw line
    /// channel that the read loop feeds.
    pub fn new(stdin: W, stdout: R) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(RAW_CHANNEL_CAPACITY);
        let transport = Self {
            sender: PipeSender { stdin },
            receiver: PipeReceiver { stdout, tx },
        };
        (transport, rx)
    }

    /// Split into independently-owned sender and receiver halves.
    pub fn into_parts(self) -> (PipeSender<W>, PipeReceiver<R>) {
        (self.sender, self.receiver)
    }
}

/// Write half of the transport: one command per line.
#[derive(Debug)]
pub struct PipeSender<W> {
    stdin: W,
}

impl<W: AsyncWrite + Unpin> PipeSender<W> {
    /// Write `line` followed by a newline, then flush.
    pub async fn send(&mut self, line: &str) -> Result<()> {
        self.stdin
            .write_all(line.as_bytes())
            .await
            .map_err(|e| Error::TransportError(format!("Failed to write line: {}", e)))?;
        self.stdin
            .write_all(b"\n")
            .await
            .map_err(|e| Error::TransportError(format!("Failed to write newline: {}", e)))?;
        self.stdin
            .flush()
            .await
            .map_err(|e| Error::TransportError(format!("Failed to flush: {}", e)))?;
        Ok(())
    }
}

/// Read half of the transport: pumps child output into the raw channel.
#[derive(Debug)]
pub struct PipeReceiver<R> {
    stdout: R,
    tx: mpsc::Sender<String>,
}

impl<R: AsyncRead + Unpin> PipeReceiver<R> {
    /// Run the read loop until the stream ends.
    ///
    /// Each line is forwarded to the raw channel in arrival order with
    /// its terminator stripped. Exits cleanly on EOF or once the
    /// channel's receiver is dropped; read failures surface as
    /// `TransportError`.
    pub async fn run(self) -> Result<()> {
        let mut lines = BufReader::new(self.stdout).lines();
        loop {
            let line = lines
                .next_line()
                .await
                .map_err(|e| Error::TransportError(format!("Failed to read line: {}", e)))?;
            let Some(line) = line else {
                return Ok(());
            };
            if self.tx.send(line).await.is_err() {
                // Receiver gone, nothing left to deliver to
                return Ok(());
            }
        }
    }
}
