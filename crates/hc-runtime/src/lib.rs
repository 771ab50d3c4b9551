//! Chrome runtime - process lifecycle and stdio line transport
//!
//! This crate provides the low-level infrastructure for driving a
//! headless Chrome instance through its interactive JavaScript console:
//!
//! - **Executable discovery**: locating a Chrome/Chromium binary
//! - **Process management**: spawning and tearing down the child process
//! - **Transport**: line-oriented text over the child's stdio pipes
//!
//! The session facade in the `hc` crate builds on these pieces.

pub mod error;
pub mod locate;
pub mod process;
pub mod transport;

// Re-export key types at crate root
pub use error::{Error, Result};
pub use locate::default_executable;
pub use process::ChromeProcess;
pub use transport::{PipeReceiver, PipeSender, PipeTransport};
