//! hc: drive headless Chrome's interactive JavaScript console
//!
//! Launches Chrome in headless REPL mode, exchanges text lines with the
//! console over its stdio pipes, and filters the echoed `>>>` prompt
//! out of the output stream. Convenience methods format small DOM
//! expressions (click an element, read inner content, set text) and
//! write them to the console.
//!
//! # Example
//!
//! ```ignore
//! use hc::{ChromeSession, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SessionConfig::discover()?;
//!     let mut session = ChromeSession::launch("https://example.com", &config).await?;
//!
//!     session.click_selector("#go").await?;
//!     if let Some(line) = session.read_line().await {
//!         println!("console: {line}");
//!     }
//!
//!     session.exit().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod js;
pub mod router;
pub mod session;

pub use config::{SessionConfig, default_args};
pub use hc_runtime::{ChromeProcess, Error, Result, default_executable};
pub use session::ChromeSession;
