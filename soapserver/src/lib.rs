//! # soapserver - Minimal HTTP server for SOAP endpoints
//!
//! A thin layer over axum:
//!
//! - [`server`] : [`Server`] and [`ServerBuilder`], routes with state, graceful shutdown
//! - [`logs`] : tracing subscriber with an in-memory ring buffer and a runtime level switch
//!
//! ## Example
//!
//! ```rust,no_run
//! use soapserver::{ServerBuilder, logs::LoggingOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut server = ServerBuilder::new("MyServer", "127.0.0.1", 8080).build();
//!     server.init_logging(LoggingOptions::default()).await?;
//!
//!     server
//!         .add_route("/api/status", || async { serde_json::json!({"status": "ok"}) })
//!         .await;
//!
//!     server.start().await?;
//!     server.wait().await;
//!     Ok(())
//! }
//! ```

pub mod logs;
pub mod server;

pub use logs::{CaptureLayer, LogState, LoggingOptions, log_dump};
pub use server::{Server, ServerBuilder, ServerInfo};
