//! # creoson-rs
//!
//! **Async-first Rust client for the CREOSON JSON/HTTP API.**
//!
//! CREOSON exposes PTC Creo automation as a local HTTP server speaking a
//! fixed JSON envelope: every request is `{sessionId, command, function,
//! data}`, every response is `{status: {error, message}, data}`. This crate
//! wraps that protocol in a typed client: one method per remote operation,
//! grouped by domain, with optional parameters that are simply absent from
//! the request when the caller does not supply them.
//!
//! ## Quickstart (async)
//!
//! ```no_run
//! use creoson_rs::CreosonClient;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), creoson_rs::CreosonError> {
//!     let client = CreosonClient::builder().port(9056).connect().await?;
//!     let dirname = client.creo().pwd().await?;
//!     println!("working directory: {dirname}");
//!     client.disconnect().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Quickstart (blocking)
//!
//! ```no_run
//! # #[cfg(feature = "blocking")]
//! # fn run() -> Result<(), creoson_rs::CreosonError> {
//! use creoson_rs::CreosonClientBlocking;
//! let client = CreosonClientBlocking::connect()?;
//! let files = client.block_on(client.inner().creo().list_files(None))?;
//! println!("{} files", files.len());
//! # Ok(())
//! # }
//! ```
//!
//! Architecture layers:
//! - transport (HTTP POST, endpoint selection)
//! - envelope (request/response packing, `status`/`data` unwrapping)
//! - per-domain call builders
//! - high-level client

#![warn(missing_docs)]

/// Per-domain call builders and their option/model types.
pub mod api;
/// High-level async client, builder and connection lifecycle.
pub mod client;
/// Error types returned by this crate.
pub mod error;
/// Cross-domain parameter and model types.
pub mod model;

pub(crate) mod envelope;
pub(crate) mod transport;

#[cfg(feature = "blocking")]
/// Blocking wrapper over the async client.
pub mod blocking;

#[cfg(feature = "blocking")]
pub use crate::blocking::CreosonClientBlocking;
pub use crate::client::{ClientBuilder, CreosonClient};
pub use crate::error::CreosonError;
pub use crate::model::{
    ExportFormat, FeatureRef, FeatureStatus, ImageExportFormat, ImportFormat, OneOrMany, Point3,
};
