//! MCP server for the Pingera monitoring platform.
//!
//! Exposes status pages, components, incidents, checks and heartbeats of a
//! Pingera account to MCP clients over stdio. Read operations are always
//! available; mutating tools require `PINGERA_MODE=read_write`.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pingera_mcp::{serve_stdio, Gateway, Settings};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Arc::new(Settings::from_env()?);
//! let gateway = Gateway::new(settings)?;
//! serve_stdio(gateway).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod params;
pub mod resources;
pub mod server;

// Re-exports
pub use config::{OperationMode, Settings};
pub use envelope::{Envelope, ErrorRecord};
pub use error::{ConfigError, ServerError, ServerResult};
pub use gateway::{Features, Gateway, GatewayResult};
pub use resources::ResourceRequest;
pub use server::{serve_stdio, PingeraServer};
