//! Openverse MCP Library
//!
//! Openly-licensed image search via the Openverse API, exposed as MCP
//! tools.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use openverse_mcp::{Config, OpenverseMcpServer};
//!
//! let server = OpenverseMcpServer::new(Config::default());
//! // Serve via stdio or call tools in-process
//! ```
//!
//! # Configuration
//! Set `OPENVERSE_API_URL` env var or configure in `~/.config/openverse-mcp.toml`

pub mod client;
pub mod config;
pub mod essay;
pub mod server;
pub mod types;

// Re-export main server type and config
pub use config::Config;
pub use server::OpenverseMcpServer;

// Re-export the adapter seam for embedding and testing
pub use client::{ApiResult, ImageApi, OpenverseClient, OpenverseError};

// Re-export parameter types for direct API usage
pub use server::{
    EssayImagesParams, ImageDetailsParams, RelatedImagesParams, SearchImagesParams,
};
