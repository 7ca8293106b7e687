//! Model Context Protocol (MCP) server
//!
//! Exposes every report as a `gsc_*` tool over stdio or Streamable HTTP.
//!
//! - **params**: JSON-schema parameter types, one per tool
//! - **server**: the tool router and `ServerHandler`
//! - **service**: transports
//!
//! The server is generic over `A: Authenticator`, so tests drive it with a
//! static token against a local mock API.

pub mod params;
pub mod server;
mod service;


pub use server::GscMcpServer;
pub use service::{create_mcp_service, serve_http, serve_stdio};
