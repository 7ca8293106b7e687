//! Google Search Console reports from the command line and over MCP.
//!
//! The [`reports`] module holds the nine report functions and the dispatch
//! table shared by both front ends: [`cli`] renders results as text, and
//! [`mcp`] returns them as structured JSON tool results.

pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod mcp;
pub mod reports;
pub mod request;
pub mod serde_utils;

#[cfg(test)]
mod test_support;
