//! MCP (Model Context Protocol) server for Titt.
//!
//! Exposes the YouTube and GitHub adapters as tools for AI assistants.
//! Implements JSON-RPC 2.0 over stdio.

mod protocol;
mod server;
mod tools;

pub use server::McpServer;
pub use tools::get_tools;
