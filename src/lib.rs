//! Titt - MCP tools for YouTube insights and GitHub operations
//!
//! An MCP (Model Context Protocol) server that lets AI assistants fetch
//! YouTube transcripts, search videos, resolve channels, and manage GitHub
//! repositories.
//!
//! The name "Titt" comes from the Norwegian word for "peek."
//!
//! # Overview
//!
//! Titt exposes eight tools over JSON-RPC 2.0 on stdio:
//!
//! - YouTube: transcript fetching, keyword search with statistics, and
//!   channel resolution with recent uploads
//! - GitHub: repository creation, file create/update, issues, pull
//!   requests, and repository listing
//!
//! Each tool call is stateless: one or more upstream HTTP calls in
//! sequence, no caching, no retries, no shared state between calls.
//!
//! # Architecture
//!
//! - `config` - Settings loaded once at startup (file + environment)
//! - `youtube` - the YouTube adapter (captions, Data API, Atom feeds)
//! - `github` - the GitHub adapter (REST API, single account)
//! - `mcp` - protocol types, stdio server loop, tool dispatch
//! - `cli` - clap commands (mcp, doctor, tools)

pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod mcp;
pub mod youtube;

#[cfg(test)]
pub(crate) mod testsupport;

pub use error::{Result, TittError};
