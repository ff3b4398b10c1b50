//! CLI module for Titt.

pub mod commands;

use clap::{Parser, Subcommand};

/// Titt - MCP tools for YouTube insights and GitHub operations
///
/// Exposes YouTube transcript/search/channel tools and GitHub repository
/// operations to AI assistants over the Model Context Protocol.
#[derive(Parser, Debug)]
#[command(name = "titt")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the MCP server over stdio
    Mcp,

    /// Check configuration and credentials
    Doctor,

    /// Print the tool definitions as JSON
    Tools,
}
