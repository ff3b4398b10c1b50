//! Tools command - dump the tool definitions.

use crate::mcp::get_tools;
use anyhow::Result;

/// Print the MCP tool definitions as pretty JSON.
pub fn run_tools() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&get_tools())?);
    Ok(())
}
