//! MCP command implementation.

use crate::config::Settings;
use crate::mcp::McpServer;
use anyhow::Result;

/// Run the MCP server.
///
/// The GitHub token is checked before the loop starts; running without one
/// is a startup error, not a per-call surprise.
pub async fn run_mcp(settings: Settings) -> Result<()> {
    settings.require_github_token()?;

    let mut server = McpServer::new(settings);
    server.run().await
}
