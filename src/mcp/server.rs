//! MCP server implementation.
//!
//! Reads JSON-RPC requests line by line from stdin and writes responses to
//! stdout; all logging goes to stderr. Each tool call is a stateless,
//! single-shot trip through one of the adapters.

use super::protocol::*;
use super::tools::get_tools;
use crate::config::Settings;
use crate::github::GithubOps;
use crate::youtube::{TranscriptFetcher, VideoInsights};
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};
use tracing::{error, info};

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "titt";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The adapters behind the tool surface, built once at initialize.
struct Adapters {
    transcripts: TranscriptFetcher,
    insights: VideoInsights,
    github: GithubOps,
}

/// MCP server for Titt.
pub struct McpServer {
    settings: Settings,
    adapters: Option<Adapters>,
}

impl McpServer {
    /// Create a new MCP server.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            adapters: None,
        }
    }

    /// Run the MCP server (reads from stdin, writes to stdout).
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        info!("Titt MCP server starting");

        for line in stdin.lock().lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            let request: JsonRpcRequest = match serde_json::from_str(&line) {
                Ok(req) => req,
                Err(e) => {
                    error!("Failed to parse request: {}", e);
                    let response = JsonRpcResponse::error(None, -32700, "Parse error");
                    writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
                    stdout.flush()?;
                    continue;
                }
            };

            let response = self.handle_request(request).await;
            writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
            stdout.flush()?;
        }

        Ok(())
    }

    /// Handle a single JSON-RPC request.
    async fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "initialized" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            _ => JsonRpcResponse::error(
                request.id,
                -32601,
                &format!("Method not found: {}", request.method),
            ),
        }
    }

    /// Handle initialize: build the adapters from the loaded settings.
    fn handle_initialize(&mut self, id: Option<Value>) -> JsonRpcResponse {
        let token = match self.settings.require_github_token() {
            Ok(t) => t,
            Err(e) => {
                error!("Initialization failed: {}", e);
                return JsonRpcResponse::error(id, -32000, &format!("Init failed: {}", e));
            }
        };

        let github = match GithubOps::new(self.settings.github.api_url.clone(), token) {
            Ok(g) => g,
            Err(e) => {
                error!("Failed to build GitHub client: {}", e);
                return JsonRpcResponse::error(id, -32000, &format!("Init failed: {}", e));
            }
        };

        self.adapters = Some(Adapters {
            transcripts: TranscriptFetcher::new(self.settings.youtube.caption_languages.clone()),
            insights: VideoInsights::new(
                self.settings.youtube.api_url.clone(),
                self.settings.youtube.feed_url.clone(),
                self.settings.youtube_api_key(),
            ),
            github,
        });
        info!("Adapters initialized");

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        };

        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap())
    }

    /// Handle tools/list request.
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = ToolsListResult { tools: get_tools() };
        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap())
    }

    /// Handle tools/call: route to the named tool.
    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(id, -32602, &format!("Invalid params: {}", e))
                }
            },
            None => return JsonRpcResponse::error(id, -32602, "Missing params"),
        };

        let adapters = match &self.adapters {
            Some(a) => a,
            None => {
                return JsonRpcResponse::success(
                    id,
                    serde_json::to_value(ToolCallResult::error(
                        "Server not initialized".to_string(),
                    ))
                    .unwrap(),
                )
            }
        };

        let args = params.arguments.unwrap_or_else(|| json!({}));
        let result = match params.name.as_str() {
            "get_youtube_transcript" => self.tool_transcript(adapters, &args).await,
            "search_youtube_videos" => self.tool_search(adapters, &args).await,
            "get_channel_info" => self.tool_channel_info(adapters, &args).await,
            "create_github_repository" => self.tool_create_repo(adapters, &args).await,
            "create_or_update_github_file" => self.tool_put_file(adapters, &args).await,
            "create_github_issue" => self.tool_create_issue(adapters, &args).await,
            "create_github_pull_request" => self.tool_create_pr(adapters, &args).await,
            "list_github_repositories" => self.tool_list_repos(adapters, &args).await,
            _ => ToolCallResult::error(format!("Unknown tool: {}", params.name)),
        };

        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap())
    }

    /// get_youtube_transcript: raises on failure.
    async fn tool_transcript(&self, adapters: &Adapters, args: &Value) -> ToolCallResult {
        let url = match args.get("url").and_then(|v| v.as_str()) {
            Some(u) => u,
            None => return ToolCallResult::error("Missing 'url' argument".to_string()),
        };

        match adapters.transcripts.fetch(url).await {
            Ok(text) => ToolCallResult::text(text),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// search_youtube_videos: degrades to an empty list, never fails.
    async fn tool_search(&self, adapters: &Adapters, args: &Value) -> ToolCallResult {
        let query = match args.get("query").and_then(|v| v.as_str()) {
            Some(q) => q,
            None => return ToolCallResult::error("Missing 'query' argument".to_string()),
        };

        let cards = adapters.insights.search_videos(query).await;
        ToolCallResult::json(&cards)
    }

    /// get_channel_info: raises on failure, except the recent-uploads
    /// sub-fetch which degrades inside the adapter.
    async fn tool_channel_info(&self, adapters: &Adapters, args: &Value) -> ToolCallResult {
        let video_url = match args.get("video_url").and_then(|v| v.as_str()) {
            Some(u) => u,
            None => return ToolCallResult::error("Missing 'video_url' argument".to_string()),
        };

        match adapters.insights.channel_info(video_url).await {
            Ok(summary) => ToolCallResult::json(&summary),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    async fn tool_create_repo(&self, adapters: &Adapters, args: &Value) -> ToolCallResult {
        let name = match args.get("name").and_then(|v| v.as_str()) {
            Some(n) => n,
            None => return ToolCallResult::error("Missing 'name' argument".to_string()),
        };
        let description = args.get("description").and_then(|v| v.as_str());
        let private = args.get("private").and_then(|v| v.as_bool()).unwrap_or(false);

        let outcome = adapters.github.create_repository(name, description, private).await;
        ToolCallResult::json(&outcome)
    }

    async fn tool_put_file(&self, adapters: &Adapters, args: &Value) -> ToolCallResult {
        let repo_name = match args.get("repo_name").and_then(|v| v.as_str()) {
            Some(r) => r,
            None => return ToolCallResult::error("Missing 'repo_name' argument".to_string()),
        };
        let file_path = match args.get("file_path").and_then(|v| v.as_str()) {
            Some(p) => p,
            None => return ToolCallResult::error("Missing 'file_path' argument".to_string()),
        };
        let content = match args.get("content").and_then(|v| v.as_str()) {
            Some(c) => c,
            None => return ToolCallResult::error("Missing 'content' argument".to_string()),
        };
        let commit_message = match args.get("commit_message").and_then(|v| v.as_str()) {
            Some(m) => m,
            None => return ToolCallResult::error("Missing 'commit_message' argument".to_string()),
        };

        let outcome = adapters
            .github
            .create_or_update_file(repo_name, file_path, content, commit_message)
            .await;
        ToolCallResult::json(&outcome)
    }

    async fn tool_create_issue(&self, adapters: &Adapters, args: &Value) -> ToolCallResult {
        let repo_name = match args.get("repo_name").and_then(|v| v.as_str()) {
            Some(r) => r,
            None => return ToolCallResult::error("Missing 'repo_name' argument".to_string()),
        };
        let title = match args.get("title").and_then(|v| v.as_str()) {
            Some(t) => t,
            None => return ToolCallResult::error("Missing 'title' argument".to_string()),
        };
        let body = args.get("body").and_then(|v| v.as_str());

        let outcome = adapters.github.create_issue(repo_name, title, body).await;
        ToolCallResult::json(&outcome)
    }

    async fn tool_create_pr(&self, adapters: &Adapters, args: &Value) -> ToolCallResult {
        let repo_name = match args.get("repo_name").and_then(|v| v.as_str()) {
            Some(r) => r,
            None => return ToolCallResult::error("Missing 'repo_name' argument".to_string()),
        };
        let title = match args.get("title").and_then(|v| v.as_str()) {
            Some(t) => t,
            None => return ToolCallResult::error("Missing 'title' argument".to_string()),
        };
        let head = match args.get("head").and_then(|v| v.as_str()) {
            Some(h) => h,
            None => return ToolCallResult::error("Missing 'head' argument".to_string()),
        };
        let base = args.get("base").and_then(|v| v.as_str()).unwrap_or("main");
        let body = args.get("body").and_then(|v| v.as_str());

        let outcome = adapters
            .github
            .create_pull_request(repo_name, title, head, base, body)
            .await;
        ToolCallResult::json(&outcome)
    }

    async fn tool_list_repos(&self, adapters: &Adapters, args: &Value) -> ToolCallResult {
        let visibility = args
            .get("visibility")
            .and_then(|v| v.as_str())
            .unwrap_or("all");

        let repos = adapters.github.list_repositories(visibility).await;
        ToolCallResult::json(&repos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: &str, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params,
        }
    }

    fn initialized_server() -> McpServer {
        let mut settings = Settings::default();
        settings.github.token = Some("test-token".to_string());
        let mut server = McpServer::new(settings);
        let response = futures_block(server.handle_request(request("initialize", None)));
        assert!(response.error.is_none());
        server
    }

    fn futures_block<F: std::future::Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(fut)
    }

    #[test]
    fn test_unknown_method() {
        let mut server = McpServer::new(Settings::default());
        let response = futures_block(server.handle_request(request("bogus/method", None)));
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[test]
    fn test_initialize_requires_github_token() {
        let mut server = McpServer::new(Settings::default());
        let response = futures_block(server.handle_request(request("initialize", None)));
        assert_eq!(response.error.unwrap().code, -32000);
    }

    #[test]
    fn test_tools_list_has_all_eight() {
        let server = McpServer::new(Settings::default());
        let response = server.handle_tools_list(Some(json!(1)));
        let tools = response.result.unwrap()["tools"].as_array().unwrap().len();
        assert_eq!(tools, 8);
    }

    #[test]
    fn test_call_before_initialize() {
        let server = McpServer::new(Settings::default());
        let response = futures_block(server.handle_tools_call(
            Some(json!(1)),
            Some(json!({"name": "search_youtube_videos", "arguments": {"query": "q"}})),
        ));
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("not initialized"));
    }

    #[test]
    fn test_unknown_tool_is_tool_error() {
        let server = initialized_server();
        let response = futures_block(server.handle_tools_call(
            Some(json!(1)),
            Some(json!({"name": "no_such_tool", "arguments": {}})),
        ));
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
    }

    #[test]
    fn test_missing_argument_is_tool_error() {
        let server = initialized_server();
        let response = futures_block(server.handle_tools_call(
            Some(json!(1)),
            Some(json!({"name": "get_youtube_transcript", "arguments": {}})),
        ));
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("'url'"));
    }

    #[test]
    fn test_invalid_transcript_url_fails_the_call() {
        let server = initialized_server();
        let response = futures_block(server.handle_tools_call(
            Some(json!(1)),
            Some(json!({
                "name": "get_youtube_transcript",
                "arguments": {"url": "https://example.com/page"}
            })),
        ));
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Invalid"));
    }
}
