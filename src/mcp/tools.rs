//! MCP tool definitions for Titt.

use super::protocol::Tool;
use serde_json::json;

/// Get all available tools.
pub fn get_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "get_youtube_transcript".to_string(),
            description: "Fetch the captions of a YouTube video as a single flattened string. \
                Prefers Korean captions, falling back to English."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "YouTube video URL"
                    }
                },
                "required": ["url"]
            }),
        },
        Tool {
            name: "search_youtube_videos".to_string(),
            description: "Search YouTube for videos matching a keyword and return up to 20 \
                results enriched with view and like counts."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search keywords"
                    }
                },
                "required": ["query"]
            }),
        },
        Tool {
            name: "get_channel_info".to_string(),
            description: "Resolve a YouTube video URL to its channel: title, subscriber and \
                view counts, and the five most recent uploads."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "video_url": {
                        "type": "string",
                        "description": "URL of any video on the channel"
                    }
                },
                "required": ["video_url"]
            }),
        },
        Tool {
            name: "create_github_repository".to_string(),
            description: "Create a new repository under the authenticated GitHub account."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Repository name"
                    },
                    "description": {
                        "type": "string",
                        "description": "Repository description"
                    },
                    "private": {
                        "type": "boolean",
                        "description": "Create as a private repository",
                        "default": false
                    }
                },
                "required": ["name"]
            }),
        },
        Tool {
            name: "create_or_update_github_file".to_string(),
            description: "Create a file in a repository, or update it in place if it already \
                exists."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "repo_name": {
                        "type": "string",
                        "description": "Repository name (owned by the authenticated account)"
                    },
                    "file_path": {
                        "type": "string",
                        "description": "Path of the file inside the repository"
                    },
                    "content": {
                        "type": "string",
                        "description": "New file content"
                    },
                    "commit_message": {
                        "type": "string",
                        "description": "Commit message"
                    }
                },
                "required": ["repo_name", "file_path", "content", "commit_message"]
            }),
        },
        Tool {
            name: "create_github_issue".to_string(),
            description: "Open an issue on one of the authenticated account's repositories."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "repo_name": {
                        "type": "string",
                        "description": "Repository name"
                    },
                    "title": {
                        "type": "string",
                        "description": "Issue title"
                    },
                    "body": {
                        "type": "string",
                        "description": "Issue body"
                    }
                },
                "required": ["repo_name", "title"]
            }),
        },
        Tool {
            name: "create_github_pull_request".to_string(),
            description: "Open a pull request on one of the authenticated account's \
                repositories."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "repo_name": {
                        "type": "string",
                        "description": "Repository name"
                    },
                    "title": {
                        "type": "string",
                        "description": "Pull request title"
                    },
                    "head": {
                        "type": "string",
                        "description": "Branch containing the changes"
                    },
                    "base": {
                        "type": "string",
                        "description": "Branch to merge into",
                        "default": "main"
                    },
                    "body": {
                        "type": "string",
                        "description": "Pull request body"
                    }
                },
                "required": ["repo_name", "title", "head"]
            }),
        },
        Tool {
            name: "list_github_repositories".to_string(),
            description: "List the authenticated account's repositories with stars, forks, \
                language, and timestamps."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "visibility": {
                        "type": "string",
                        "enum": ["all", "public", "private"],
                        "description": "Which repositories to include",
                        "default": "all"
                    }
                },
                "required": []
            }),
        },
    ]
}
