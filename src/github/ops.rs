//! Repository operations against the GitHub REST API.
//!
//! One pre-authenticated client per process, bound to a single account.
//! Every public operation converts internal failures into an `OpOutcome`
//! (or an empty list) instead of propagating them.

use crate::error::{Result, TittError};
use crate::github::models::{
    FileOpResult, IssueRecord, OpOutcome, PullRequestRecord, RepositoryRecord, RepositorySummary,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::{json, Value};
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("titt/", env!("CARGO_PKG_VERSION"));

/// Adapter over the GitHub REST API for the authenticated account.
pub struct GithubOps {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl GithubOps {
    /// Build the adapter. Fails when the HTTP client cannot be constructed.
    pub fn new(api_url: String, token: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(TittError::Http)?;

        Ok(Self {
            http,
            api_url,
            token,
        })
    }

    /// Create a repository under the authenticated account.
    pub async fn create_repository(
        &self,
        name: &str,
        description: Option<&str>,
        private: bool,
    ) -> OpOutcome<RepositoryRecord> {
        match self.try_create_repository(name, description, private).await {
            Ok(Some(record)) => OpOutcome::Success(record),
            Ok(None) => OpOutcome::error("repository creation failed"),
            Err(e) => OpOutcome::error(e.to_string()),
        }
    }

    async fn try_create_repository(
        &self,
        name: &str,
        description: Option<&str>,
        private: bool,
    ) -> Result<Option<RepositoryRecord>> {
        debug!("Creating repository '{}'", name);

        let response = self
            .http
            .post(format!("{}/user/repos", self.api_url))
            .bearer_auth(&self.token)
            .json(&json!({
                "name": name,
                "description": description,
                "private": private,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(
                "Repository creation for '{}' returned status {}",
                name,
                response.status()
            );
            return Ok(None);
        }

        let repo: Value = response.json().await?;
        Ok(Some(RepositoryRecord {
            name: repo["name"].as_str().unwrap_or(name).to_string(),
            full_name: repo["full_name"].as_str().unwrap_or("").to_string(),
            description: repo["description"].as_str().map(str::to_string),
            private: repo["private"].as_bool().unwrap_or(private),
            html_url: repo["html_url"].as_str().unwrap_or("").to_string(),
            clone_url: repo["clone_url"].as_str().unwrap_or("").to_string(),
        }))
    }

    /// Create a file, or update it in place when it already exists.
    ///
    /// The update path needs the file's current content SHA; when that read
    /// fails for any reason the call falls back to plain creation.
    pub async fn create_or_update_file(
        &self,
        repo_name: &str,
        file_path: &str,
        content: &str,
        commit_message: &str,
    ) -> OpOutcome<FileOpResult> {
        match self
            .try_put_file(repo_name, file_path, content, commit_message)
            .await
        {
            Ok(success) => OpOutcome::Success(FileOpResult { success }),
            Err(e) => OpOutcome::error(e.to_string()),
        }
    }

    async fn try_put_file(
        &self,
        repo_name: &str,
        file_path: &str,
        content: &str,
        commit_message: &str,
    ) -> Result<bool> {
        let login = self.authenticated_login().await?;
        let contents_url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_url, login, repo_name, file_path
        );

        let sha = self.current_file_sha(&contents_url).await;

        let mut body = json!({
            "message": commit_message,
            "content": BASE64.encode(content),
        });
        if let Some(sha) = &sha {
            debug!("Updating {}/{} at revision {}", repo_name, file_path, sha);
            body["sha"] = json!(sha);
        } else {
            debug!("Creating {}/{}", repo_name, file_path);
        }

        let response = self
            .http
            .put(&contents_url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(
                "File write to {}/{} returned status {}",
                repo_name,
                file_path,
                response.status()
            );
            return Ok(false);
        }
        Ok(true)
    }

    /// Read the current revision SHA of a file, or None when the file does
    /// not exist or the read fails.
    async fn current_file_sha(&self, contents_url: &str) -> Option<String> {
        let response = self
            .http
            .get(contents_url)
            .bearer_auth(&self.token)
            .send()
            .await
            .ok()?;
        if !response.status().is_success() {
            return None;
        }
        let file: Value = response.json().await.ok()?;
        file["sha"].as_str().map(str::to_string)
    }

    /// Open an issue on one of the account's repositories.
    pub async fn create_issue(
        &self,
        repo_name: &str,
        title: &str,
        body: Option<&str>,
    ) -> OpOutcome<IssueRecord> {
        match self.try_create_issue(repo_name, title, body).await {
            Ok(Some(record)) => OpOutcome::Success(record),
            Ok(None) => OpOutcome::error("issue creation failed"),
            Err(e) => OpOutcome::error(e.to_string()),
        }
    }

    async fn try_create_issue(
        &self,
        repo_name: &str,
        title: &str,
        body: Option<&str>,
    ) -> Result<Option<IssueRecord>> {
        let login = self.authenticated_login().await?;
        debug!("Creating issue '{}' on {}/{}", title, login, repo_name);

        let response = self
            .http
            .post(format!(
                "{}/repos/{}/{}/issues",
                self.api_url, login, repo_name
            ))
            .bearer_auth(&self.token)
            .json(&json!({"title": title, "body": body}))
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(
                "Issue creation on {} returned status {}",
                repo_name,
                response.status()
            );
            return Ok(None);
        }

        let issue: Value = response.json().await?;
        Ok(Some(IssueRecord {
            number: issue["number"].as_u64().unwrap_or(0),
            title: issue["title"].as_str().unwrap_or(title).to_string(),
            body: issue["body"].as_str().map(str::to_string),
            html_url: issue["html_url"].as_str().unwrap_or("").to_string(),
        }))
    }

    /// Open a pull request on one of the account's repositories.
    pub async fn create_pull_request(
        &self,
        repo_name: &str,
        title: &str,
        head: &str,
        base: &str,
        body: Option<&str>,
    ) -> OpOutcome<PullRequestRecord> {
        match self
            .try_create_pull_request(repo_name, title, head, base, body)
            .await
        {
            Ok(Some(record)) => OpOutcome::Success(record),
            Ok(None) => OpOutcome::error("pull request creation failed"),
            Err(e) => OpOutcome::error(e.to_string()),
        }
    }

    async fn try_create_pull_request(
        &self,
        repo_name: &str,
        title: &str,
        head: &str,
        base: &str,
        body: Option<&str>,
    ) -> Result<Option<PullRequestRecord>> {
        let login = self.authenticated_login().await?;
        debug!(
            "Creating pull request '{}' ({} -> {}) on {}/{}",
            title, head, base, login, repo_name
        );

        let response = self
            .http
            .post(format!(
                "{}/repos/{}/{}/pulls",
                self.api_url, login, repo_name
            ))
            .bearer_auth(&self.token)
            .json(&json!({
                "title": title,
                "head": head,
                "base": base,
                "body": body,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(
                "Pull request creation on {} returned status {}",
                repo_name,
                response.status()
            );
            return Ok(None);
        }

        let pr: Value = response.json().await?;
        Ok(Some(PullRequestRecord {
            number: pr["number"].as_u64().unwrap_or(0),
            title: pr["title"].as_str().unwrap_or(title).to_string(),
            body: pr["body"].as_str().map(str::to_string),
            html_url: pr["html_url"].as_str().unwrap_or("").to_string(),
        }))
    }

    /// List the account's repositories. Degrades to an empty list on any
    /// failure.
    pub async fn list_repositories(&self, visibility: &str) -> Vec<RepositorySummary> {
        match self.try_list_repositories(visibility).await {
            Ok(repos) => repos,
            Err(e) => {
                warn!("Repository listing failed: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_list_repositories(&self, visibility: &str) -> Result<Vec<RepositorySummary>> {
        debug!("Listing repositories (visibility={})", visibility);

        let repos: Value = self
            .http
            .get(format!("{}/user/repos", self.api_url))
            .bearer_auth(&self.token)
            // The filter passes through unmodified; GitHub rejects values
            // outside all/public/private itself.
            .query(&[("visibility", visibility), ("per_page", "100")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(items) = repos.as_array() else {
            return Err(TittError::Upstream(
                "Repository listing was not an array".to_string(),
            ));
        };

        Ok(items.iter().map(summarize_repository).collect())
    }

    /// Resolve the login all repository lookups are scoped to.
    async fn authenticated_login(&self) -> Result<String> {
        let user: Value = self
            .http
            .get(format!("{}/user", self.api_url))
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        user["login"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| TittError::Upstream("Authenticated user has no login".to_string()))
    }
}

fn summarize_repository(repo: &Value) -> RepositorySummary {
    RepositorySummary {
        name: repo["name"].as_str().unwrap_or("").to_string(),
        full_name: repo["full_name"].as_str().unwrap_or("").to_string(),
        description: repo["description"].as_str().map(str::to_string),
        url: repo["html_url"].as_str().unwrap_or("").to_string(),
        private: repo["private"].as_bool().unwrap_or(false),
        created_at: format_timestamp(repo["created_at"].as_str()),
        updated_at: format_timestamp(repo["updated_at"].as_str()),
        language: repo["language"].as_str().map(str::to_string),
        stars: repo["stargazers_count"].as_u64().unwrap_or(0),
        forks: repo["forks_count"].as_u64().unwrap_or(0),
    }
}

/// Reformat an RFC 3339 timestamp as `YYYY-MM-DD HH:MM:SS`.
///
/// Falls back to the raw string when it does not parse.
fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::{Route, StubServer};

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp(Some("2026-03-14T09:26:53Z")),
            "2026-03-14 09:26:53"
        );
        assert_eq!(format_timestamp(Some("not-a-date")), "not-a-date");
        assert_eq!(format_timestamp(None), "");
    }

    #[test]
    fn test_summarize_repository_defaults() {
        let repo = json!({
            "name": "titt",
            "full_name": "me/titt",
            "created_at": "2026-01-02T03:04:05Z"
        });
        let summary = summarize_repository(&repo);
        assert_eq!(summary.name, "titt");
        assert_eq!(summary.created_at, "2026-01-02 03:04:05");
        assert_eq!(summary.updated_at, "");
        assert!(!summary.private);
        assert_eq!(summary.stars, 0);
        assert!(summary.language.is_none());
    }

    #[tokio::test]
    async fn test_mutations_never_raise() {
        // Nothing listens here; every request errors at the transport.
        let ops = GithubOps::new("http://127.0.0.1:1".to_string(), "token".to_string()).unwrap();

        let created = ops.create_repository("r", None, false).await;
        assert!(matches!(created, OpOutcome::Error { .. }));

        let filed = ops.create_or_update_file("r", "a.txt", "hi", "msg").await;
        assert!(matches!(filed, OpOutcome::Error { .. }));

        let issued = ops.create_issue("r", "t", None).await;
        assert!(matches!(issued, OpOutcome::Error { .. }));

        let pulled = ops.create_pull_request("r", "t", "dev", "main", None).await;
        assert!(matches!(pulled, OpOutcome::Error { .. }));
    }

    #[tokio::test]
    async fn test_list_degrades_to_empty() {
        let ops = GithubOps::new("http://127.0.0.1:1".to_string(), "token".to_string()).unwrap();
        assert!(ops.list_repositories("all").await.is_empty());
    }

    #[tokio::test]
    async fn test_put_file_creates_when_absent() {
        let stub = StubServer::start(vec![
            Route {
                method: "GET",
                path_prefix: "/repos/me/notes/contents/",
                status: 404,
                body: r#"{"message": "Not Found"}"#,
            },
            Route {
                method: "GET",
                path_prefix: "/user",
                status: 200,
                body: r#"{"login": "me"}"#,
            },
            Route {
                method: "PUT",
                path_prefix: "/repos/me/notes/contents/",
                status: 201,
                body: r#"{"content": {}}"#,
            },
        ])
        .await;

        let ops = GithubOps::new(stub.base_url.clone(), "token".to_string()).unwrap();
        let outcome = ops
            .create_or_update_file("notes", "a.txt", "hello", "add a.txt")
            .await;
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"success": true})
        );

        // Missing file means a plain create: no revision SHA in the body.
        let put = stub
            .requests()
            .into_iter()
            .find(|r| r.method == "PUT")
            .unwrap();
        assert_eq!(put.path, "/repos/me/notes/contents/a.txt");
        assert!(!put.body.contains("\"sha\""));
        assert!(put.body.contains("\"message\":\"add a.txt\""));
    }

    #[tokio::test]
    async fn test_put_file_updates_with_current_revision() {
        let stub = StubServer::start(vec![
            Route {
                method: "GET",
                path_prefix: "/repos/me/notes/contents/",
                status: 200,
                body: r#"{"sha": "abc123", "content": ""}"#,
            },
            Route {
                method: "GET",
                path_prefix: "/user",
                status: 200,
                body: r#"{"login": "me"}"#,
            },
            Route {
                method: "PUT",
                path_prefix: "/repos/me/notes/contents/",
                status: 200,
                body: r#"{"content": {}}"#,
            },
        ])
        .await;

        let ops = GithubOps::new(stub.base_url.clone(), "token".to_string()).unwrap();
        let outcome = ops
            .create_or_update_file("notes", "a.txt", "hello again", "update a.txt")
            .await;
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"success": true})
        );

        // Existing file means an update carrying its current SHA.
        let put = stub
            .requests()
            .into_iter()
            .find(|r| r.method == "PUT")
            .unwrap();
        assert!(put.body.contains("\"sha\":\"abc123\""));
    }
}
