//! Typed projections of GitHub entities and the uniform tool outcome.

use serde::Serialize;

/// Outcome of a repository operation.
///
/// Serializes untagged: either the success payload itself or
/// `{"error": message}`. Repository tools never fail the tool call; they
/// always hand one of these back.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum OpOutcome<T: Serialize> {
    Success(T),
    Error { error: String },
}

impl<T: Serialize> OpOutcome<T> {
    pub fn error(message: impl Into<String>) -> Self {
        OpOutcome::Error {
            error: message.into(),
        }
    }
}

/// A freshly created repository.
#[derive(Debug, Clone, Serialize)]
pub struct RepositoryRecord {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub private: bool,
    pub html_url: String,
    pub clone_url: String,
}

/// One row of the repository listing.
#[derive(Debug, Clone, Serialize)]
pub struct RepositorySummary {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub url: String,
    pub private: bool,
    /// Formatted `YYYY-MM-DD HH:MM:SS`.
    pub created_at: String,
    pub updated_at: String,
    pub language: Option<String>,
    pub stars: u64,
    pub forks: u64,
}

/// A freshly created issue.
#[derive(Debug, Clone, Serialize)]
pub struct IssueRecord {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub html_url: String,
}

/// A freshly created pull request.
#[derive(Debug, Clone, Serialize)]
pub struct PullRequestRecord {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub html_url: String,
}

/// Result of a file create-or-update.
#[derive(Debug, Clone, Serialize)]
pub struct FileOpResult {
    pub success: bool,
}
