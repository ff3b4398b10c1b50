//! GitHub adapter: repository, contents, issue, and pull request operations.

mod models;
mod ops;

pub use models::{
    FileOpResult, IssueRecord, OpOutcome, PullRequestRecord, RepositoryRecord, RepositorySummary,
};
pub use ops::GithubOps;
