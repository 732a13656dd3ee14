use async_trait::async_trait;

use crate::error::Result;
use crate::types::PullRequest;

/// Remote source of repositories and pull requests.
#[async_trait]
pub trait Forge: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;

    /// Fully-qualified "owner/name" of every repository the authenticated user can see:
    /// their own plus those of each organization they belong to.
    async fn list_repositories(&self) -> Result<Vec<String>>;

    async fn list_open_pull_requests(&self, owner: &str, repo: &str) -> Result<Vec<PullRequest>>;
}
