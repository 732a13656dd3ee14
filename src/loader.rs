use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::action::{Action, Effect};
use crate::error::{NavError, Result};
use crate::forge::Forge;

/// Runs load effects in the background. Every dispatched effect produces exactly one
/// completion action on the channel, success or failure.
pub struct Loader {
    source: Arc<dyn Forge>,
    tx: UnboundedSender<Action>,
    timeout: Duration,
}

async fn with_timeout<T>(
    limit: Duration,
    fut: impl std::future::Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(NavError::Timeout(limit)),
    }
}

impl Loader {
    pub fn new(source: Arc<dyn Forge>, tx: UnboundedSender<Action>, timeout: Duration) -> Self {
        Self {
            source,
            tx,
            timeout,
        }
    }

    pub fn dispatch(&self, effect: Effect) -> JoinHandle<()> {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let timeout = self.timeout;

        tokio::spawn(async move {
            let action = match effect {
                Effect::LoadRepositories { request } => {
                    debug!(request, forge = source.name(), "loading repositories");
                    let result = with_timeout(timeout, source.list_repositories()).await;
                    if let Err(err) = &result {
                        warn!(request, error = %err, "repository load failed");
                    }
                    Action::RepositoriesLoaded {
                        request,
                        result: result.map_err(|e| e.to_string()),
                    }
                }
                Effect::LoadPullRequests {
                    request,
                    owner,
                    repo,
                } => {
                    debug!(request, %owner, %repo, "loading pull requests");
                    let fetch = source.list_open_pull_requests(&owner, &repo);
                    let result = with_timeout(timeout, fetch).await;
                    if let Err(err) = &result {
                        warn!(request, %owner, %repo, error = %err, "pull request load failed");
                    }
                    Action::PullRequestsLoaded {
                        request,
                        result: result.map_err(|e| e.to_string()),
                    }
                }
            };
            // receiver gone means the app is shutting down
            tx.send(action).ok();
        })
    }
}
