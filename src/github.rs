use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octocrab::{Octocrab, Page};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::auth::Credential;
use crate::error::{NavError, Result};
use crate::forge::Forge;
use crate::types::{PrState, PullRequest, ReviewStatus};

const REPO_PARAMS: &[(&str, &str)] = &[
    ("type", "all"),
    ("sort", "updated"),
    ("direction", "desc"),
    ("per_page", "100"),
];
const ORG_PARAMS: &[(&str, &str)] = &[("per_page", "100")];
const PULL_PARAMS: &[(&str, &str)] = &[
    ("state", "open"),
    ("sort", "updated"),
    ("direction", "desc"),
    ("per_page", "100"),
];

pub struct GitHub {
    client: Octocrab,
}

impl std::fmt::Debug for GitHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHub").finish_non_exhaustive()
    }
}

impl From<octocrab::Error> for NavError {
    fn from(err: octocrab::Error) -> Self {
        NavError::Api(err.to_string())
    }
}

impl GitHub {
    pub fn new(credential: &Credential, api_url: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(credential.secret().to_string());
        if let Some(url) = api_url {
            builder = builder
                .base_uri(url)
                .map_err(|e| NavError::Config(format!("invalid api_url {:?}: {}", url, e)))?;
        }
        let client = builder.build().map_err(|e| NavError::Auth(e.to_string()))?;

        Ok(Self { client })
    }

    /// Fetch the first page at `route` and follow `Link: next` to the end.
    async fn get_all<T: DeserializeOwned>(
        &self,
        route: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let page: Page<T> = self.client.get(route, Some(params)).await?;
        let items = self.client.all_pages(page).await?;
        debug!(route, count = items.len(), "fetched listing");
        Ok(items)
    }

    async fn repo_names(&self, route: &str) -> Result<Vec<String>> {
        let repos: Vec<RawRepo> = self.get_all(route, REPO_PARAMS).await?;
        Ok(repos.into_iter().filter_map(|r| r.full_name).collect())
    }
}

#[async_trait]
impl Forge for GitHub {
    fn name(&self) -> &str {
        "GitHub"
    }

    async fn list_repositories(&self) -> Result<Vec<String>> {
        let user = self
            .client
            .current()
            .user()
            .await
            .map_err(|e| NavError::from(e).context("failed to get authenticated user"))?;

        let mut repos = self
            .repo_names(&format!("/users/{}/repos", user.login))
            .await
            .map_err(|e| e.context("failed to list user repositories"))?;

        let orgs: Vec<RawOwner> = self
            .get_all("/user/orgs", ORG_PARAMS)
            .await
            .map_err(|e| e.context("failed to list organizations"))?;

        for org in orgs.into_iter().filter_map(|o| o.login) {
            match self.repo_names(&format!("/orgs/{}/repos", org)).await {
                Ok(names) => repos.extend(names),
                Err(err) => warn!(%org, error = %err, "skipping organization"),
            }
        }

        Ok(repos)
    }

    async fn list_open_pull_requests(&self, owner: &str, repo: &str) -> Result<Vec<PullRequest>> {
        let what = format!("failed to list pull requests for {}/{}", owner, repo);
        let pulls: Vec<RawPull> = self
            .get_all(&format!("/repos/{}/{}/pulls", owner, repo), PULL_PARAMS)
            .await
            .map_err(|e| e.context(what))?;
        Ok(pulls.into_iter().map(PullRequest::from).collect())
    }
}

// Wire records. Every field may be absent or null.

#[derive(Debug, Default, Deserialize)]
struct RawOwner {
    login: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawRepo {
    full_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawLabel {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPull {
    id: Option<u64>,
    number: Option<u64>,
    title: Option<String>,
    state: Option<String>,
    user: Option<RawOwner>,
    draft: Option<bool>,
    mergeable: Option<bool>,
    labels: Option<Vec<RawLabel>>,
    assignees: Option<Vec<RawOwner>>,
    requested_reviewers: Option<Vec<RawOwner>>,
    comments: Option<u64>,
    commits: Option<u64>,
    additions: Option<u64>,
    deletions: Option<u64>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    merged_at: Option<DateTime<Utc>>,
}

fn logins(users: Option<Vec<RawOwner>>) -> Vec<String> {
    users
        .unwrap_or_default()
        .into_iter()
        .filter_map(|u| u.login)
        .collect()
}

impl From<RawPull> for PullRequest {
    fn from(raw: RawPull) -> Self {
        let state = if raw.merged_at.is_some() {
            PrState::Merged
        } else if raw.state.as_deref() == Some("closed") {
            PrState::Closed
        } else {
            PrState::Open
        };

        PullRequest {
            id: raw.id.unwrap_or_default(),
            number: raw.number.unwrap_or_default(),
            title: raw.title.unwrap_or_default(),
            state,
            author: raw.user.and_then(|u| u.login).unwrap_or_default(),
            draft: raw.draft.unwrap_or_default(),
            review_status: ReviewStatus::from_mergeable(raw.mergeable),
            mergeable: raw.mergeable,
            labels: raw
                .labels
                .unwrap_or_default()
                .into_iter()
                .filter_map(|l| l.name)
                .collect(),
            assignees: logins(raw.assignees),
            reviewers: logins(raw.requested_reviewers),
            comments: raw.comments.unwrap_or_default(),
            commits: raw.commits.unwrap_or_default(),
            additions: raw.additions.unwrap_or_default(),
            deletions: raw.deletions.unwrap_or_default(),
            created_at: raw.created_at.unwrap_or_default(),
            updated_at: raw.updated_at.unwrap_or_default(),
        }
    }
}
