use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Owner login -> fully-qualified repository names, in load order.
pub type OwnerGroups = HashMap<String, Vec<String>>;

/// Group `owner/name` strings by owner. Names that do not split into exactly two
/// segments are dropped, as are repeats of a name already grouped.
pub fn group_by_owner(repos: &[String]) -> OwnerGroups {
    let mut groups = OwnerGroups::new();
    let mut seen = HashSet::new();
    for repo in repos {
        if !seen.insert(repo.as_str()) {
            continue;
        }
        if let Some((owner, _)) = split_full_name(repo) {
            groups
                .entry(owner.to_string())
                .or_default()
                .push(repo.clone());
        }
    }
    groups
}

/// Short repository name from `owner/name`; anything else is returned as-is.
pub fn repo_short_name(full_name: &str) -> &str {
    split_full_name(full_name)
        .map(|(_, name)| name)
        .unwrap_or(full_name)
}

fn split_full_name(full_name: &str) -> Option<(&str, &str)> {
    let mut parts = full_name.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(name), None) => Some((owner, name)),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    ChangesRequested,
}

impl ReviewStatus {
    /// GitHub's list endpoint has no review summary, so mergeability stands in for it.
    pub fn from_mergeable(mergeable: Option<bool>) -> Self {
        match mergeable {
            Some(true) => ReviewStatus::Approved,
            Some(false) => ReviewStatus::ChangesRequested,
            None => ReviewStatus::Pending,
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewStatus::Pending => write!(f, "pending"),
            ReviewStatus::Approved => write!(f, "approved"),
            ReviewStatus::ChangesRequested => write!(f, "changes_requested"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrState {
    #[default]
    Open,
    Closed,
    Merged,
}

impl fmt::Display for PrState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrState::Open => write!(f, "Open"),
            PrState::Closed => write!(f, "Closed"),
            PrState::Merged => write!(f, "Merged"),
        }
    }
}

/// Status used to pick a row icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStatus {
    Draft,
    Approved,
    ChangesRequested,
    Open,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PullRequest {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub state: PrState,
    pub author: String,
    pub draft: bool,
    pub review_status: ReviewStatus,
    pub mergeable: Option<bool>,
    pub labels: Vec<String>,
    pub assignees: Vec<String>,
    pub reviewers: Vec<String>,
    pub comments: u64,
    pub commits: u64,
    pub additions: u64,
    pub deletions: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PullRequest {
    /// Draft wins over any review status.
    pub fn display_status(&self) -> DisplayStatus {
        if self.draft {
            return DisplayStatus::Draft;
        }
        match self.review_status {
            ReviewStatus::Approved => DisplayStatus::Approved,
            ReviewStatus::ChangesRequested => DisplayStatus::ChangesRequested,
            ReviewStatus::Pending => DisplayStatus::Open,
        }
    }
}
