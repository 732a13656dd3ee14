use chrono::{DateTime, Local};

use crate::types::PullRequest;

/// Cursor and page movement inside the active list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Up,
    Down,
    PreviousPage,
    NextPage,
    FirstPage,
    LastPage,
}

#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    Navigate(Nav),
    Confirm,
    Back,
    Reload,
    ToggleDebug,
    Resize(u16, u16),
    Tick(DateTime<Local>),

    // Startup load; unlike Reload it leaves navigation untouched
    LoadRepositories,

    // Load completions, tagged with the request id they answer
    RepositoriesLoaded {
        request: u64,
        result: Result<Vec<String>, String>,
    },
    PullRequestsLoaded {
        request: u64,
        result: Result<Vec<PullRequest>, String>,
    },

    None,
}

/// Follow-up work requested by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadRepositories {
        request: u64,
    },
    LoadPullRequests {
        request: u64,
        owner: String,
        repo: String,
    },
}
