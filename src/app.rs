use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use crate::action::{Action, Effect, Nav};
use crate::event::Event;
use crate::types::{group_by_owner, repo_short_name, OwnerGroups, PullRequest};
use crate::ui::CHROME_ROWS;
use crate::views::ViewRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ViewMode {
    OwnerSelection, // Accounts and organizations
    RepoSelection,  // Repositories of the selected owner
    PrList,         // Open pull requests of the selected repository
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [
        ViewMode::OwnerSelection,
        ViewMode::RepoSelection,
        ViewMode::PrList,
    ];
}

/// One-line status shown under the title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Loading(String),
    Error(String),
    Ready(String),
}

pub struct App {
    pub mode: ViewMode,
    pub views: ViewRegistry,
    pub repo_groups: OwnerGroups,
    pub selected_owner: Option<String>,
    pub selected_repo: Option<String>,
    pub width: u16,
    pub height: u16,
    pub error: Option<String>,
    pub debug: bool,
    pub debug_info: String,
    pub should_quit: bool,
    masked_token: String,
    next_request: u64,
    // Request ids of in-flight loads; completions carrying any other id are stale
    pending_repos: Option<u64>,
    pending_pulls: Option<u64>,
}

impl App {
    pub fn new(page_size: usize, masked_token: String) -> Self {
        Self {
            mode: ViewMode::OwnerSelection,
            views: ViewRegistry::new(page_size),
            repo_groups: OwnerGroups::new(),
            selected_owner: None,
            selected_repo: None,
            width: 0,
            height: 0,
            error: None,
            debug: false,
            debug_info: "Initializing...".to_string(),
            should_quit: false,
            masked_token,
            next_request: 1,
            // loading until the startup load is dispatched and answered
            pending_repos: Some(0),
            pending_pulls: None,
        }
    }

    pub fn loading(&self) -> bool {
        self.pending_repos.is_some() || self.pending_pulls.is_some()
    }

    pub fn handle_event(&self, event: Event) -> Action {
        match event {
            Event::Init => Action::LoadRepositories,
            Event::Tick => Action::Tick(Local::now()),
            Event::Resize(width, height) => Action::Resize(width, height),
            Event::Key(key) => self.handle_key(key),
            Event::Render => Action::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Action::Quit,
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Up | KeyCode::Char('k') => Action::Navigate(Nav::Up),
            KeyCode::Down | KeyCode::Char('j') => Action::Navigate(Nav::Down),
            KeyCode::Left | KeyCode::Char('h') => Action::Navigate(Nav::PreviousPage),
            KeyCode::Right | KeyCode::Char('l') => Action::Navigate(Nav::NextPage),
            KeyCode::Char('g') => Action::Navigate(Nav::FirstPage),
            KeyCode::Char('G') => Action::Navigate(Nav::LastPage),
            KeyCode::Enter => Action::Confirm,
            KeyCode::Backspace | KeyCode::Char('b') => Action::Back,
            KeyCode::Char('d') => Action::ToggleDebug,
            KeyCode::Char('r') => Action::Reload,
            _ => Action::None,
        }
    }

    /// Apply one action and return the follow-up work it asks for.
    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Navigate(nav) => {
                self.views.get_mut(self.mode).handle_nav(nav);
            }
            Action::Confirm => return self.confirm(),
            Action::Back => self.back(),
            Action::Reload => return self.reload(),
            Action::ToggleDebug => {
                self.debug = !self.debug;
            }
            Action::Resize(width, height) => {
                self.width = width;
                self.height = height;
                self.views.set_size(width, height.saturating_sub(CHROME_ROWS));
            }
            Action::Tick(now) => self.refresh_debug_info(now),
            Action::LoadRepositories => return vec![self.start_repository_load()],
            Action::RepositoriesLoaded { request, result } => {
                self.repositories_loaded(request, result)
            }
            Action::PullRequestsLoaded { request, result } => {
                self.pull_requests_loaded(request, result)
            }
            Action::None => {}
        }
        Vec::new()
    }

    fn confirm(&mut self) -> Vec<Effect> {
        match self.mode {
            ViewMode::OwnerSelection => {
                let Some(owner) = self.views.owners.selected().map(str::to_string) else {
                    return Vec::new();
                };
                let repos = self.repo_groups.get(&owner).cloned().unwrap_or_default();
                debug!(%owner, repos = repos.len(), "entering repository selection");
                self.views.repos.set_data(&owner, repos);
                self.selected_owner = Some(owner);
                self.mode = ViewMode::RepoSelection;
                Vec::new()
            }
            ViewMode::RepoSelection => {
                let Some(repo) = self.views.repos.selected().map(str::to_string) else {
                    return Vec::new();
                };
                let owner = self.selected_owner.clone().unwrap_or_default();
                let request = self.next_request_id();
                debug!(%repo, request, "entering pull request list");
                let effect = Effect::LoadPullRequests {
                    request,
                    owner,
                    repo: repo_short_name(&repo).to_string(),
                };
                self.selected_repo = Some(repo);
                self.mode = ViewMode::PrList;
                self.pending_pulls = Some(request);
                self.error = None;
                vec![effect]
            }
            ViewMode::PrList => Vec::new(),
        }
    }

    fn back(&mut self) {
        match self.mode {
            ViewMode::OwnerSelection => {}
            ViewMode::RepoSelection => {
                self.mode = ViewMode::OwnerSelection;
                self.selected_owner = None;
                self.selected_repo = None;
            }
            ViewMode::PrList => {
                self.mode = ViewMode::RepoSelection;
                self.selected_repo = None;
                self.pending_pulls = None;
                self.views.pulls.clear();
            }
        }
    }

    fn reload(&mut self) -> Vec<Effect> {
        self.mode = ViewMode::OwnerSelection;
        self.selected_owner = None;
        self.selected_repo = None;
        self.pending_pulls = None;
        self.views.pulls.clear();
        self.error = None;
        vec![self.start_repository_load()]
    }

    fn start_repository_load(&mut self) -> Effect {
        let request = self.next_request_id();
        self.pending_repos = Some(request);
        Effect::LoadRepositories { request }
    }

    fn next_request_id(&mut self) -> u64 {
        let id = self.next_request;
        self.next_request += 1;
        id
    }

    fn repositories_loaded(&mut self, request: u64, result: Result<Vec<String>, String>) {
        if self.pending_repos != Some(request) {
            debug!(request, "discarding stale repository load");
            return;
        }
        self.pending_repos = None;

        match result {
            Ok(repos) => {
                self.repo_groups = group_by_owner(&repos);
                info!(
                    repos = repos.len(),
                    owners = self.repo_groups.len(),
                    "repositories loaded"
                );
                self.views.owners.set_data(&self.repo_groups);
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err);
            }
        }
    }

    fn pull_requests_loaded(&mut self, request: u64, result: Result<Vec<PullRequest>, String>) {
        if self.pending_pulls != Some(request) {
            debug!(request, "discarding stale pull request load");
            return;
        }
        self.pending_pulls = None;

        match result {
            Ok(pulls) => {
                let repo = self.selected_repo.as_deref().unwrap_or_default();
                info!(%repo, pulls = pulls.len(), "pull requests loaded");
                self.views.pulls.set_data(repo, pulls);
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err);
            }
        }
    }

    fn refresh_debug_info(&mut self, now: DateTime<Local>) {
        self.debug_info = format!(
            "Last update: {} | Token: {}",
            now.format("%H:%M:%S"),
            self.masked_token
        );
    }

    pub fn status(&self) -> Status {
        if self.loading() {
            let what = if self.pending_pulls.is_some() {
                "pull requests"
            } else {
                "repositories"
            };
            return Status::Loading(format!("Loading {}...", what));
        }
        if let Some(error) = &self.error {
            return Status::Error(error.clone());
        }

        let page_info = self.views.get(self.mode).page_info();
        Status::Ready(match self.mode {
            ViewMode::OwnerSelection => {
                format!("{} ({} organizations)", page_info, self.repo_groups.len())
            }
            ViewMode::RepoSelection => format!("{} - {}", page_info, self.views.repos.owner()),
            ViewMode::PrList => format!("{} - {}", page_info, self.views.pulls.repo()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::views::ListView;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn sized_app() -> App {
        let mut app = App::new(10, "gho_...cdef".to_string());
        app.update(Action::Resize(80, 24));
        app
    }

    fn start_load(app: &mut App) -> u64 {
        match app.update(Action::LoadRepositories).as_slice() {
            [Effect::LoadRepositories { request }] => *request,
            other => panic!("unexpected effects: {:?}", other),
        }
    }

    fn loaded_app(repos: &[&str]) -> App {
        let mut app = sized_app();
        let request = start_load(&mut app);
        app.update(Action::RepositoriesLoaded {
            request,
            result: Ok(names(repos)),
        });
        app
    }

    fn pr_request(effects: &[Effect]) -> u64 {
        match effects {
            [Effect::LoadPullRequests { request, .. }] => *request,
            other => panic!("unexpected effects: {:?}", other),
        }
    }

    fn pr(number: u64) -> PullRequest {
        PullRequest {
            number,
            title: format!("PR {}", number),
            ..Default::default()
        }
    }

    #[test]
    fn starts_loading_on_owner_selection() {
        let app = App::new(10, String::new());
        assert_eq!(app.mode, ViewMode::OwnerSelection);
        assert!(app.loading());
        assert!(app.selected_owner.is_none());
        assert!(app.repo_groups.is_empty());
        assert_eq!(
            app.status(),
            Status::Loading("Loading repositories...".to_string())
        );
    }

    #[test]
    fn init_event_requests_repositories() {
        let mut app = sized_app();
        let action = app.handle_event(Event::Init);
        assert!(matches!(action, Action::LoadRepositories));
        assert!(matches!(
            app.update(action).as_slice(),
            [Effect::LoadRepositories { .. }]
        ));
    }

    #[test]
    fn keys_map_to_actions() {
        let app = sized_app();
        let cases = [
            (KeyCode::Up, "Navigate(Up)"),
            (KeyCode::Char('k'), "Navigate(Up)"),
            (KeyCode::Down, "Navigate(Down)"),
            (KeyCode::Char('j'), "Navigate(Down)"),
            (KeyCode::Left, "Navigate(PreviousPage)"),
            (KeyCode::Char('h'), "Navigate(PreviousPage)"),
            (KeyCode::Right, "Navigate(NextPage)"),
            (KeyCode::Char('l'), "Navigate(NextPage)"),
            (KeyCode::Char('g'), "Navigate(FirstPage)"),
            (KeyCode::Char('G'), "Navigate(LastPage)"),
            (KeyCode::Enter, "Confirm"),
            (KeyCode::Backspace, "Back"),
            (KeyCode::Char('b'), "Back"),
            (KeyCode::Char('d'), "ToggleDebug"),
            (KeyCode::Char('r'), "Reload"),
            (KeyCode::Char('q'), "Quit"),
            (KeyCode::Char('x'), "None"),
            (KeyCode::Tab, "None"),
        ];
        for (code, expected) in cases {
            assert_eq!(format!("{:?}", app.handle_event(key(code))), expected);
        }
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = sized_app();
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        let action = app.handle_event(event);
        assert!(matches!(action, Action::Quit));
        app.update(action);
        assert!(app.should_quit);
    }

    #[test]
    fn repositories_loaded_groups_owners() {
        let app = loaded_app(&["b/z", "a/x", "a/y", "broken"]);
        assert!(!app.loading());
        assert_eq!(app.repo_groups.len(), 2);
        assert_eq!(app.repo_groups["a"], names(&["a/x", "a/y"]));
        assert_eq!(app.views.owners.selected(), Some("a"));
        assert_eq!(
            app.status(),
            Status::Ready("Showing 2 organizations (2 organizations)".to_string())
        );
    }

    #[test]
    fn repository_listed_twice_shows_once() {
        let app = loaded_app(&["a/x", "a/x", "a/y"]);
        assert_eq!(app.repo_groups["a"].len(), 2);
        assert_eq!(
            app.status(),
            Status::Ready("Showing 1 organizations (1 organizations)".to_string())
        );
    }

    #[test]
    fn confirm_owner_enters_repo_selection_without_fetch() {
        let mut app = loaded_app(&["a/x", "a/y", "b/z"]);
        let effects = app.update(Action::Confirm);
        assert!(effects.is_empty());
        assert_eq!(app.mode, ViewMode::RepoSelection);
        assert_eq!(app.selected_owner.as_deref(), Some("a"));
        assert_eq!(app.views.repos.selected(), Some("a/x"));
        assert_eq!(
            app.status(),
            Status::Ready("Showing 2 repositories - a".to_string())
        );
    }

    #[test]
    fn confirm_with_empty_owner_list_does_nothing() {
        let mut app = loaded_app(&[]);
        assert!(app.update(Action::Confirm).is_empty());
        assert_eq!(app.mode, ViewMode::OwnerSelection);
        assert!(app.selected_owner.is_none());
        assert_eq!(
            app.status(),
            Status::Ready("No organizations found (0 organizations)".to_string())
        );
    }

    #[test]
    fn confirm_repo_requests_pull_requests() {
        let mut app = loaded_app(&["acme/api", "acme/web"]);
        app.update(Action::Confirm);
        app.update(Action::Navigate(Nav::Down));
        let effects = app.update(Action::Confirm);

        match effects.as_slice() {
            [Effect::LoadPullRequests { owner, repo, .. }] => {
                assert_eq!(owner, "acme");
                assert_eq!(repo, "web");
            }
            other => panic!("unexpected effects: {:?}", other),
        }
        assert_eq!(app.mode, ViewMode::PrList);
        assert_eq!(app.selected_repo.as_deref(), Some("acme/web"));
        assert_eq!(
            app.status(),
            Status::Loading("Loading pull requests...".to_string())
        );
    }

    #[test]
    fn pull_requests_loaded_populates_view() {
        let mut app = loaded_app(&["acme/api"]);
        app.update(Action::Confirm);
        let request = pr_request(&app.update(Action::Confirm));

        app.update(Action::PullRequestsLoaded {
            request,
            result: Ok(vec![pr(1), pr(2), pr(3)]),
        });

        assert!(!app.loading());
        assert_eq!(app.views.pulls.repo(), "acme/api");
        assert_eq!(
            app.status(),
            Status::Ready("Showing 3 pull requests - acme/api".to_string())
        );
    }

    #[test]
    fn pull_request_failure_sets_error() {
        let mut app = loaded_app(&["acme/api"]);
        app.update(Action::Confirm);
        let request = pr_request(&app.update(Action::Confirm));

        app.update(Action::PullRequestsLoaded {
            request,
            result: Err("API error: Not Found".to_string()),
        });

        assert!(!app.loading());
        assert_eq!(app.mode, ViewMode::PrList);
        assert_eq!(
            app.status(),
            Status::Error("API error: Not Found".to_string())
        );
    }

    #[test]
    fn back_from_pull_requests_clears_repo_and_view() {
        let mut app = loaded_app(&["acme/api"]);
        app.update(Action::Confirm);
        let request = pr_request(&app.update(Action::Confirm));
        app.update(Action::PullRequestsLoaded {
            request,
            result: Ok(vec![pr(1)]),
        });

        app.update(Action::Back);
        assert_eq!(app.mode, ViewMode::RepoSelection);
        assert!(app.selected_repo.is_none());
        assert_eq!(app.selected_owner.as_deref(), Some("acme"));
        assert_eq!(app.views.pulls.len(), 0);
        assert_eq!(app.views.pulls.repo(), "");
    }

    #[test]
    fn back_from_repos_clears_both_selections() {
        let mut app = loaded_app(&["acme/api"]);
        app.update(Action::Confirm);
        app.update(Action::Back);
        assert_eq!(app.mode, ViewMode::OwnerSelection);
        assert!(app.selected_owner.is_none());
        assert!(app.selected_repo.is_none());

        // back on the first view stays put
        app.update(Action::Back);
        assert_eq!(app.mode, ViewMode::OwnerSelection);
    }

    #[test]
    fn back_then_forward_resets_repo_cursor() {
        let repos: Vec<String> = (0..25).map(|i| format!("acme/repo-{:02}", i)).collect();
        let repo_refs: Vec<&str> = repos.iter().map(String::as_str).collect();
        let mut app = loaded_app(&repo_refs);

        app.update(Action::Confirm);
        app.update(Action::Navigate(Nav::NextPage));
        app.update(Action::Navigate(Nav::Down));
        assert_eq!(app.views.repos.pager().page(), 1);
        assert_eq!(app.views.repos.pager().cursor(), 1);

        app.update(Action::Back);
        app.update(Action::Confirm);
        assert_eq!(app.views.repos.pager().page(), 0);
        assert_eq!(app.views.repos.pager().cursor(), 0);
        assert_eq!(app.views.repos.selected(), Some("acme/repo-00"));
    }

    #[test]
    fn stale_pull_requests_are_discarded_after_back() {
        let mut app = loaded_app(&["acme/api", "acme/web"]);
        app.update(Action::Confirm);
        let stale = pr_request(&app.update(Action::Confirm));

        app.update(Action::Back);
        assert!(!app.loading());

        app.update(Action::PullRequestsLoaded {
            request: stale,
            result: Ok(vec![pr(99)]),
        });
        assert_eq!(app.views.pulls.len(), 0);
        assert_eq!(app.mode, ViewMode::RepoSelection);
    }

    #[test]
    fn only_latest_pull_request_load_applies() {
        let mut app = loaded_app(&["acme/api", "acme/web"]);
        app.update(Action::Confirm);
        let first = pr_request(&app.update(Action::Confirm));
        app.update(Action::Back);
        app.update(Action::Navigate(Nav::Down));
        let second = pr_request(&app.update(Action::Confirm));
        assert_ne!(first, second);

        app.update(Action::PullRequestsLoaded {
            request: second,
            result: Ok(vec![pr(2)]),
        });
        app.update(Action::PullRequestsLoaded {
            request: first,
            result: Ok(vec![pr(1), pr(11)]),
        });

        assert_eq!(app.views.pulls.repo(), "acme/web");
        assert_eq!(app.views.pulls.selected().map(|p| p.number), Some(2));
    }

    #[test]
    fn failed_reload_keeps_previous_owners() {
        let mut app = loaded_app(&["a/x", "b/x", "c/x", "d/x", "e/x"]);

        let request = pr_or_repo_request(app.update(Action::Reload));
        app.update(Action::RepositoriesLoaded {
            request,
            result: Err("request timed out after 30s".to_string()),
        });

        assert_eq!(
            app.status(),
            Status::Error("request timed out after 30s".to_string())
        );
        assert_eq!(app.views.owners.len(), 5);
        assert_eq!(app.views.owners.render().len(), 5);

        let effects = app.update(Action::Reload);
        assert!(app.error.is_none());
        assert!(app.loading());
        assert!(matches!(
            effects.as_slice(),
            [Effect::LoadRepositories { .. }]
        ));
    }

    fn pr_or_repo_request(effects: Vec<Effect>) -> u64 {
        match effects.as_slice() {
            [Effect::LoadRepositories { request }] => *request,
            [Effect::LoadPullRequests { request, .. }] => *request,
            other => panic!("unexpected effects: {:?}", other),
        }
    }

    #[test]
    fn reload_resets_navigation() {
        let mut app = loaded_app(&["acme/api"]);
        app.update(Action::Confirm);
        app.update(Action::Confirm);
        assert_eq!(app.mode, ViewMode::PrList);

        app.update(Action::Reload);
        assert_eq!(app.mode, ViewMode::OwnerSelection);
        assert!(app.selected_owner.is_none());
        assert!(app.selected_repo.is_none());
        assert_eq!(
            app.status(),
            Status::Loading("Loading repositories...".to_string())
        );
    }

    #[test]
    fn stale_repository_load_is_discarded() {
        let mut app = loaded_app(&["a/x"]);
        let first = pr_or_repo_request(app.update(Action::Reload));
        let second = pr_or_repo_request(app.update(Action::Reload));

        app.update(Action::RepositoriesLoaded {
            request: first,
            result: Ok(names(&["old/x"])),
        });
        assert!(app.loading());
        assert!(app.repo_groups.contains_key("a"));

        app.update(Action::RepositoriesLoaded {
            request: second,
            result: Ok(names(&["new/x"])),
        });
        assert!(!app.loading());
        assert!(app.repo_groups.contains_key("new"));
        assert!(!app.repo_groups.contains_key("a"));
    }

    #[test]
    fn resize_reaches_every_view() {
        let mut app = App::new(10, String::new());
        app.update(Action::Resize(100, 30));
        assert_eq!((app.width, app.height), (100, 30));
        for mode in ViewMode::ALL {
            let viewport = app.views.get(mode).viewport();
            assert_eq!(viewport.width, 100);
            assert_eq!(viewport.height, 30 - CHROME_ROWS);
        }
    }

    #[test]
    fn tick_refreshes_debug_info() {
        let mut app = sized_app();
        let now = Local.with_ymd_and_hms(2024, 5, 1, 9, 5, 7).unwrap();
        app.update(Action::Tick(now));
        assert_eq!(app.debug_info, "Last update: 09:05:07 | Token: gho_...cdef");
        assert_eq!(app.mode, ViewMode::OwnerSelection);
    }

    #[test]
    fn debug_toggles() {
        let mut app = sized_app();
        app.update(Action::ToggleDebug);
        assert!(app.debug);
        app.update(Action::ToggleDebug);
        assert!(!app.debug);
    }

    #[test]
    fn navigation_moves_only_active_view() {
        let mut app = loaded_app(&["a/x", "b/x", "c/x"]);
        app.update(Action::Navigate(Nav::Down));
        assert_eq!(app.views.owners.selected(), Some("b"));
        assert_eq!(app.views.repos.pager().cursor(), 0);
    }
}
