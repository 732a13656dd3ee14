use crate::pagination::Paginator;
use crate::types::repo_short_name;
use crate::ui::theme::icons;

use super::{ListView, Viewport};

/// Repositories of a single owner, as fully-qualified names.
#[derive(Debug)]
pub struct RepoList {
    pager: Paginator,
    viewport: Viewport,
    owner: String,
    repos: Vec<String>,
}

impl RepoList {
    pub fn new(page_size: usize) -> Self {
        Self {
            pager: Paginator::new(page_size),
            viewport: Viewport::default(),
            owner: String::new(),
            repos: Vec::new(),
        }
    }

    pub fn set_data(&mut self, owner: &str, repos: Vec<String>) {
        self.owner = owner.to_string();
        self.repos = repos;
        self.pager.reset();
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected_index()
            .map(|index| self.repos[index].as_str())
    }
}

impl ListView for RepoList {
    fn label(&self) -> &'static str {
        "repositories"
    }

    fn len(&self) -> usize {
        self.repos.len()
    }

    fn pager(&self) -> &Paginator {
        &self.pager
    }

    fn pager_mut(&mut self) -> &mut Paginator {
        &mut self.pager
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_size(&mut self, width: u16, height: u16) {
        self.viewport = Viewport { width, height };
    }

    fn row_text(&self, index: usize) -> String {
        format!(
            "{} {}",
            icons::REPOSITORY,
            repo_short_name(&self.repos[index])
        )
    }
}
