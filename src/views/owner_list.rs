use crate::pagination::Paginator;
use crate::types::OwnerGroups;
use crate::ui::theme::icons;

use super::{ListView, Viewport};

#[derive(Debug, Clone, PartialEq, Eq)]
struct OwnerEntry {
    login: String,
    repo_count: usize,
}

/// Owners (accounts and organizations) sorted by login.
#[derive(Debug)]
pub struct OwnerList {
    pager: Paginator,
    viewport: Viewport,
    owners: Vec<OwnerEntry>,
}

impl OwnerList {
    pub fn new(page_size: usize) -> Self {
        Self {
            pager: Paginator::new(page_size),
            viewport: Viewport::default(),
            owners: Vec::new(),
        }
    }

    /// Replace the owner list from freshly grouped repositories. The current page and
    /// cursor are kept where they still point at an owner.
    pub fn set_data(&mut self, groups: &OwnerGroups) {
        let mut owners: Vec<OwnerEntry> = groups
            .iter()
            .map(|(login, repos)| OwnerEntry {
                login: login.clone(),
                repo_count: repos.len(),
            })
            .collect();
        owners.sort_by(|a, b| a.login.cmp(&b.login));
        self.owners = owners;
        self.pager.clamp(self.owners.len());
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected_index()
            .map(|index| self.owners[index].login.as_str())
    }
}

impl ListView for OwnerList {
    fn label(&self) -> &'static str {
        "organizations"
    }

    fn len(&self) -> usize {
        self.owners.len()
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
        let owner = &self.owners[index];
        format!(
            "{} {} ({} repos)",
            icons::ORGANIZATION,
            owner.login,
            owner.repo_count
        )
    }
}
