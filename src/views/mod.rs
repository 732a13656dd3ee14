//! Paginated single-column list views.
//!
//! Every view owns its items and a [`Paginator`]; the behaviour they share (navigation,
//! page info, rendering the visible slice) lives in default methods on [`ListView`], and
//! each view only supplies its item count, label and row text.

mod owner_list;
mod pr_list;
mod repo_list;

use std::ops::Range;

use ratatui::text::Line;

use crate::action::Nav;
use crate::app::ViewMode;
use crate::pagination::Paginator;
use crate::ui::theme;

pub use owner_list::OwnerList;
pub use pr_list::PullRequestList;
pub use repo_list::RepoList;

/// Area available to a view's rows. Zero width means no size yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

pub trait ListView {
    /// Plural noun used in page info, e.g. "repositories".
    fn label(&self) -> &'static str;
    fn len(&self) -> usize;
    fn pager(&self) -> &Paginator;
    fn pager_mut(&mut self) -> &mut Paginator;
    fn viewport(&self) -> Viewport;
    fn set_size(&mut self, width: u16, height: u16);
    /// Row text for the item at absolute `index`, without cursor marker.
    fn row_text(&self, index: usize) -> String;

    fn visible_range(&self) -> Range<usize> {
        self.pager().visible_range(self.len())
    }

    /// Absolute index of the highlighted item, if the cursor points at one.
    fn selected_index(&self) -> Option<usize> {
        let range = self.visible_range();
        let index = range.start + self.pager().cursor();
        range.contains(&index).then_some(index)
    }

    /// Apply a navigation key. Returns false when nothing moved.
    fn handle_nav(&mut self, nav: Nav) -> bool {
        let len = self.len();
        let visible = self.visible_range().len();
        let pager = self.pager_mut();
        let before = *pager;
        match nav {
            Nav::Up => pager.move_cursor_up(),
            Nav::Down => pager.move_cursor_down(visible),
            Nav::PreviousPage => {
                pager.previous_page();
            }
            Nav::NextPage => {
                pager.next_page(len);
            }
            Nav::FirstPage => {
                pager.first_page();
            }
            Nav::LastPage => {
                pager.last_page(len);
            }
        }
        *pager != before
    }

    fn page_info(&self) -> String {
        self.pager().page_info(self.len(), self.label())
    }

    fn render(&self) -> Vec<Line<'static>> {
        if self.viewport().width == 0 {
            return vec![Line::raw("Loading...")];
        }
        self.render_rows(usize::from(self.viewport().height))
    }

    /// One line per visible item, the cursor row highlighted. At most `budget` rows are
    /// returned, scrolled so the cursor row is always among them.
    fn render_rows(&self, budget: usize) -> Vec<Line<'static>> {
        let budget = budget.max(1);
        let cursor = self.pager().cursor();
        let skip = (cursor + 1).saturating_sub(budget);
        self.visible_range()
            .enumerate()
            .skip(skip)
            .take(budget)
            .map(|(row, index)| {
                let text = self.row_text(index);
                if row == cursor {
                    Line::styled(format!("  > {}", text), theme::SELECTED)
                } else {
                    Line::raw(format!("    {}", text))
                }
            })
            .collect()
    }
}

/// The three list views, addressed by view mode.
#[derive(Debug)]
pub struct ViewRegistry {
    pub owners: OwnerList,
    pub repos: RepoList,
    pub pulls: PullRequestList,
}

impl ViewRegistry {
    pub fn new(page_size: usize) -> Self {
        Self {
            owners: OwnerList::new(page_size),
            repos: RepoList::new(page_size),
            pulls: PullRequestList::new(page_size),
        }
    }

    pub fn get(&self, mode: ViewMode) -> &dyn ListView {
        match mode {
            ViewMode::OwnerSelection => &self.owners,
            ViewMode::RepoSelection => &self.repos,
            ViewMode::PrList => &self.pulls,
        }
    }

    pub fn get_mut(&mut self, mode: ViewMode) -> &mut dyn ListView {
        match mode {
            ViewMode::OwnerSelection => &mut self.owners,
            ViewMode::RepoSelection => &mut self.repos,
            ViewMode::PrList => &mut self.pulls,
        }
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        for mode in ViewMode::ALL {
            self.get_mut(mode).set_size(width, height);
        }
    }
}
