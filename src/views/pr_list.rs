use chrono::{DateTime, Utc};
use ratatui::text::Line;

use crate::pagination::Paginator;
use crate::types::PullRequest;
use crate::ui::theme;

use super::{ListView, Viewport};

pub const MAX_TITLE_LENGTH: usize = 60;

const ELLIPSIS: &str = "...";

/// Shorten `title` to at most `max` characters, ending in "..." when cut.
pub fn truncate_title(title: &str, max: usize) -> String {
    if title.chars().count() <= max {
        return title.to_string();
    }
    if max <= ELLIPSIS.len() {
        return ELLIPSIS.chars().take(max).collect();
    }
    let mut out: String = title.chars().take(max - ELLIPSIS.len()).collect();
    out.push_str(ELLIPSIS);
    out
}

fn format_age(dt: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(dt);

    if duration.num_days() > 0 {
        format!("{}d", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m", duration.num_minutes())
    } else {
        "now".to_string()
    }
}

/// Summary of the highlighted pull request shown under the list.
fn detail_line(pr: &PullRequest, now: DateTime<Utc>) -> String {
    let mut parts = vec![
        format!("@{}", pr.author),
        pr.state.to_string(),
        format!("review: {}", pr.review_status),
        format!("+{} -{}", pr.additions, pr.deletions),
        format!("{} comments", pr.comments),
        format!("{} commits", pr.commits),
        format!("updated {}", format_age(pr.updated_at, now)),
    ];
    if !pr.labels.is_empty() {
        parts.push(format!("labels: {}", pr.labels.join(", ")));
    }
    if !pr.reviewers.is_empty() {
        parts.push(format!("reviewers: {}", pr.reviewers.join(", ")));
    }
    parts.join(" • ")
}

/// Open pull requests of the selected repository.
#[derive(Debug)]
pub struct PullRequestList {
    pager: Paginator,
    viewport: Viewport,
    repo: String,
    pulls: Vec<PullRequest>,
}

impl PullRequestList {
    pub fn new(page_size: usize) -> Self {
        Self {
            pager: Paginator::new(page_size),
            viewport: Viewport::default(),
            repo: String::new(),
            pulls: Vec::new(),
        }
    }

    pub fn set_data(&mut self, repo: &str, pulls: Vec<PullRequest>) {
        self.repo = repo.to_string();
        self.pulls = pulls;
        self.pager.reset();
    }

    pub fn clear(&mut self) {
        self.set_data("", Vec::new());
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn selected(&self) -> Option<&PullRequest> {
        self.selected_index().map(|index| &self.pulls[index])
    }
}

impl ListView for PullRequestList {
    fn label(&self) -> &'static str {
        "pull requests"
    }

    fn len(&self) -> usize {
        self.pulls.len()
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

    fn render(&self) -> Vec<Line<'static>> {
        if self.viewport.width == 0 {
            return vec![Line::raw("Loading...")];
        }
        // leave room for the blank line and the detail line
        let budget = usize::from(self.viewport.height).saturating_sub(2);
        let mut lines = self.render_rows(budget);
        if let Some(pr) = self.selected() {
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                format!("    {}", detail_line(pr, Utc::now())),
                theme::HELP,
            ));
        }
        lines
    }

    fn row_text(&self, index: usize) -> String {
        let pr = &self.pulls[index];
        format!(
            "{} #{} {}",
            theme::status_icon(pr.display_status()),
            pr.number,
            truncate_title(&pr.title, MAX_TITLE_LENGTH)
        )
    }
}
