use ratatui::style::{Color, Modifier, Style};

use crate::types::DisplayStatus;

pub const TITLE: Style = Style::new()
    .fg(Color::Rgb(250, 250, 250))
    .add_modifier(Modifier::BOLD);
pub const SELECTED: Style = Style::new().fg(Color::Rgb(0, 255, 0));
pub const SUCCESS: Style = Style::new().fg(Color::Rgb(0, 255, 0));
pub const WARNING: Style = Style::new().fg(Color::Rgb(255, 255, 0));
pub const ERROR: Style = Style::new().fg(Color::Rgb(255, 0, 0));
pub const HELP: Style = Style::new().fg(Color::Rgb(136, 136, 136));
pub const DEBUG: Style = Style::new()
    .fg(Color::Rgb(102, 102, 102))
    .add_modifier(Modifier::ITALIC);

pub const HELP_TEXT: &str =
    "↑/↓: Navigate • ←/→: Page • g/G: First/Last • Enter: Select • b: Back • d: Debug • r: Reload • q: Quit";

pub mod icons {
    pub const ORGANIZATION: &str = "📁";
    pub const REPOSITORY: &str = "📦";
    pub const OPEN: &str = "🔵";
    pub const DRAFT: &str = "🟡";
    pub const APPROVED: &str = "🟢";
    pub const CHANGES: &str = "🔴";
    pub const LOADING: &str = "🔄";
    pub const ERROR: &str = "❌";
    pub const SUCCESS: &str = "✅";
}

pub fn status_icon(status: DisplayStatus) -> &'static str {
    match status {
        DisplayStatus::Draft => icons::DRAFT,
        DisplayStatus::Approved => icons::APPROVED,
        DisplayStatus::ChangesRequested => icons::CHANGES,
        DisplayStatus::Open => icons::OPEN,
    }
}
