pub mod theme;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, Status};

use theme::icons;

pub const APP_TITLE: &str = "GitHub PR Dashboard";

/// Rows outside the list body: title, status, gap, help and the debug line.
pub const CHROME_ROWS: u16 = 5;

pub fn render(frame: &mut Frame, app: &App) {
    if app.width == 0 || app.height == 0 {
        frame.render_widget(Paragraph::new("Loading..."), frame.area());
        return;
    }

    let mut constraints = vec![
        Constraint::Length(1), // title
        Constraint::Length(1), // status
        Constraint::Length(1),
        Constraint::Min(0),    // list
        Constraint::Length(1), // help
    ];
    if app.debug {
        constraints.push(Constraint::Length(1));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    frame.render_widget(
        Paragraph::new(Line::styled(APP_TITLE, theme::TITLE)),
        chunks[0],
    );
    frame.render_widget(Paragraph::new(status_line(app)), chunks[1]);
    render_body(frame, app, chunks[3]);
    frame.render_widget(
        Paragraph::new(Line::styled(theme::HELP_TEXT, theme::HELP)),
        chunks[4],
    );

    if app.debug {
        frame.render_widget(
            Paragraph::new(Line::styled(
                format!("Debug: {}", app.debug_info),
                theme::DEBUG,
            )),
            chunks[5],
        );
    }
}

fn status_line(app: &App) -> Line<'static> {
    match app.status() {
        Status::Loading(text) => {
            Line::styled(format!("{} {}", icons::LOADING, text), theme::WARNING)
        }
        Status::Error(text) => {
            Line::styled(format!("{} Error: {}", icons::ERROR, text), theme::ERROR)
        }
        Status::Ready(text) => Line::styled(format!("{} {}", icons::SUCCESS, text), theme::SUCCESS),
    }
}

fn render_body(frame: &mut Frame, app: &App, area: Rect) {
    let lines = app.views.get(app.mode).render();
    frame.render_widget(Paragraph::new(lines), area);
}
