use crate::app::{App, SessionStatus, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};

mod dialogs;
mod task_list;
pub(super) mod utils;

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, root[0], app);
    task_list::render_task_list(frame, root[1], app);
    render_status_line(frame, root[2], app);
    render_help_line(frame, root[3], app);

    match app.current_view {
        View::Tasks => {}
        View::AddTask => dialogs::render_add_task_dialog(frame, app),
        View::ConfirmDelete => dialogs::render_delete_confirm_dialog(frame, app),
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &mut App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let throbber = throbber_widgets_tui::Throbber::default()
        .style(Style::default().fg(Color::Yellow))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if app.is_loading {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    frame.render_stateful_widget(throbber, cols[0], &mut app.throbber_state);

    let mut spans = vec![
        Span::styled(
            "synco",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.scope_label(), Style::default().fg(Color::White)),
    ];
    if app.dev_mode {
        spans.push(Span::styled("  [dev]", Style::default().fg(Color::Magenta)));
    }
    if app.session_status == SessionStatus::SignedOut {
        spans.push(Span::styled(
            "  [signed out]",
            Style::default().fg(Color::Red),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), cols[1]);
}

fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status_message {
        Some(message) => Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Red),
        )),
        None if app.session_status == SessionStatus::SignedOut => Line::from(Span::styled(
            "Signed out. Run `synco login` to continue.",
            Style::default().fg(Color::Red),
        )),
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn help_span(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(Color::Yellow)),
        Span::styled(label, Style::default().fg(Color::DarkGray)),
    ]
}

fn render_help_line(frame: &mut Frame, area: Rect, app: &App) {
    let entries: &[(&'static str, &'static str)] = if app.editing_task_id().is_some() {
        &[
            ("Enter/Esc", ": Save  "),
            ("↑/↓", ": Save and move  "),
            ("Ctrl+Q", ": Save and quit"),
        ]
    } else {
        &[
            ("j/k", ": Move  "),
            ("e", ": Edit  "),
            ("a", ": Add  "),
            ("Space", ": Done  "),
            ("d", ": Delete  "),
            ("g", ": Scope  "),
            ("r", ": Reload  "),
            ("q", ": Quit"),
        ]
    };
    let spans: Vec<Span> = entries
        .iter()
        .flat_map(|&(key, label)| help_span(key, label))
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
