use super::*;
use crate::sync::FieldPhase;
use ratatui::widgets::{List, ListItem, ListState};
use synco_api::domain::Task;

pub fn render_task_list(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(" {} ({}) ", app.scope_label(), app.tasks.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1));

    if app.tasks.is_empty() {
        let hint = if app.is_loading {
            "Loading..."
        } else {
            "No tasks here. Press a to add one."
        };
        let empty = Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray)))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let spinner = throbber_widgets_tui::Throbber::default()
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .to_symbol_span(&app.throbber_state);

    let items: Vec<ListItem> = app
        .tasks
        .iter()
        .map(|task| ListItem::new(task_line(app, task, &spinner)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(app.focused_index);
    frame.render_stateful_widget(list, area, &mut state);
}

/// One row: checkbox, text (or the edit buffer), sync marker, group tag.
fn task_line<'a>(app: &'a App, task: &'a Task, spinner: &Span<'a>) -> Line<'a> {
    let phase = task
        .id
        .map(|id| app.sync.phase(id))
        .unwrap_or(FieldPhase::Display);

    let checkbox = if task.completed { "[x] " } else { "[ ] " };
    let mut spans = vec![Span::styled(
        checkbox,
        Style::default().fg(if task.completed {
            Color::Green
        } else {
            Color::White
        }),
    )];

    let editing = task
        .id
        .and_then(|id| app.sync.session(id))
        .filter(|_| phase == FieldPhase::Editing);

    match editing {
        Some(session) => {
            let buffer = &session.buffer;
            let style = if buffer.selected {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default().fg(Color::Yellow)
            };
            let (before, after) = buffer.split_at_cursor();
            spans.push(Span::styled(before, style));
            spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
            spans.push(Span::styled(after, style));
        }
        None => {
            let style = if task.completed {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(Color::White)
            };
            spans.push(Span::styled(app.sync.displayed_text(task), style));
        }
    }

    if phase == FieldPhase::Committing {
        spans.push(Span::raw(" "));
        spans.push(spinner.clone());
    }

    if let Some(group) = app.group_name(task) {
        spans.push(Span::styled(
            format!("  #{}", group),
            Style::default().fg(Color::Cyan),
        ));
    }

    Line::from(spans)
}
