use super::utils::{centered_rect, truncate};
use super::*;

pub fn render_add_task_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 5, frame.area());
    frame.render_widget(Clear, area);

    let (before, after) = app.new_task_input.split_at_cursor();
    let title = match app.new_task_group() {
        Some(_) => format!(" New task in {} ", app.scope_label()),
        None => " New task ".to_string(),
    };
    let input = Paragraph::new(format!("{}█{}", before, after))
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(title)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(input, area);
}

pub fn render_delete_confirm_dialog(frame: &mut Frame, app: &App) {
    let label = app
        .pending_delete
        .and_then(|id| app.tasks.iter().find(|t| t.id == Some(id)))
        .map(|t| truncate(&t.text, 44))
        .unwrap_or_default();

    let area = centered_rect(52, 8, frame.area());
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(label, Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y] Yes", Style::default().fg(Color::Red)),
            Span::raw("    "),
            Span::styled("[n] No", Style::default().fg(Color::White)),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Delete Task? ")
                .padding(Padding::horizontal(1)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
