//! Header bar and query input footer

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, QUICK_QUERIES};

pub fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let session = app
        .state
        .run_id
        .map(|id| id.to_string()[..8].to_string())
        .unwrap_or_else(|| "--------".to_string());

    let (status, status_style) = if app.state.running {
        ("● RUNNING", Style::default().fg(Color::Green))
    } else if app.state.final_result.is_some() {
        ("● DONE", Style::default().fg(Color::Cyan))
    } else {
        ("○ IDLE", Style::default().fg(Color::DarkGray))
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "ARIA",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " — Autonomous Research Intelligence Agent",
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("    "),
        Span::styled("MODEL ", Style::default().fg(Color::DarkGray)),
        Span::styled("GEMINI-3.1-PRO", Style::default().fg(Color::Cyan)),
        Span::raw("    "),
        Span::styled("SESSION ", Style::default().fg(Color::DarkGray)),
        Span::styled(session, Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(app.elapsed(), Style::default().fg(Color::Cyan)),
        Span::raw("    "),
        Span::styled(status, status_style),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

pub fn render_input_bar(f: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let (text, style) = if app.state.running {
        (
            Line::from(Span::styled(
                "AGENT RUNNING...",
                Style::default().fg(Color::DarkGray),
            )),
            Style::default().fg(Color::DarkGray),
        )
    } else if app.input.is_empty() {
        (
            Line::from(Span::styled(
                "Enter your research query...",
                Style::default().fg(Color::DarkGray),
            )),
            Style::default(),
        )
    } else {
        (
            Line::from(vec![
                Span::raw(app.input.clone()),
                Span::styled("█", Style::default().fg(Color::Cyan)),
            ]),
            Style::default(),
        )
    };
    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Research Query "),
    );
    f.render_widget(input, rows[0]);

    let mut quick: Vec<Span> = vec![Span::styled(
        " Quick queries: ",
        Style::default().fg(Color::DarkGray),
    )];
    for (i, q) in QUICK_QUERIES.iter().enumerate() {
        if i > 0 {
            quick.push(Span::styled("  /  ", Style::default().fg(Color::DarkGray)));
        }
        quick.push(Span::styled(*q, Style::default().fg(Color::Gray)));
    }
    f.render_widget(Paragraph::new(Line::from(quick)), rows[1]);

    let hints = Line::from(vec![
        Span::styled(" [Enter]", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" Deploy  "),
        Span::styled("[Tab]", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" Quick query  "),
        Span::styled("[Ctrl+R]", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" Reset  "),
        Span::styled("[Ctrl+S]", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" Export dossier  "),
        Span::styled("[↑↓]", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" Scroll  "),
        Span::styled("[Ctrl+Q]", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" Quit"),
    ]);
    f.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        rows[2],
    );
}
