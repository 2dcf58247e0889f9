//! Left column: research plan, tool activity, agent stats

use aria_engine::{Priority, TaskStatus, ToolId};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;

fn panel_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
}

fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::High => Style::default().fg(Color::Red),
        Priority::Med => Style::default().fg(Color::Yellow),
        Priority::Low => Style::default().fg(Color::DarkGray),
    }
}

pub fn render_plan(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = if app.state.plan.is_empty() {
        vec![ListItem::new(Span::styled(
            "No plan initialized. Deploy agent to begin.",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))]
    } else {
        app.state
            .plan
            .iter()
            .map(|task| {
                let (glyph, glyph_style) = match task.status {
                    TaskStatus::Complete => ("✔", Style::default().fg(Color::Green)),
                    TaskStatus::Active => ("●", Style::default().fg(Color::Cyan)),
                    TaskStatus::Pending => ("○", Style::default().fg(Color::DarkGray)),
                };
                let label_style = if task.status == TaskStatus::Complete {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(glyph, glyph_style),
                    Span::raw(" "),
                    Span::styled(task.label.clone(), label_style),
                    Span::raw(" "),
                    Span::styled(task.priority.label(), priority_style(task.priority)),
                ]))
            })
            .collect()
    };

    f.render_widget(
        List::new(items).block(panel_block(" [ RESEARCH PLAN ] ")),
        area,
    );
}

pub fn render_tools(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = ToolId::ALL
        .iter()
        .map(|tool| {
            let usage = app.state.tool_usage(*tool);
            let count = usage.map(|u| u.invocations).unwrap_or(0);
            let last = usage
                .and_then(|u| u.last_invoked_at)
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string());
            let flashing = usage.map(|u| u.flashing).unwrap_or(false);

            let name_style = if flashing {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if count > 0 {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<12}", tool.name()), name_style),
                Span::styled(format!("{count} calls  "), Style::default().fg(Color::Cyan)),
                Span::styled(last, Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    f.render_widget(
        List::new(items).block(panel_block(" [ TOOLS ACTIVATED ] ")),
        area,
    );
}

pub fn render_stats(f: &mut Frame, area: Rect, app: &App) {
    let stats = &app.state.stats;
    let value = Style::default().fg(Color::Cyan);
    let label = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(vec![
            Span::styled("Steps ", label),
            Span::styled(format!("{:<4}", stats.steps), value),
            Span::styled(" Searches ", label),
            Span::styled(stats.searches.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Iters ", label),
            Span::styled(format!("{:<4}", stats.iterations), value),
            Span::styled(" Time     ", label),
            Span::styled(app.elapsed(), value),
        ]),
    ];
    f.render_widget(
        Paragraph::new(lines).block(panel_block(" [ AGENT STATS ] ")),
        area,
    );
}
