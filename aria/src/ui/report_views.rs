//! Right column: confidence gauge, discovered sources, final dossier

use aria_engine::Reliability;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, ToastLevel};

fn panel_block(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
}

fn confidence_color(value: u8) -> Color {
    if value < 40 {
        Color::Red
    } else if value < 70 {
        Color::Yellow
    } else {
        Color::Green
    }
}

pub fn render_confidence(f: &mut Frame, area: Rect, app: &App) {
    let value = app.state.confidence.min(100);
    let gauge = Gauge::default()
        .block(panel_block(" [ CONFIDENCE TRACKER ] ", Color::Cyan))
        .gauge_style(Style::default().fg(confidence_color(value)))
        .percent(u16::from(value))
        .label(Span::styled(
            format!("{value}% confidence"),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(gauge, area);
}

fn reliability_style(reliability: Reliability) -> Style {
    match reliability {
        Reliability::High => Style::default().fg(Color::Green),
        Reliability::Medium => Style::default().fg(Color::Yellow),
        Reliability::Low => Style::default().fg(Color::Red),
    }
}

pub fn render_sources(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = if app.state.sources.is_empty() {
        vec![ListItem::new(Span::styled(
            "No sources indexed yet.",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))]
    } else {
        app.state
            .sources
            .iter()
            .map(|source| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(
                            source.domain.clone(),
                            Style::default()
                                .fg(Color::Gray)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::raw("  "),
                        Span::styled(
                            source.reliability.label(),
                            reliability_style(source.reliability),
                        ),
                    ]),
                    Line::from(Span::styled(
                        format!("\"{}\"", source.snippet),
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::ITALIC),
                    )),
                ])
            })
            .collect()
    };

    f.render_widget(
        List::new(items).block(panel_block(" [ SOURCES FOUND ] ", Color::Cyan)),
        area,
    );
}

pub fn render_final(f: &mut Frame, area: Rect, app: &App) {
    let Some(result) = &app.state.final_result else {
        return;
    };

    // The answer types itself out, same as each step's thinking text.
    let reveal = app.answer_reveal();
    let visible = reveal.map(|tw| tw.visible()).unwrap_or(result.answer.as_str());
    let done = reveal.map(|tw| tw.is_complete()).unwrap_or(true);
    let mut answer = visible.to_string();
    if !done {
        answer.push('▌');
    }

    let mut lines = vec![Line::from(Span::styled(
        answer,
        Style::default().fg(Color::Gray),
    ))];
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Caveats:",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    for caveat in &result.caveats {
        lines.push(Line::from(Span::styled(
            format!("• {caveat}"),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(Span::styled(
        "[Ctrl+S] Export dossier",
        Style::default().fg(Color::Red),
    )));

    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel_block(" [ RESEARCH COMPLETE ] ", Color::Red));
    f.render_widget(card, area);
}

/// Bottom-right overlay for the current toast, if any
pub fn render_toast(f: &mut Frame, app: &App) {
    let Some(toast) = &app.toast else {
        return;
    };

    let frame_area = f.area();
    let width = (toast.message.chars().count() as u16 + 4)
        .min(frame_area.width.saturating_sub(2));
    // Clamp to the frame: on a very short terminal the anchored rect
    // would otherwise spill past the buffer.
    let area = Rect {
        x: frame_area.width.saturating_sub(width + 1),
        y: frame_area.height.saturating_sub(6),
        width,
        height: 3,
    }
    .intersection(frame_area);
    if area.width == 0 || area.height == 0 {
        return;
    }

    let color = match toast.level {
        ToastLevel::Success => Color::Green,
        ToastLevel::Error => Color::Red,
    };
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(Span::styled(
            toast.message.clone(),
            Style::default().fg(color),
        ))
        .centered()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        ),
        area,
    );
}
