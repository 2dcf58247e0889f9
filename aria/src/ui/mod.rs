//! UI rendering for the ARIA console
//!
//! One render function per panel, mirroring the original dashboard's
//! layout: plan/tools/stats on the left, the thinking log stream in the
//! center, confidence/sources/dossier on the right, query input at the
//! bottom.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::App;

mod header_footer;
mod log_view;
mod report_views;
mod side_panels;

use header_footer::{render_header, render_input_bar};
use log_view::render_log;
use report_views::{render_confidence, render_final, render_sources, render_toast};
use side_panels::{render_plan, render_stats, render_tools};

pub fn draw(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(5),
        ])
        .split(f.area());

    render_header(f, rows[0], app);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(45),
            Constraint::Percentage(30),
        ])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(6),
            Constraint::Length(4),
        ])
        .split(cols[0]);
    render_plan(f, left[0], app);
    render_tools(f, left[1], app);
    render_stats(f, left[2], app);

    render_log(f, cols[1], app);

    let right = if app.state.final_result.is_some() {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(6),
                Constraint::Length(11),
            ])
            .split(cols[2])
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(6)])
            .split(cols[2])
    };
    render_confidence(f, right[0], app);
    render_sources(f, right[1], app);
    if app.state.final_result.is_some() {
        render_final(f, right[2], app);
    }

    render_input_bar(f, rows[2], app);

    render_toast(f, app);
}
