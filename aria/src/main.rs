//! ARIA — Autonomous Research Intelligence Agent console
//!
//! A terminal dashboard that replays a scripted research run: plan
//! checklist, thinking log stream, tool activity, confidence tracking,
//! discovered sources, and a final dossier. The run itself is driven by
//! `aria-engine`; this binary only renders its state feed and forwards
//! start/reset commands.

mod app;
mod dossier;
mod ui;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use aria_engine::{EngineConfig, ResearchEngine};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use crate::app::App;

#[derive(Parser, Debug)]
#[command(name = "aria", about = "Autonomous research agent replay console")]
struct Args {
    /// Pre-fill the query input bar
    #[arg(long)]
    query: Option<String>,

    /// Multiplier applied to every scripted delay (0.1 = ten times faster)
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,

    /// Append tracing output to this file (the TUI owns stdout)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_tracing(path)?;
    }

    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    let engine = ResearchEngine::with_config(
        runtime.handle().clone(),
        EngineConfig {
            time_scale: args.time_scale,
            ..Default::default()
        },
    );

    let mut app = App::new(engine);
    if let Some(query) = args.query {
        app.input = query;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.on_tick();

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if key.modifiers.contains(KeyModifiers::CONTROL) {
                        match key.code {
                            KeyCode::Char('c') | KeyCode::Char('q') => app.should_quit = true,
                            KeyCode::Char('r') => app.reset_run(),
                            KeyCode::Char('s') => app.save_dossier(),
                            _ => {}
                        }
                    } else {
                        match key.code {
                            KeyCode::Enter => app.deploy(),
                            KeyCode::Tab => app.cycle_quick_query(),
                            KeyCode::Backspace => app.backspace(),
                            KeyCode::Up => app.scroll_up(1),
                            KeyCode::Down => app.scroll_down(1),
                            KeyCode::PageUp => app.scroll_up(10),
                            KeyCode::PageDown => app.scroll_down(10),
                            KeyCode::End => app.scroll_to_end(),
                            KeyCode::Char(c) => app.push_char(c),
                            _ => {}
                        }
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
