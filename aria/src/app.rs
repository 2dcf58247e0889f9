//! Console view state
//!
//! [`App`] is a read-only subscriber of the engine's state feed plus the
//! view concerns the engine doesn't know about: the input buffer, log
//! scrolling, per-entry typewriters, and the toast. Every frame tick pulls
//! the latest [`RunState`] snapshot and advances the reveal effects.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use aria_engine::{ResearchEngine, RunState, Typewriter};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::dossier;

/// The original dashboard's example queries, cycled into the input with Tab
pub const QUICK_QUERIES: [&str; 3] = [
    "Impact of AGI on global employment",
    "Is cold fusion scientifically viable?",
    "Geopolitical consequences of de-dollarization",
];

/// Reveal cadence for step thinking text
const THINKING_REVEAL: Duration = Duration::from_millis(30);
/// Reveal cadence for the final answer
const ANSWER_REVEAL: Duration = Duration::from_millis(20);
/// How long a toast stays on screen
const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

/// Single auto-expiring feedback message
#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    created: Instant,
}

impl Toast {
    pub(crate) fn new(level: ToastLevel, message: String) -> Self {
        Self {
            level,
            message,
            created: Instant::now(),
        }
    }
}

pub struct App {
    pub engine: ResearchEngine,
    state_rx: watch::Receiver<RunState>,
    /// Latest published snapshot; refreshed once per frame tick
    pub state: RunState,

    // Query input
    pub input: String,
    next_quick_query: usize,

    // Log stream scrolling, measured in lines up from the tail.
    // Zero means follow mode: the view pins to the newest entry.
    pub log_scroll_from_bottom: usize,
    /// Scroll ceiling for the current log, recorded by the log renderer
    pub log_max_scroll: usize,

    // Reveal effects, one per log entry plus one for the final answer
    thinking: HashMap<usize, Typewriter>,
    answer: Option<Typewriter>,

    pub toast: Option<Toast>,
    pub should_quit: bool,
}

impl App {
    pub fn new(engine: ResearchEngine) -> Self {
        let state_rx = engine.subscribe();
        let state = engine.snapshot();
        Self {
            engine,
            state_rx,
            state,
            input: String::new(),
            next_quick_query: 0,
            log_scroll_from_bottom: 0,
            log_max_scroll: 0,
            thinking: HashMap::new(),
            answer: None,
            toast: None,
            should_quit: false,
        }
    }

    /// Per-frame update: pull the latest snapshot, rearm typewriters for
    /// new content, advance reveals, expire the toast
    pub fn on_tick(&mut self) {
        if self.state_rx.has_changed().unwrap_or(false) {
            let fresh = self.state_rx.borrow_and_update().clone();
            if fresh.run_seq != self.state.run_seq {
                // New run or reset: stale reveals must not replay.
                self.thinking.clear();
                self.answer = None;
                self.log_scroll_from_bottom = 0;
            }
            self.state = fresh;
        }

        for (idx, record) in self.state.log.iter().enumerate() {
            self.thinking
                .entry(idx)
                .or_insert_with(|| Typewriter::new(THINKING_REVEAL))
                .observe(&record.thinking);
        }
        if let Some(result) = &self.state.final_result {
            self.answer
                .get_or_insert_with(|| Typewriter::new(ANSWER_REVEAL))
                .observe(&result.answer);
        }

        let now = Instant::now();
        for tw in self.thinking.values_mut() {
            tw.advance(now);
        }
        if let Some(tw) = &mut self.answer {
            tw.advance(now);
        }

        if let Some(toast) = &self.toast {
            if toast.created.elapsed() > TOAST_TTL {
                self.toast = None;
            }
        }
    }

    /// Thinking reveal for log entry `idx`, if one has been armed
    pub fn thinking_reveal(&self, idx: usize) -> Option<&Typewriter> {
        self.thinking.get(&idx)
    }

    pub fn answer_reveal(&self) -> Option<&Typewriter> {
        self.answer.as_ref()
    }

    /// Deploy the current input. The engine ignores blank queries, so an
    /// empty input bar is simply a dead Enter key.
    pub fn deploy(&mut self) {
        if self.state.running {
            return;
        }
        self.engine.start(&self.input);
        self.log_scroll_from_bottom = 0;
    }

    pub fn reset_run(&mut self) {
        self.engine.reset();
        self.log_scroll_from_bottom = 0;
    }

    pub fn push_char(&mut self, c: char) {
        if !self.state.running {
            self.input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if !self.state.running {
            self.input.pop();
        }
    }

    /// Rotate the next example query into the input bar
    pub fn cycle_quick_query(&mut self) {
        if self.state.running {
            return;
        }
        self.input = QUICK_QUERIES[self.next_quick_query].to_string();
        self.next_quick_query = (self.next_quick_query + 1) % QUICK_QUERIES.len();
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.log_scroll_from_bottom =
            (self.log_scroll_from_bottom + lines).min(self.log_max_scroll);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.log_scroll_from_bottom = self.log_scroll_from_bottom.saturating_sub(lines);
    }

    /// Jump back to the tail and re-enable follow mode
    pub fn scroll_to_end(&mut self) {
        self.log_scroll_from_bottom = 0;
    }

    /// Write the final dossier to disk, surfacing the outcome as a toast
    pub fn save_dossier(&mut self) {
        let toast = match dossier::export(&self.state) {
            Ok(path) => {
                info!(path = %path.display(), "dossier exported");
                Toast::new(
                    ToastLevel::Success,
                    format!("Dossier saved to {}", path.display()),
                )
            }
            Err(err) => {
                warn!(error = %err, "dossier export failed");
                Toast::new(ToastLevel::Error, format!("Export failed: {err}"))
            }
        };
        self.toast = Some(toast);
    }

    /// Session clock as mm:ss. Counts while the run is live, freezes on
    /// the final step, reads 00:00 when idle.
    pub fn elapsed(&self) -> String {
        let Some(started) = self.state.stats.started_at else {
            return "00:00".to_string();
        };
        let end = if self.state.running {
            chrono::Local::now()
        } else {
            self.state
                .log
                .last()
                .map(|r| r.occurred_at)
                .unwrap_or(started)
        };
        let secs = (end - started).num_seconds().max(0);
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aria_engine::ResearchEngine;

    fn app() -> (tokio::runtime::Runtime, App) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let engine = ResearchEngine::new(runtime.handle().clone());
        let app = App::new(engine);
        (runtime, app)
    }

    #[test]
    fn quick_queries_cycle_in_order() {
        let (_rt, mut app) = app();
        app.cycle_quick_query();
        assert_eq!(app.input, QUICK_QUERIES[0]);
        app.cycle_quick_query();
        assert_eq!(app.input, QUICK_QUERIES[1]);
        app.cycle_quick_query();
        assert_eq!(app.input, QUICK_QUERIES[2]);
        app.cycle_quick_query();
        assert_eq!(app.input, QUICK_QUERIES[0]);
    }

    #[test]
    fn scroll_clamps_to_recorded_ceiling() {
        let (_rt, mut app) = app();
        app.log_max_scroll = 5;
        app.scroll_up(3);
        assert_eq!(app.log_scroll_from_bottom, 3);
        app.scroll_up(10);
        assert_eq!(app.log_scroll_from_bottom, 5);
        app.scroll_down(2);
        assert_eq!(app.log_scroll_from_bottom, 3);
        app.scroll_to_end();
        assert_eq!(app.log_scroll_from_bottom, 0);
    }

    #[test]
    fn idle_elapsed_reads_zero() {
        let (_rt, app) = app();
        assert_eq!(app.elapsed(), "00:00");
    }

    #[test]
    fn export_without_final_result_raises_error_toast() {
        let (_rt, mut app) = app();
        app.save_dossier();
        let toast = app.toast.expect("toast raised");
        assert_eq!(toast.level, ToastLevel::Error);
        assert!(toast.message.starts_with("Export failed"));
    }
}
