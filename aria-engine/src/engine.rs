//! The run-timeline engine
//!
//! [`ResearchEngine`] owns the one-and-only [`RunState`] behind a watch
//! channel: every mutation is committed and published atomically through
//! the sender, and renderers hold receivers. Each run gets a fresh epoch
//! (`run_seq`); timed commits carry the epoch they were scheduled under
//! and are dropped inside the commit critical section if it no longer
//! matches. Cancellation therefore holds even if an aborted timer's wakeup
//! races the abort: cancel, then reset, then start.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Local;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

use crate::script::{research_script, ScriptBeat};
use crate::tools::ToolId;
use crate::types::{RunState, StepPayload, StepRecord, TaskStatus};

/// Engine timing knobs
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Multiplier applied to every scripted delay and the flash window
    pub time_scale: f64,
    /// How long a tool stays highlighted after an invocation
    pub flash_duration: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            flash_duration: Duration::from_millis(1000),
        }
    }
}

struct EngineInner {
    handle: Handle,
    state: watch::Sender<RunState>,
    /// Outstanding timers of the current run; aborted on start/reset
    tasks: Mutex<Vec<JoinHandle<()>>>,
    config: EngineConfig,
}

/// Executes one scripted research run at a time against an exclusively
/// owned [`RunState`], publishing every mutation to subscribers
#[derive(Clone)]
pub struct ResearchEngine {
    inner: Arc<EngineInner>,
}

impl ResearchEngine {
    /// Engine with default timing, spawning its timers on `handle`
    pub fn new(handle: Handle) -> Self {
        Self::with_config(handle, EngineConfig::default())
    }

    pub fn with_config(handle: Handle, config: EngineConfig) -> Self {
        let (state, _) = watch::channel(RunState::idle(0));
        Self {
            inner: Arc::new(EngineInner {
                handle,
                state,
                tasks: Mutex::new(Vec::new()),
                config,
            }),
        }
    }

    /// Subscribe to the state-change feed; the receiver always holds the
    /// latest published snapshot
    pub fn subscribe(&self) -> watch::Receiver<RunState> {
        self.inner.state.subscribe()
    }

    /// Current state snapshot
    pub fn snapshot(&self) -> RunState {
        self.inner.state.borrow().clone()
    }

    /// Deploy a run for `query`. A blank query is a silent no-op. A run
    /// already in progress is cancelled and its state discarded before the
    /// new run starts.
    pub fn start(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            debug!("ignoring deploy with blank query");
            return;
        }

        self.inner.cancel_outstanding();
        let mut run_seq = 0;
        self.inner.state.send_modify(|state| {
            *state = RunState::deployed(state.run_seq + 1, query.to_string());
            run_seq = state.run_seq;
        });
        info!(run_seq, query, "research run deployed");

        let inner = Arc::clone(&self.inner);
        let driver = self.inner.handle.spawn(drive(inner, run_seq));
        self.inner.tasks.lock().unwrap().push(driver);
    }

    /// Cancel any run in progress and restore empty defaults. Safe to call
    /// at any time; repeated resets are equivalent to one.
    pub fn reset(&self) {
        self.inner.cancel_outstanding();
        self.inner
            .state
            .send_modify(|state| *state = RunState::idle(state.run_seq + 1));
        debug!("run state reset");
    }
}

/// Walks the script: sleep, commit, repeat. Stops as soon as a commit is
/// refused, which means this run was superseded.
async fn drive(inner: Arc<EngineInner>, run_seq: u64) {
    for beat in research_script() {
        tokio::time::sleep(inner.scaled(beat.delay)).await;
        if !inner.commit_beat(run_seq, &beat) {
            debug!(run_seq, "run superseded, driver stopping");
            return;
        }
        if invoked_tool(&beat.payload).is_some() {
            inner.spawn_flash_clear(run_seq);
        }
    }
    info!(run_seq, "research run complete");
}

/// Tool a beat invokes, if any
fn invoked_tool(payload: &StepPayload) -> Option<ToolId> {
    match payload {
        StepPayload::Search { tool, .. } => Some(*tool),
        StepPayload::Synthesize { .. } => Some(ToolId::Synthesizer),
        _ => None,
    }
}

impl EngineInner {
    fn scaled(&self, delay: Duration) -> Duration {
        Duration::from_secs_f64(delay.as_secs_f64() * self.config.time_scale.max(0.0))
    }

    fn cancel_outstanding(&self) {
        for task in self.tasks.lock().unwrap().drain(..) {
            task.abort();
        }
    }

    /// Apply one beat's effects. Returns false without mutating anything
    /// if the state no longer belongs to `run_seq`.
    fn commit_beat(&self, run_seq: u64, beat: &ScriptBeat) -> bool {
        let committed = self.state.send_if_modified(|state| {
            if state.run_seq != run_seq || !state.running {
                return false;
            }
            let now = Local::now();

            if let Some(confidence) = beat.set_confidence {
                state.confidence = confidence;
            }
            if let Some(advance) = beat.advance {
                for task in &mut state.plan {
                    if task.id == advance.complete {
                        task.status = TaskStatus::Complete;
                    } else if Some(task.id) == advance.activate {
                        task.status = TaskStatus::Active;
                    }
                }
            }

            match &beat.payload {
                StepPayload::Plan { tasks } => {
                    state.plan = tasks.clone();
                }
                StepPayload::Search { tool, .. } => {
                    state.stats.searches += 1;
                    state.sources.extend(beat.sources.iter().cloned());
                    invoke(state, *tool, now);
                }
                StepPayload::Evaluate { confidence, .. } => {
                    state.confidence = *confidence;
                    state.stats.iterations += 1;
                }
                StepPayload::Synthesize { .. } => {
                    invoke(state, ToolId::Synthesizer, now);
                }
                StepPayload::Final(result) => {
                    state.confidence = result.confidence;
                    for task in &mut state.plan {
                        task.status = TaskStatus::Complete;
                    }
                    state.final_result = Some(result.clone());
                    state.running = false;
                }
            }

            state.log.push(StepRecord {
                thinking: beat.thinking.clone(),
                action: beat.action.clone(),
                payload: beat.payload.clone(),
                occurred_at: now,
            });
            state.stats.steps += 1;
            true
        });

        if committed {
            info!(run_seq, kind = beat.payload.kind().label(), "step committed");
        }
        committed
    }

    /// Arm the auto-clear for a tool flash. The timer checks the run epoch
    /// before touching anything, so a flash armed by a superseded run can
    /// never un-flag the successor's tools.
    fn spawn_flash_clear(self: &Arc<Self>, run_seq: u64) {
        let flash = self.scaled(self.config.flash_duration);
        let inner = Arc::clone(self);
        let handle = self.handle.spawn(async move {
            tokio::time::sleep(flash).await;
            let cleared = inner.state.send_if_modified(|state| {
                if state.run_seq != run_seq {
                    return false;
                }
                let mut any = false;
                for usage in &mut state.tools {
                    if usage.flashing {
                        usage.flashing = false;
                        any = true;
                    }
                }
                any
            });
            if !cleared {
                trace!(run_seq, "stale flash timer suppressed");
            }
        });
        self.tasks.lock().unwrap().push(handle);
    }
}

/// Record a simulated tool invocation: bump its count, stamp it, flash it,
/// and unflash everything else
fn invoke(state: &mut RunState, tool: ToolId, now: chrono::DateTime<Local>) {
    for usage in &mut state.tools {
        if usage.tool == tool {
            usage.invocations += 1;
            usage.last_invoked_at = Some(now);
            usage.flashing = true;
        } else {
            usage.flashing = false;
        }
    }
}
