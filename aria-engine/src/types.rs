//! Data structures for a single research run

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tools::ToolId;

/// Discriminant of a log step, used by renderers for tagging and coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    Plan,
    Search,
    Evaluate,
    Synthesize,
    Final,
}

impl StepKind {
    /// Uppercase tag shown on log cards
    pub fn label(&self) -> &'static str {
        match self {
            StepKind::Plan => "PLAN",
            StepKind::Search => "SEARCH",
            StepKind::Evaluate => "EVALUATE",
            StepKind::Synthesize => "SYNTHESIZE",
            StepKind::Final => "FINAL",
        }
    }
}

/// Task priority as assigned by the plan step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Med,
    Low,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Med => "MED",
            Priority::Low => "LOW",
        }
    }
}

/// Lifecycle of a plan task; advanced monotonically by later steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    Active,
    Complete,
}

/// One entry of the research plan checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u8,
    pub label: String,
    pub priority: Priority,
    pub status: TaskStatus,
}

/// Reliability grade attached to a discovered source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reliability {
    High,
    Medium,
    Low,
}

impl Reliability {
    pub fn label(&self) -> &'static str {
        match self {
            Reliability::High => "HIGH",
            Reliability::Medium => "MEDIUM",
            Reliability::Low => "LOW",
        }
    }
}

/// A source discovered during a search step; append-only once added
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub id: u8,
    pub domain: String,
    pub snippet: String,
    pub reliability: Reliability,
}

/// Per-tool invocation tracking; one record per registry tool for the
/// whole run, mutated in place on each invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolUsage {
    pub tool: ToolId,
    pub invocations: u32,
    pub last_invoked_at: Option<DateTime<Local>>,
    /// Transient highlight, auto-cleared shortly after the invocation
    pub flashing: bool,
}

impl ToolUsage {
    fn fresh(tool: ToolId) -> Self {
        Self {
            tool,
            invocations: 0,
            last_invoked_at: None,
            flashing: false,
        }
    }
}

/// Monotonic counters for the current run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub steps: u32,
    pub searches: u32,
    /// Completed search→evaluate cycles
    pub iterations: u32,
    pub started_at: Option<DateTime<Local>>,
}

/// The executive report produced by the final step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalResult {
    pub summary: String,
    pub confidence: u8,
    pub caveats: Vec<String>,
    pub answer: String,
}

/// Kind-specific content of a step; the payload shape is fixed by the
/// variant, so a tag and its data can never disagree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepPayload {
    Plan {
        tasks: Vec<Task>,
    },
    Search {
        query: String,
        tool: ToolId,
        result_count: u32,
    },
    Evaluate {
        confidence: u8,
        gaps: Vec<String>,
    },
    Synthesize {
        sources_processed: u32,
        contradictions_resolved: u32,
        findings: Vec<String>,
    },
    Final(FinalResult),
}

impl StepPayload {
    pub fn kind(&self) -> StepKind {
        match self {
            StepPayload::Plan { .. } => StepKind::Plan,
            StepPayload::Search { .. } => StepKind::Search,
            StepPayload::Evaluate { .. } => StepKind::Evaluate,
            StepPayload::Synthesize { .. } => StepKind::Synthesize,
            StepPayload::Final(_) => StepKind::Final,
        }
    }
}

/// One committed entry of the thinking log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub thinking: String,
    pub action: String,
    pub payload: StepPayload,
    /// Assigned when the step is committed, not when it is scripted
    pub occurred_at: DateTime<Local>,
}

impl StepRecord {
    pub fn kind(&self) -> StepKind {
        self.payload.kind()
    }
}

/// Aggregate state of the console: either no run, one run in progress, or
/// one completed run with its final result. Owned and mutated exclusively
/// by the engine; renderers only read snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// Monotonic run epoch, bumped on every start/reset. Timed commits
    /// carry the epoch they were scheduled under and are dropped when it
    /// no longer matches.
    pub run_seq: u64,
    pub run_id: Option<Uuid>,
    pub query: String,
    pub running: bool,
    pub log: Vec<StepRecord>,
    pub plan: Vec<Task>,
    pub confidence: u8,
    pub sources: Vec<Source>,
    pub tools: Vec<ToolUsage>,
    pub stats: RunStats,
    pub final_result: Option<FinalResult>,
}

impl RunState {
    /// Empty defaults under the given epoch
    pub fn idle(run_seq: u64) -> Self {
        Self {
            run_seq,
            run_id: None,
            query: String::new(),
            running: false,
            log: Vec::new(),
            plan: Vec::new(),
            confidence: 0,
            sources: Vec::new(),
            tools: ToolId::ALL.iter().map(|t| ToolUsage::fresh(*t)).collect(),
            stats: RunStats::default(),
            final_result: None,
        }
    }

    /// Fresh in-progress state for a newly deployed query
    pub fn deployed(run_seq: u64, query: String) -> Self {
        let mut state = Self::idle(run_seq);
        state.run_id = Some(Uuid::new_v4());
        state.query = query;
        state.running = true;
        state.stats.started_at = Some(Local::now());
        state
    }

    /// Usage record for one registry tool
    pub fn tool_usage(&self, tool: ToolId) -> Option<&ToolUsage> {
        self.tools.iter().find(|u| u.tool == tool)
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::idle(0)
    }
}
