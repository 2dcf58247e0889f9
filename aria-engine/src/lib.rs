//! Engine crate for the ARIA console
//!
//! Everything here is headless and renderer-agnostic: the scripted
//! run-timeline engine, the run data model, the fixed tool registry, and
//! the typewriter reveal primitive. The terminal dashboard in the `aria`
//! crate is just one subscriber of [`ResearchEngine`]'s state feed.

pub mod engine;
pub mod script;
pub mod tools;
pub mod types;
pub mod typewriter;

pub use engine::{EngineConfig, ResearchEngine};
pub use tools::ToolId;
pub use types::{
    FinalResult, Priority, Reliability, RunState, RunStats, Source, StepKind, StepPayload,
    StepRecord, Task, TaskStatus, ToolUsage,
};
pub use typewriter::Typewriter;
