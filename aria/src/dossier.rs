//! Final dossier export
//!
//! The terminal stand-in for the original dashboard's copy-to-clipboard
//! action: writes the completed run's report as pretty-printed JSON next
//! to the working directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use aria_engine::{FinalResult, RunState, Source};
use chrono::Local;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
struct Dossier<'a> {
    query: &'a str,
    run_id: Option<Uuid>,
    completed_steps: u32,
    searches: u32,
    confidence: u8,
    sources: &'a [Source],
    report: &'a FinalResult,
}

/// Write the run's final report to `aria-dossier-<timestamp>.json` and
/// return the path. Fails if the run has no final result yet.
pub fn export(state: &RunState) -> Result<PathBuf> {
    let report = state
        .final_result
        .as_ref()
        .context("no completed research run to export")?;

    let dossier = Dossier {
        query: &state.query,
        run_id: state.run_id,
        completed_steps: state.stats.steps,
        searches: state.stats.searches,
        confidence: state.confidence,
        sources: &state.sources,
        report,
    };

    let path = PathBuf::from(format!(
        "aria-dossier-{}.json",
        Local::now().format("%Y%m%d_%H%M%S")
    ));
    let json = serde_json::to_string_pretty(&dossier).context("serializing dossier")?;
    std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
