//! Integration tests for the run-timeline engine
//!
//! All tests run with paused tokio time, so the multi-second scripted
//! delays elapse deterministically and instantly.

use std::time::Duration;

use aria_engine::{ResearchEngine, RunState, StepKind, TaskStatus, ToolId};
use tokio::runtime::Handle;
use tokio::sync::watch;

fn engine() -> ResearchEngine {
    ResearchEngine::new(Handle::current())
}

/// Await published snapshots until `pred` holds, returning that snapshot
async fn wait_for(
    rx: &mut watch::Receiver<RunState>,
    pred: impl Fn(&RunState) -> bool,
) -> RunState {
    loop {
        {
            let state = rx.borrow_and_update();
            if pred(&state) {
                return state.clone();
            }
        }
        rx.changed().await.expect("engine dropped");
    }
}

fn assert_empty_defaults(state: &RunState) {
    assert!(!state.running);
    assert!(state.run_id.is_none());
    assert!(state.query.is_empty());
    assert!(state.log.is_empty());
    assert!(state.plan.is_empty());
    assert_eq!(state.confidence, 0);
    assert!(state.sources.is_empty());
    assert!(state.final_result.is_none());
    assert_eq!(state.stats.steps, 0);
    assert_eq!(state.stats.searches, 0);
    assert_eq!(state.stats.iterations, 0);
    assert!(state.stats.started_at.is_none());
    for usage in &state.tools {
        assert_eq!(usage.invocations, 0);
        assert!(usage.last_invoked_at.is_none());
        assert!(!usage.flashing);
    }
}

#[tokio::test(start_paused = true)]
async fn full_run_reaches_a_single_final_result() {
    let engine = engine();
    let mut rx = engine.subscribe();

    engine.start("Impact of AGI on global employment");
    let state = wait_for(&mut rx, |s| s.final_result.is_some()).await;

    assert!(!state.running);
    assert_eq!(state.query, "Impact of AGI on global employment");
    assert_eq!(state.log.len(), 8);
    assert_eq!(state.stats.steps, 8);
    assert_eq!(state.stats.searches, 3);
    assert_eq!(state.stats.iterations, 2);
    assert_eq!(state.confidence, 94);

    let kinds: Vec<StepKind> = state.log.iter().map(|r| r.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            StepKind::Plan,
            StepKind::Search,
            StepKind::Evaluate,
            StepKind::Search,
            StepKind::Evaluate,
            StepKind::Search,
            StepKind::Synthesize,
            StepKind::Final,
        ]
    );

    assert_eq!(state.plan.len(), 4);
    assert!(state.plan.iter().all(|t| t.status == TaskStatus::Complete));

    assert_eq!(state.sources.len(), 5);
    let ids: Vec<u8> = state.sources.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    for tool in ToolId::ALL {
        let usage = state.tool_usage(tool).expect("registry tool present");
        assert_eq!(usage.invocations, 1, "{} invoked once", tool.name());
        assert!(usage.last_invoked_at.is_some());
    }

    let final_result = state.final_result.expect("final result present");
    assert_eq!(final_result.confidence, 94);
    assert_eq!(final_result.caveats.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn steps_arrive_in_order_with_at_most_one_active_task() {
    let engine = engine();
    let mut rx = engine.subscribe();
    engine.start("Is cold fusion scientifically viable?");

    let mut kinds = Vec::new();
    let mut prev_log_len = 0;
    let mut prev_counts = vec![0u32; ToolId::ALL.len()];
    let mut prev_sources = 0;

    loop {
        let state = rx.borrow_and_update().clone();

        // Every snapshot keeps the well-formed-run invariants.
        let active = state
            .plan
            .iter()
            .filter(|t| t.status == TaskStatus::Active)
            .count();
        assert!(active <= 1, "at most one active task");
        assert!(state.sources.len() >= prev_sources, "sources append-only");
        prev_sources = state.sources.len();
        for (i, tool) in ToolId::ALL.iter().enumerate() {
            let count = state.tool_usage(*tool).unwrap().invocations;
            assert!(count >= prev_counts[i], "tool counts monotonic");
            prev_counts[i] = count;
        }

        if state.log.len() > prev_log_len {
            for record in &state.log[prev_log_len..] {
                kinds.push(record.kind());
            }
            prev_log_len = state.log.len();
        }
        if state.final_result.is_some() {
            break;
        }
        rx.changed().await.expect("engine dropped");
    }

    assert_eq!(
        kinds,
        vec![
            StepKind::Plan,
            StepKind::Search,
            StepKind::Evaluate,
            StepKind::Search,
            StepKind::Evaluate,
            StepKind::Search,
            StepKind::Synthesize,
            StepKind::Final,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn blank_queries_are_ignored() {
    let engine = engine();
    let before = engine.snapshot();

    engine.start("");
    engine.start("   ");
    tokio::time::sleep(Duration::from_secs(30)).await;

    let after = engine.snapshot();
    assert_eq!(before, after);
    assert!(!after.running);
    assert_empty_defaults(&after);
}

#[tokio::test(start_paused = true)]
async fn reset_mid_run_halts_all_further_steps() {
    let engine = engine();
    let mut rx = engine.subscribe();

    engine.start("Geopolitical consequences of de-dollarization");
    wait_for(&mut rx, |s| s.log.len() >= 2).await;

    engine.reset();
    let halted = engine.snapshot();
    assert_empty_defaults(&halted);

    // Well past the point where every remaining timer would have fired.
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(engine.snapshot(), halted);
}

#[tokio::test(start_paused = true)]
async fn restart_supersedes_the_previous_run() {
    let engine = engine();
    let mut rx = engine.subscribe();

    engine.start("first query");
    let mid = wait_for(&mut rx, |s| s.log.len() >= 2).await;
    assert_eq!(mid.query, "first query");

    engine.start("second query");
    let superseded_seq = mid.run_seq;

    let state = loop {
        let state = rx.borrow_and_update().clone();
        // Nothing from the first run is observable after the restart.
        assert!(state.run_seq > superseded_seq);
        assert_eq!(state.query, "second query");
        if state.final_result.is_some() {
            break state;
        }
        rx.changed().await.expect("engine dropped");
    };

    // The terminal state is exactly one script's worth of effects.
    assert_eq!(state.log.len(), 8);
    assert_eq!(state.stats.steps, 8);
    assert_eq!(state.stats.searches, 3);
    for tool in ToolId::ALL {
        assert_eq!(state.tool_usage(tool).unwrap().invocations, 1);
    }
    assert_eq!(
        state
            .log
            .iter()
            .filter(|r| r.kind() == StepKind::Final)
            .count(),
        1
    );
}

#[tokio::test(start_paused = true)]
async fn repeated_resets_are_idempotent() {
    let engine = engine();

    engine.reset();
    let once = engine.snapshot();
    engine.reset();
    let twice = engine.snapshot();

    assert_empty_defaults(&once);
    assert_empty_defaults(&twice);

    // Identical apart from the cancellation epoch.
    let mut once_normalized = once;
    let mut twice_normalized = twice;
    once_normalized.run_seq = 0;
    twice_normalized.run_seq = 0;
    assert_eq!(once_normalized, twice_normalized);
}

#[tokio::test(start_paused = true)]
async fn tool_flash_sets_then_auto_clears() {
    let engine = engine();
    let mut rx = engine.subscribe();

    engine.start("flash check");
    let state = wait_for(&mut rx, |s| s.stats.searches >= 1).await;
    assert!(state.tool_usage(ToolId::WebSearch).unwrap().flashing);

    let state = wait_for(&mut rx, |s| {
        !s.tool_usage(ToolId::WebSearch).unwrap().flashing
    })
    .await;
    // The flash window is shorter than the gap to the next step, so the
    // clear lands before anything else changes.
    assert_eq!(state.stats.searches, 1);
    assert_eq!(state.tool_usage(ToolId::WebSearch).unwrap().invocations, 1);
}

#[tokio::test(start_paused = true)]
async fn reset_during_flash_window_stays_clean() {
    let engine = engine();
    let mut rx = engine.subscribe();

    engine.start("flash reset check");
    wait_for(&mut rx, |s| s.stats.searches >= 1).await;

    engine.reset();
    let halted = engine.snapshot();
    assert_empty_defaults(&halted);

    // The pending flash-clear from the cancelled run must not touch the
    // reset state.
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(engine.snapshot(), halted);
}

#[tokio::test(start_paused = true)]
async fn evaluate_steps_never_touch_tasks_or_sources() {
    let engine = engine();
    let mut rx = engine.subscribe();
    engine.start("evaluate isolation");

    let mut before: Option<RunState> = None;
    loop {
        let state = rx.borrow_and_update().clone();
        if let Some(prev) = before.take() {
            if state.log.len() == prev.log.len() + 1
                && state.log.last().map(|r| r.kind()) == Some(StepKind::Evaluate)
            {
                assert_eq!(state.plan, prev.plan);
                assert_eq!(state.sources, prev.sources);
            }
        }
        if state.final_result.is_some() {
            break;
        }
        before = Some(state);
        rx.changed().await.expect("engine dropped");
    }
}

#[tokio::test(start_paused = true)]
async fn faster_time_scale_reaches_final_sooner() {
    let engine = ResearchEngine::with_config(
        Handle::current(),
        aria_engine::EngineConfig {
            time_scale: 0.1,
            ..Default::default()
        },
    );
    let mut rx = engine.subscribe();

    let started = tokio::time::Instant::now();
    engine.start("speed check");
    wait_for(&mut rx, |s| s.final_result.is_some()).await;

    // Unscaled script time is 16s; at 0.1 it finishes in 1.6s.
    assert!(started.elapsed() < Duration::from_secs(3));
}
