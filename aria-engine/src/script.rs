//! The canned research timeline, expressed as plain data
//!
//! A run is a fixed list of [`ScriptBeat`]s consumed in order by the
//! engine: wait the beat's delay, commit its effects, move on. Keeping the
//! sequence as data (rather than chained callbacks) leaves the engine with
//! a single cancellation point to enforce.

use std::time::Duration;

use crate::types::{
    FinalResult, Priority, Reliability, Source, StepPayload, Task, TaskStatus,
};
use crate::ToolId;

/// Marks one task complete and optionally activates the next one
#[derive(Debug, Clone, Copy)]
pub struct TaskAdvance {
    pub complete: u8,
    pub activate: Option<u8>,
}

/// One timed unit of the scripted run
#[derive(Debug, Clone)]
pub struct ScriptBeat {
    /// Pause before this beat commits, measured from the previous commit
    pub delay: Duration,
    pub thinking: String,
    pub action: String,
    pub payload: StepPayload,
    /// Sources appended alongside the step (search beats only)
    pub sources: Vec<Source>,
    /// Plan checklist advance applied with the step, if any
    pub advance: Option<TaskAdvance>,
    /// Confidence override for beats whose payload carries none
    pub set_confidence: Option<u8>,
}

fn task(id: u8, label: &str, priority: Priority, status: TaskStatus) -> Task {
    Task {
        id,
        label: label.to_string(),
        priority,
        status,
    }
}

fn source(id: u8, domain: &str, snippet: &str, reliability: Reliability) -> Source {
    Source {
        id,
        domain: domain.to_string(),
        snippet: snippet.to_string(),
        reliability,
    }
}

/// The full eight-beat research script
pub fn research_script() -> Vec<ScriptBeat> {
    vec![
        ScriptBeat {
            delay: Duration::from_millis(1000),
            thinking: "Deconstructing research query into multi-vector analysis tasks. \
                       Prioritizing high-impact economic sectors first."
                .to_string(),
            action: "Generating research roadmap and task prioritization matrix.".to_string(),
            payload: StepPayload::Plan {
                tasks: vec![
                    task(
                        1,
                        "Analyze AGI impact on manufacturing sectors",
                        Priority::High,
                        TaskStatus::Active,
                    ),
                    task(
                        2,
                        "Evaluate shift in service-based economies",
                        Priority::Med,
                        TaskStatus::Pending,
                    ),
                    task(
                        3,
                        "Synthesize expert projections for 2030-2050",
                        Priority::High,
                        TaskStatus::Pending,
                    ),
                    task(
                        4,
                        "Assess universal basic income feasibility",
                        Priority::Low,
                        TaskStatus::Pending,
                    ),
                ],
            },
            sources: Vec::new(),
            advance: None,
            set_confidence: None,
        },
        ScriptBeat {
            delay: Duration::from_millis(2500),
            thinking: "Initiating broad scan of recent economic reports from IMF, World Bank, \
                       and McKinsey regarding automation trends."
                .to_string(),
            action: "Executing global database query for 'AGI economic impact 2025-2030'."
                .to_string(),
            payload: StepPayload::Search {
                query: "AGI economic impact 2025-2030".to_string(),
                tool: ToolId::WebSearch,
                result_count: 1420,
            },
            sources: vec![
                source(
                    1,
                    "mckinsey.com",
                    "Generative AI could add $2.6T to $4.4T annually to the global economy.",
                    Reliability::High,
                ),
                source(
                    2,
                    "imf.org",
                    "40% of global employment is exposed to AI, with advanced economies at \
                     higher risk.",
                    Reliability::High,
                ),
            ],
            advance: None,
            set_confidence: None,
        },
        ScriptBeat {
            delay: Duration::from_millis(2000),
            thinking: "Initial data suggests massive productivity gains but highlights a \
                       significant gap in specific regional displacement data."
                .to_string(),
            action: "Performing gap analysis on retrieved dataset.".to_string(),
            payload: StepPayload::Evaluate {
                confidence: 45,
                gaps: vec![
                    "Regional data for SE Asia missing".to_string(),
                    "Specific impact on creative industries unclear".to_string(),
                ],
            },
            sources: Vec::new(),
            advance: None,
            set_confidence: None,
        },
        ScriptBeat {
            delay: Duration::from_millis(2000),
            thinking: "Drilling down into academic literature for specific displacement models \
                       in service sectors."
                .to_string(),
            action: "Querying Google Scholar for 'AI displacement in service economy \
                     longitudinal study'."
                .to_string(),
            payload: StepPayload::Search {
                query: "AI displacement in service economy".to_string(),
                tool: ToolId::Scholar,
                result_count: 84,
            },
            sources: vec![
                source(
                    3,
                    "mit.edu",
                    "Task-based displacement models suggest 15% net job loss in administrative \
                     roles.",
                    Reliability::High,
                ),
                source(
                    4,
                    "oxford.ac.uk",
                    "Creative industries show 'augmentation' rather than 'replacement' in 70% \
                     of cases.",
                    Reliability::Medium,
                ),
            ],
            advance: Some(TaskAdvance {
                complete: 1,
                activate: Some(2),
            }),
            set_confidence: None,
        },
        ScriptBeat {
            delay: Duration::from_millis(2000),
            thinking: "Confidence increasing. Service sector data is robust. Final gap \
                       identified: long-term policy response efficacy."
                .to_string(),
            action: "Refining confidence score based on new academic inputs.".to_string(),
            payload: StepPayload::Evaluate {
                confidence: 72,
                gaps: vec!["Long-term policy efficacy data needed".to_string()],
            },
            sources: Vec::new(),
            advance: None,
            set_confidence: None,
        },
        ScriptBeat {
            delay: Duration::from_millis(2000),
            thinking: "Searching for real-time policy updates and pilot program results for UBI \
                       and reskilling initiatives."
                .to_string(),
            action: "Scanning global news feeds for 'AI policy response 2026'.".to_string(),
            payload: StepPayload::Search {
                query: "AI policy response 2026".to_string(),
                tool: ToolId::News,
                result_count: 312,
            },
            sources: vec![source(
                5,
                "reuters.com",
                "EU Parliament passes 'AI Transition Fund' to support displaced workers.",
                Reliability::High,
            )],
            advance: Some(TaskAdvance {
                complete: 2,
                activate: Some(3),
            }),
            set_confidence: None,
        },
        ScriptBeat {
            delay: Duration::from_millis(2000),
            thinking: "Merging economic projections, academic models, and current policy trends. \
                       Resolving contradictions between optimistic tech reports and cautious \
                       academic studies."
                .to_string(),
            action: "Running cross-reference synthesis algorithm.".to_string(),
            payload: StepPayload::Synthesize {
                sources_processed: 5,
                contradictions_resolved: 2,
                findings: vec![
                    "Net job growth likely in tech/maintenance, but massive churn in mid-tier \
                     admin."
                        .to_string(),
                    "Productivity gains of 30% expected by 2030.".to_string(),
                    "Policy response is lagging behind technological deployment speed."
                        .to_string(),
                ],
            },
            sources: Vec::new(),
            advance: Some(TaskAdvance {
                complete: 3,
                activate: Some(4),
            }),
            set_confidence: Some(88),
        },
        ScriptBeat {
            delay: Duration::from_millis(2500),
            thinking: "Research complete. All primary and secondary objectives met. Generating \
                       final executive report."
                .to_string(),
            action: "Compiling final research dossier.".to_string(),
            payload: StepPayload::Final(FinalResult {
                summary: "AGI will likely cause a 'Great Reallocation' rather than a 'Great \
                          Unemployment'. While 300M jobs are exposed to automation, new roles \
                          in AI management and human-centric services will emerge. The primary \
                          risk is a widening wealth gap and temporary regional instability \
                          during the 2028-2032 transition period."
                    .to_string(),
                confidence: 94,
                caveats: vec![
                    "Assumes AGI deployment follows current exponential curve".to_string(),
                    "Geopolitical conflict could disrupt supply chains".to_string(),
                ],
                answer: "The impact of AGI on global employment will be transformative, \
                         characterized by high volatility in administrative and manufacturing \
                         sectors, but balanced by significant productivity-led growth in new \
                         industries. Success depends heavily on the speed of government \
                         reskilling initiatives."
                    .to_string(),
            }),
            sources: Vec::new(),
            advance: None,
            set_confidence: None,
        },
    ]
}
