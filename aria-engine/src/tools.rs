//! Fixed registry of tools the agent pretends to invoke

use serde::{Deserialize, Serialize};

/// A pre-registered capability tracked by count and recency. Invocations
/// are simulated; nothing is actually executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolId {
    WebSearch,
    Scholar,
    News,
    Synthesizer,
}

impl ToolId {
    /// Registry order, also the display order of the tools panel
    pub const ALL: [ToolId; 4] = [
        ToolId::WebSearch,
        ToolId::Scholar,
        ToolId::News,
        ToolId::Synthesizer,
    ];

    /// Stable identifier used in exports
    pub fn id(&self) -> &'static str {
        match self {
            ToolId::WebSearch => "web_search",
            ToolId::Scholar => "scholar",
            ToolId::News => "news",
            ToolId::Synthesizer => "synthesizer",
        }
    }

    /// Human-readable name shown in the dashboard
    pub fn name(&self) -> &'static str {
        match self {
            ToolId::WebSearch => "Web Search",
            ToolId::Scholar => "Scholar API",
            ToolId::News => "News API",
            ToolId::Synthesizer => "Synthesizer",
        }
    }
}
