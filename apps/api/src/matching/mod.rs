// Local answer resolution: the structured experience agent and the flat intent matcher.
// Matching is literal substring / regex testing only, deterministic for a given input.

pub mod agent;
pub mod education;
pub mod intents;
pub mod qa_table;

pub use agent::{AgentResult, ExperienceAgent};
pub use intents::{IntentMatcher, MatchSource, MatchedAnswer};
