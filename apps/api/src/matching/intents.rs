//! Intent Matcher: flat keyword-table lookup producing canned answers.
//!
//! Algorithm:
//! 1. Experience agent first; a relevant, non-empty agent answer wins outright
//! 2. Exact (lowercased) question match against the QA table
//! 3. Keyword score per pair = number of its keywords found as substrings;
//!    strictly-greater replaces, so the first pair seen wins ties
//! 4. Education / contact / greeting overrides, returned in place of step 3
//! 5. Best keyword pair if its score > 0, else no answer

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::matching::agent::{AgentMetadata, ExperienceAgent};
use crate::matching::qa_table::{QaPair, QA_TABLE};

const EDUCATION_TERMS: &[&str] = &[
    "study",
    "college",
    "education",
    "university",
    "school",
    "degree",
    "babson",
];
const QUESTION_WORDS: &[&str] = &["where", "what", "when", "how"];
const CONTACT_TERMS: &[&str] = &["contact", "email", "get in touch", "reach out"];
const TIMED_GREETINGS: &[&str] = &["good morning", "good afternoon", "good evening"];

static GREETING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(hi|hello|hey|greetings|howdy)[\s!.?]*$").expect("greeting pattern must compile")
});

pub const EDUCATION_ANSWER: &str = "Akansha is currently pursuing her MS in Business Analytics at Babson College. She started in 2023 and is expected to graduate in 2025. Prior to this, she completed her undergraduate degree in Engineering, which provided a strong foundation for her career in product management and data analytics.";
pub const CONTACT_ANSWER: &str =
    "You can contact Akansha at akansha.akg19@gmail.com. Would you like to send her an email now?";
pub const GREETING_ANSWER: &str = "Hello! 👋 I'm Akansha's virtual assistant. How can I help you today? Feel free to ask about her experience, projects, or skills.";

/// Which stage produced an answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchSource {
    Agent(AgentMetadata),
    ExactQuestion,
    EducationIntent,
    ContactIntent,
    Greeting,
    Keyword { score: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedAnswer {
    pub answer: String,
    pub source: MatchSource,
}

#[derive(Debug, Clone)]
pub struct IntentMatcher {
    agent: ExperienceAgent,
    table: &'static [QaPair],
}

impl IntentMatcher {
    pub fn new(agent: ExperienceAgent) -> Self {
        Self {
            agent,
            table: QA_TABLE,
        }
    }

    pub fn agent(&self) -> &ExperienceAgent {
        &self.agent
    }

    /// Best-effort local answer, or `None` when the caller should fall through
    /// to the completion client.
    pub fn find_relevant_answer(&self, query: &str) -> Option<String> {
        self.resolve(query).map(|m| m.answer)
    }

    /// Same as `find_relevant_answer`, also reporting which stage answered.
    pub fn resolve(&self, query: &str) -> Option<MatchedAnswer> {
        let agent_result = self.agent.process_query(query);
        if let Some(answer) = agent_result.relevant_answer() {
            return Some(MatchedAnswer {
                answer: answer.to_string(),
                source: agent_result
                    .metadata
                    .clone()
                    .map(MatchSource::Agent)
                    .unwrap_or(MatchSource::Keyword { score: 0 }),
            });
        }

        let query_lower = query.to_lowercase();

        if let Some(pair) = self
            .table
            .iter()
            .find(|qa| qa.question.to_lowercase() == query_lower)
        {
            return Some(MatchedAnswer {
                answer: pair.answer.to_string(),
                source: MatchSource::ExactQuestion,
            });
        }

        let best = self.best_keyword_match(&query_lower);

        if let Some((answer, source)) = override_answer(&query_lower) {
            return Some(MatchedAnswer {
                answer: answer.to_string(),
                source,
            });
        }

        best.map(|(pair, score)| MatchedAnswer {
            answer: pair.answer.to_string(),
            source: MatchSource::Keyword { score },
        })
    }

    /// Highest-scoring pair with a non-zero score; earlier pairs win ties.
    fn best_keyword_match(&self, query_lower: &str) -> Option<(&'static QaPair, usize)> {
        let mut best: Option<(&'static QaPair, usize)> = None;
        let mut highest = 0;

        for pair in self.table {
            let score = pair
                .keywords
                .iter()
                .filter(|k| query_lower.contains(&k.to_lowercase()))
                .count();
            if score > highest {
                highest = score;
                best = Some((pair, score));
            }
        }

        best
    }
}

pub fn is_greeting(query: &str) -> bool {
    GREETING.is_match(query) || TIMED_GREETINGS.iter().any(|g| query.to_lowercase().contains(g))
}

fn override_answer(query_lower: &str) -> Option<(&'static str, MatchSource)> {
    let education = EDUCATION_TERMS.iter().any(|t| query_lower.contains(t))
        && QUESTION_WORDS.iter().any(|w| query_lower.contains(w));
    if education {
        return Some((EDUCATION_ANSWER, MatchSource::EducationIntent));
    }

    if CONTACT_TERMS.iter().any(|t| query_lower.contains(t)) {
        return Some((CONTACT_ANSWER, MatchSource::ContactIntent));
    }

    if is_greeting(query_lower) {
        return Some((GREETING_ANSWER, MatchSource::Greeting));
    }

    None
}
