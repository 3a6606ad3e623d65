//! Resolves one user turn: contact trigger, then the local matcher, then the
//! remote completion client.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::llm_client::{CompletionClient, CompletionStream};
use crate::matching::{IntentMatcher, MatchSource, MatchedAnswer};

pub const CONTACT_FORM_PROMPT: &str = "I'd be happy to help you get in touch with Akansha! \
    Please fill out the contact form with your name, email, and message, and she'll get back to you soon.";

const CONTACT_TRIGGERS: &[&str] = &["contact", "email", "get in touch"];

/// Where a committed reply came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ReplySource {
    Local(MatchSource),
    ContactForm,
    Completion,
}

impl ReplySource {
    pub fn kind(&self) -> &'static str {
        match self {
            ReplySource::Local(_) => "local",
            ReplySource::ContactForm => "contact_form",
            ReplySource::Completion => "completion",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TurnPlan {
    ContactForm,
    Local(MatchedAnswer),
    Remote,
}

impl TurnPlan {
    pub fn source(&self) -> ReplySource {
        match self {
            TurnPlan::ContactForm => ReplySource::ContactForm,
            TurnPlan::Local(matched) => ReplySource::Local(matched.source.clone()),
            TurnPlan::Remote => ReplySource::Completion,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

pub fn is_contact_trigger(text: &str) -> bool {
    let lower = text.to_lowercase();
    CONTACT_TRIGGERS.iter().any(|t| lower.contains(t))
}

#[derive(Clone)]
pub struct ChatResolver {
    matcher: Arc<IntentMatcher>,
    completion: CompletionClient,
    contact_prompt_delay: Duration,
}

impl ChatResolver {
    pub fn new(
        matcher: IntentMatcher,
        completion: CompletionClient,
        contact_prompt_delay: Duration,
    ) -> Self {
        Self {
            matcher: Arc::new(matcher),
            completion,
            contact_prompt_delay,
        }
    }

    pub fn matcher(&self) -> &IntentMatcher {
        &self.matcher
    }

    pub fn completion(&self) -> &CompletionClient {
        &self.completion
    }

    pub fn plan(&self, text: &str) -> TurnPlan {
        if is_contact_trigger(text) {
            return TurnPlan::ContactForm;
        }
        match self.matcher.resolve(text) {
            Some(matched) => TurnPlan::Local(matched),
            None => TurnPlan::Remote,
        }
    }

    /// Resolves the whole reply before returning.
    pub async fn respond(&self, text: &str) -> Reply {
        let plan = self.plan(text);
        let source = plan.source();
        debug!("Resolving turn via {source:?}");

        let answer = match plan {
            TurnPlan::ContactForm => {
                tokio::time::sleep(self.contact_prompt_delay).await;
                CONTACT_FORM_PROMPT.to_string()
            }
            TurnPlan::Local(matched) => matched.answer,
            TurnPlan::Remote => self.completion.generate_completion(text).await,
        };
        Reply {
            text: answer,
            source,
        }
    }

    /// Streaming variant. Local answers are typed out like agent answers.
    pub fn respond_stream(&self, text: &str) -> (ReplySource, CompletionStream) {
        let plan = self.plan(text);
        let source = plan.source();
        debug!("Streaming turn via {source:?}");

        let stream = match plan {
            TurnPlan::ContactForm => {
                let delay = self.contact_prompt_delay;
                CompletionStream::spawn(move |tx| async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(CONTACT_FORM_PROMPT.to_string()).await;
                })
            }
            TurnPlan::Local(matched) => {
                CompletionStream::typed(matched.answer, self.completion.settings().typing.clone())
            }
            TurnPlan::Remote => self.completion.generate_completion_stream(text),
        };
        (source, stream)
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use super::*;
    use crate::content::ContentStore;
    use crate::llm_client::fallback::DEFAULT_FALLBACK;
    use crate::llm_client::{ApiAvailability, CompletionSettings, TypingProfile};
    use crate::matching::intents::GREETING_ANSWER;
    use crate::matching::ExperienceAgent;

    const OFF_TOPIC: &str = "What is your favorite color?";

    /// Resolver whose endpoint refuses connections.
    fn resolver() -> ChatResolver {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let agent = ExperienceAgent::new(Arc::new(ContentStore::portfolio()));
        let settings = CompletionSettings {
            endpoint: format!("http://{addr}/api/chat"),
            timeout: Duration::from_secs(5),
            typing: TypingProfile::instant(),
            ..CompletionSettings::default()
        };
        let completion =
            CompletionClient::new(settings, agent.clone(), ApiAvailability::new()).unwrap();
        ChatResolver::new(IntentMatcher::new(agent), completion, Duration::ZERO)
    }

    #[test]
    fn test_contact_trigger() {
        assert!(is_contact_trigger("How can I contact her?"));
        assert!(is_contact_trigger("What's her EMAIL?"));
        assert!(is_contact_trigger("I'd like to get in touch"));
        assert!(!is_contact_trigger("Tell me about her projects"));
    }

    #[tokio::test]
    async fn test_plan_precedence() {
        let resolver = resolver();
        assert_eq!(resolver.plan("email me"), TurnPlan::ContactForm);
        assert!(matches!(resolver.plan("hello"), TurnPlan::Local(_)));
        assert_eq!(resolver.plan(OFF_TOPIC), TurnPlan::Remote);
    }

    #[tokio::test]
    async fn test_contact_trigger_beats_matcher() {
        let reply = resolver().respond("How do I contact Akansha?").await;
        assert_eq!(reply.text, CONTACT_FORM_PROMPT);
        assert_eq!(reply.source, ReplySource::ContactForm);
    }

    #[tokio::test]
    async fn test_local_reply() {
        let reply = resolver().respond("Tell me about Santo Remedio").await;
        assert!(reply.text.contains("$2.6M"));
        assert!(matches!(reply.source, ReplySource::Local(MatchSource::Agent(_))));

        let greeting = resolver().respond("hey").await;
        assert_eq!(greeting.text, GREETING_ANSWER);
    }

    #[tokio::test]
    async fn test_remote_failure_still_answers() {
        let resolver = resolver();
        let reply = resolver.respond(OFF_TOPIC).await;
        assert_eq!(reply.text, DEFAULT_FALLBACK);
        assert_eq!(reply.source, ReplySource::Completion);
        assert!(!resolver.completion().availability().is_available());
    }

    #[tokio::test]
    async fn test_streamed_local_reply_matches_single_shot() {
        let resolver = resolver();
        let query = "Where does Akansha study?";
        let whole = resolver.respond(query).await;

        let (source, stream) = resolver.respond_stream(query);
        let chunks: Vec<String> = stream.collect().await;
        assert_eq!(source, whole.source);
        assert_eq!(chunks.concat(), whole.text);
        assert!(whole.text.contains("Babson College"));
        assert!(chunks.iter().all(|c| c.chars().count() <= 10));
    }

    #[tokio::test]
    async fn test_streamed_contact_prompt() {
        let (source, stream) = resolver().respond_stream("get in touch");
        assert_eq!(source, ReplySource::ContactForm);
        assert_eq!(stream.collect_text().await, CONTACT_FORM_PROMPT);
    }

    #[test]
    fn test_reply_source_serialization() {
        let json = serde_json::to_value(ReplySource::Local(MatchSource::Greeting)).unwrap();
        assert_eq!(json["kind"], "local");
        assert_eq!(json["detail"]["kind"], "greeting");
        let json = serde_json::to_value(ReplySource::Completion).unwrap();
        assert_eq!(json["kind"], "completion");
    }
}
