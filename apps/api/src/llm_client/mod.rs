//! Completion Client: the single point of entry for remote chat-completion calls.
//!
//! Precedence for every call: experience agent → availability latch → network.
//! Transport failures never reach the caller: they are logged, latch the shared
//! availability flag, and are replaced by a canned fallback answer.
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::matching::ExperienceAgent;

pub mod availability;
pub mod fallback;
pub mod prompts;
pub mod stream;

pub use availability::{ApiAvailability, RequestTicket};
pub use stream::{CompletionStream, NdjsonDecoder, TypingProfile};

use prompts::{
    augment_prompt, ASSISTANT_STREAM_SYSTEM, ASSISTANT_SYSTEM, COMPLETION_CONTEXT_LIMIT,
    STREAM_CONTEXT_LIMIT,
};

pub const DEFAULT_ENDPOINT: &str = "https://ollama.penify.life/ollama/api/chat";
pub const DEFAULT_MODEL: &str = "gemma3";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("completion response had no message content")]
    EmptyContent,
}

#[derive(Debug, Clone, Serialize)]
struct OutgoingMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Clone, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<OutgoingMessage>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'static str>,
}

/// One response object: the whole answer when not streaming, one fragment per line otherwise.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
    pub typing: TypingProfile,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            typing: TypingProfile::default(),
        }
    }
}

#[derive(Clone)]
pub struct CompletionClient {
    http: Client,
    settings: Arc<CompletionSettings>,
    agent: ExperienceAgent,
    availability: ApiAvailability,
    digest: Arc<str>,
}

impl CompletionClient {
    /// `availability` is injected so independent clients can hold independent flags.
    pub fn new(
        settings: CompletionSettings,
        agent: ExperienceAgent,
        availability: ApiAvailability,
    ) -> Result<Self, CompletionError> {
        let http = Client::builder().timeout(settings.timeout).build()?;
        let digest = Arc::from(agent.content().portfolio_digest());
        Ok(Self {
            http,
            settings: Arc::new(settings),
            agent,
            availability,
            digest,
        })
    }

    pub fn availability(&self) -> &ApiAvailability {
        &self.availability
    }

    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }

    /// Single-shot completion. Always returns displayable text.
    pub async fn generate_completion(&self, prompt: &str) -> String {
        if let Some(answer) = self.agent.process_query(prompt).relevant_answer() {
            return answer.to_string();
        }

        if !self.availability.is_available() {
            debug!("Completion endpoint latched unavailable; serving fallback");
            return self.get_fallback_response(prompt);
        }

        let ticket = self.availability.begin_request();
        match self.request_completion(prompt).await {
            Ok(text) => text,
            Err(e) => {
                error!("Error generating completion: {e}");
                self.availability.record_failure(ticket);
                self.get_fallback_response(prompt)
            }
        }
    }

    /// Streaming completion with the same precedence as `generate_completion`.
    ///
    /// Agent answers are re-chunked and paced to look typed; a latched endpoint yields
    /// the fallback in one fragment; otherwise fragments come from the endpoint's
    /// NDJSON body. Must be called inside a Tokio runtime.
    pub fn generate_completion_stream(&self, prompt: &str) -> CompletionStream {
        if let Some(answer) = self.agent.process_query(prompt).relevant_answer() {
            return CompletionStream::typed(answer.to_string(), self.settings.typing.clone());
        }

        if !self.availability.is_available() {
            debug!("Completion endpoint latched unavailable; streaming fallback");
            return CompletionStream::immediate(self.get_fallback_response(prompt));
        }

        let job = StreamJob {
            http: self.http.clone(),
            endpoint: self.settings.endpoint.clone(),
            request: ChatRequest {
                model: self.settings.model.clone(),
                messages: vec![OutgoingMessage {
                    role: "user",
                    content: augment_prompt(prompt, &self.digest, STREAM_CONTEXT_LIMIT),
                }],
                stream: true,
                system: Some(ASSISTANT_STREAM_SYSTEM),
            },
            availability: self.availability.clone(),
            ticket: self.availability.begin_request(),
            fallback: self.get_fallback_response(prompt),
        };

        CompletionStream::spawn(|tx| job.run(tx))
    }

    pub fn get_fallback_response(&self, prompt: &str) -> String {
        fallback::fallback_response(prompt).to_string()
    }

    /// Checks the endpoint with a HEAD request and updates the shared flag.
    /// The only way back to available after a failure.
    pub async fn check_api_availability(&self) -> bool {
        let reachable = match self
            .http
            .head(&self.settings.endpoint)
            .header("content-type", "application/json")
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Availability check failed: {e}");
                false
            }
        };

        self.availability.record_health_check(reachable);
        reachable
    }

    async fn request_completion(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![
                OutgoingMessage {
                    role: "user",
                    content: augment_prompt(prompt, &self.digest, COMPLETION_CONTEXT_LIMIT),
                },
                OutgoingMessage {
                    role: "system",
                    content: ASSISTANT_SYSTEM.to_string(),
                },
            ],
            stream: false,
            system: None,
        };

        let response = self
            .http
            .post(&self.settings.endpoint)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)?;
        debug!("Completion succeeded (model: {})", parsed.model);
        parsed
            .message
            .map(|m| m.content)
            .ok_or(CompletionError::EmptyContent)
    }
}

/// Everything the spawned stream producer owns.
struct StreamJob {
    http: Client,
    endpoint: String,
    request: ChatRequest,
    availability: ApiAvailability,
    ticket: RequestTicket,
    fallback: String,
}

impl StreamJob {
    async fn run(self, tx: mpsc::Sender<String>) {
        if let Err(e) = self.forward(&tx).await {
            error!("Stream error: {e}");
            self.availability.record_failure(self.ticket);
            let _ = tx.send(self.fallback).await;
        }
    }

    async fn forward(&self, tx: &mpsc::Sender<String>) -> Result<(), CompletionError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(&self.request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let mut body = response.bytes_stream();
        let mut decoder = NdjsonDecoder::new();

        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            for fragment in decoder.push(&chunk) {
                if tx.send(fragment).await.is_err() {
                    debug!("Completion stream receiver dropped; stopping");
                    return Ok(());
                }
            }
            if tx.is_closed() {
                debug!("Completion stream aborted by caller");
                return Ok(());
            }
        }

        if let Some(fragment) = decoder.finish() {
            // the receiver may already be gone
            let _ = tx.send(fragment).await;
        }
        info!("Completion stream finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use axum::{
        body::Body,
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::post,
        Json, Router,
    };
    use bytes::Bytes;
    use serde_json::{json, Value};

    use super::*;
    use crate::content::ContentStore;
    use crate::llm_client::fallback::DEFAULT_FALLBACK;

    const OFF_TOPIC: &str = "What is your favorite color?";

    #[derive(Default)]
    struct MockEndpoint {
        posts: AtomicUsize,
        heads: AtomicUsize,
        failing: AtomicBool,
        endless: AtomicBool,
        bodies_closed: AtomicUsize,
        last_request: std::sync::Mutex<Option<Value>>,
    }

    /// Counts streamed response bodies the server has let go of.
    struct BodyGuard(Arc<MockEndpoint>);

    impl Drop for BodyGuard {
        fn drop(&mut self) {
            self.0.bodies_closed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn endless_body(mock: Arc<MockEndpoint>) -> Body {
        let ticks = futures::stream::unfold(BodyGuard(mock), |guard| async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let line = Bytes::from_static(
                b"{\"message\":{\"role\":\"assistant\",\"content\":\"tick\"},\"done\":false}\n",
            );
            Some((Ok::<_, Infallible>(line), guard))
        });
        Body::from_stream(ticks)
    }

    async fn mock_chat(State(mock): State<Arc<MockEndpoint>>, Json(body): Json<Value>) -> Response {
        mock.posts.fetch_add(1, Ordering::SeqCst);
        let streaming = body["stream"].as_bool().unwrap_or(false);
        *mock.last_request.lock().unwrap() = Some(body);

        if mock.failing.load(Ordering::SeqCst) {
            return (StatusCode::INTERNAL_SERVER_ERROR, "model crashed").into_response();
        }

        if streaming && mock.endless.load(Ordering::SeqCst) {
            return Response::builder()
                .header("content-type", "application/x-ndjson")
                .body(endless_body(mock.clone()))
                .unwrap();
        }

        if streaming {
            let chunks = vec![
                Bytes::from_static(b"{\"message\":{\"role\":\"assistant\",\"content\":\"Hel"),
                Bytes::from_static(b"lo\"},\"done\":false}\n{bad json\n"),
                Bytes::from_static(b"{\"message\":{\"role\":\"assistant\",\"content\":\" there\"},\"done\":false}\n"),
                Bytes::from_static(b"{\"message\":{\"role\":\"assistant\",\"content\":\"!\"},\"done\":true}"),
            ];
            let body = Body::from_stream(futures::stream::iter(
                chunks.into_iter().map(Ok::<_, Infallible>),
            ));
            return Response::builder()
                .header("content-type", "application/x-ndjson")
                .body(body)
                .unwrap();
        }

        Json(json!({
            "model": "gemma3",
            "message": {"role": "assistant", "content": "Remote answer"},
            "done": true
        }))
        .into_response()
    }

    async fn mock_head(State(mock): State<Arc<MockEndpoint>>) -> StatusCode {
        mock.heads.fetch_add(1, Ordering::SeqCst);
        if mock.failing.load(Ordering::SeqCst) {
            StatusCode::SERVICE_UNAVAILABLE
        } else {
            StatusCode::OK
        }
    }

    async fn spawn_mock() -> (Arc<MockEndpoint>, String) {
        let mock = Arc::new(MockEndpoint::default());
        let router = Router::new()
            .route("/api/chat", post(mock_chat).head(mock_head))
            .with_state(mock.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        (mock, format!("http://{addr}/api/chat"))
    }

    fn client(endpoint: &str) -> CompletionClient {
        let settings = CompletionSettings {
            endpoint: endpoint.to_string(),
            timeout: Duration::from_secs(5),
            typing: TypingProfile::instant(),
            ..CompletionSettings::default()
        };
        let agent = ExperienceAgent::new(Arc::new(ContentStore::portfolio()));
        CompletionClient::new(settings, agent, ApiAvailability::new()).unwrap()
    }

    #[tokio::test]
    async fn test_agent_answer_skips_network() {
        let (mock, url) = spawn_mock().await;
        let client = client(&url);
        let answer = client.generate_completion("Tell me about Santo Remedio").await;
        assert!(answer.contains("$2.6M"));
        assert_eq!(mock.posts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_remote_completion_success() {
        let (mock, url) = spawn_mock().await;
        let client = client(&url);
        assert_eq!(client.generate_completion(OFF_TOPIC).await, "Remote answer");
        assert!(client.availability().is_available());

        let request = mock.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request["model"], "gemma3");
        assert_eq!(request["stream"], false);
        assert_eq!(request["messages"][0]["role"], "user");
        assert_eq!(request["messages"][1]["role"], "system");
        let content = request["messages"][0]["content"].as_str().unwrap();
        assert!(content.starts_with(OFF_TOPIC));
        assert!(content.contains("Below is the portfolio of Akansha"));
    }

    #[tokio::test]
    async fn test_failure_latches_until_health_check() {
        let (mock, url) = spawn_mock().await;
        let client = client(&url);

        mock.failing.store(true, Ordering::SeqCst);
        assert_eq!(client.generate_completion(OFF_TOPIC).await, DEFAULT_FALLBACK);
        assert!(!client.availability().is_available());

        // Endpoint is healthy again, but without a health check the latch holds.
        mock.failing.store(false, Ordering::SeqCst);
        assert_eq!(client.generate_completion(OFF_TOPIC).await, DEFAULT_FALLBACK);
        let streamed = client.generate_completion_stream(OFF_TOPIC).collect_text().await;
        assert_eq!(streamed, DEFAULT_FALLBACK);
        assert_eq!(mock.posts.load(Ordering::SeqCst), 1);

        assert!(client.check_api_availability().await);
        assert_eq!(mock.heads.load(Ordering::SeqCst), 1);
        assert_eq!(client.generate_completion(OFF_TOPIC).await, "Remote answer");
        assert_eq!(mock.posts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_health_check_keeps_latch() {
        let (mock, url) = spawn_mock().await;
        let client = client(&url);
        mock.failing.store(true, Ordering::SeqCst);
        assert!(!client.check_api_availability().await);
        assert_eq!(client.generate_completion(OFF_TOPIC).await, DEFAULT_FALLBACK);
        assert_eq!(mock.posts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_falls_back() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client(&format!("http://{addr}/api/chat"));
        assert_eq!(client.generate_completion("Tell me a joke").await, DEFAULT_FALLBACK);
        assert!(!client.availability().is_available());
    }

    #[tokio::test]
    async fn test_stream_skips_malformed_line_and_keeps_order() {
        let (mock, url) = spawn_mock().await;
        let client = client(&url);

        let fragments: Vec<String> = client.generate_completion_stream(OFF_TOPIC).collect().await;
        assert_eq!(fragments, vec!["Hello", " there", "!"]);
        assert!(client.availability().is_available());

        let request = mock.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request["stream"], true);
        assert_eq!(request["system"], ASSISTANT_STREAM_SYSTEM);
        assert_eq!(request["messages"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_dropping_stream_closes_upstream_body() {
        let (mock, url) = spawn_mock().await;
        let client = client(&url);
        mock.endless.store(true, Ordering::SeqCst);

        let mut stream = client.generate_completion_stream(OFF_TOPIC);
        assert_eq!(stream.next().await.as_deref(), Some("tick"));
        assert_eq!(mock.bodies_closed.load(Ordering::SeqCst), 0);
        drop(stream);

        for _ in 0..100 {
            if mock.bodies_closed.load(Ordering::SeqCst) == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(mock.bodies_closed.load(Ordering::SeqCst), 1);
        assert_eq!(mock.posts.load(Ordering::SeqCst), 1);
        assert!(client.availability().is_available());
    }

    #[tokio::test]
    async fn test_stream_http_error_latches_and_emits_fallback() {
        let (mock, url) = spawn_mock().await;
        let client = client(&url);
        mock.failing.store(true, Ordering::SeqCst);

        let text = client.generate_completion_stream(OFF_TOPIC).collect_text().await;
        assert_eq!(text, DEFAULT_FALLBACK);
        assert!(!client.availability().is_available());
    }

    #[tokio::test]
    async fn test_agent_stream_round_trip() {
        let (mock, url) = spawn_mock().await;
        let client = client(&url);
        let prompt = "Tell me about UNA Brands";
        let expected = client.agent.process_query(prompt).answer.unwrap();

        let chunks: Vec<String> = client.generate_completion_stream(prompt).collect().await;
        let n = expected.chars().count();
        assert_eq!(chunks.len(), (n + 9) / 10);
        assert_eq!(chunks.concat(), expected);
        assert_eq!(mock.posts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_independent_clients_have_independent_flags() {
        let (mock, url) = spawn_mock().await;
        let first = client(&url);
        let second = client(&url);
        mock.failing.store(true, Ordering::SeqCst);
        first.generate_completion(OFF_TOPIC).await;
        assert!(!first.availability().is_available());
        assert!(second.availability().is_available());
    }
}
