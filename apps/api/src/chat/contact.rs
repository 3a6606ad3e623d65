//! Contact-form sub-state: Idle → Filling → Sending → Sent, with Sent reverting
//! to Idle on its own after a fixed delay. Delivery goes through a `ContactSender`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("Invalid contact form: {0}")]
    Validation(String),

    #[error("Could not send message: {0}")]
    Send(String),

    #[error("Contact form cannot {action} while {phase:?}")]
    InvalidTransition {
        phase: ContactPhase,
        action: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactPhase {
    Idle,
    Filling,
    Sending,
    Sent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactDraft {
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.trim().is_empty() {
            return Err(ContactError::Validation("name cannot be empty".to_string()));
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(ContactError::Validation(
                "email must be a valid address".to_string(),
            ));
        }
        if self.message.trim().is_empty() {
            return Err(ContactError::Validation("message cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Delivery seam for the contact form. No real mail backend is wired in.
#[async_trait]
pub trait ContactSender: Send + Sync {
    async fn send(&self, draft: &ContactDraft) -> Result<(), ContactError>;
}

/// Default sender: records the message in the log and reports success.
pub struct LoggingContactSender;

#[async_trait]
impl ContactSender for LoggingContactSender {
    async fn send(&self, draft: &ContactDraft) -> Result<(), ContactError> {
        info!(
            "Contact form message from {} <{}> ({} chars)",
            draft.name,
            draft.email,
            draft.message.chars().count()
        );
        Ok(())
    }
}

/// Posts each message as JSON to a configured webhook (a form backend or chat hook).
pub struct WebhookContactSender {
    http: reqwest::Client,
    url: String,
}

impl WebhookContactSender {
    pub fn new(url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, url })
    }
}

#[async_trait]
impl ContactSender for WebhookContactSender {
    async fn send(&self, draft: &ContactDraft) -> Result<(), ContactError> {
        let response = self
            .http
            .post(&self.url)
            .json(draft)
            .send()
            .await
            .map_err(|e| ContactError::Send(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContactError::Send(format!("webhook returned {status}")));
        }
        info!("Contact form message from <{}> delivered to webhook", draft.email);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    phase: ContactPhase,
    sent_at: Option<Instant>,
    reset_after: Duration,
}

impl ContactForm {
    pub fn new(reset_after: Duration) -> Self {
        Self {
            phase: ContactPhase::Idle,
            sent_at: None,
            reset_after,
        }
    }

    pub fn phase(&self) -> ContactPhase {
        self.phase
    }

    /// Applies the Sent → Idle auto-revert once its delay has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if let (ContactPhase::Sent, Some(sent_at)) = (self.phase, self.sent_at) {
            if now.duration_since(sent_at) >= self.reset_after {
                self.phase = ContactPhase::Idle;
                self.sent_at = None;
            }
        }
    }

    /// Shows the form. Re-opening an already open form is a no-op; a form still
    /// showing its sent confirmation starts over.
    pub fn open(&mut self, now: Instant) -> Result<(), ContactError> {
        self.tick(now);
        match self.phase {
            ContactPhase::Idle | ContactPhase::Filling | ContactPhase::Sent => {
                self.phase = ContactPhase::Filling;
                self.sent_at = None;
                Ok(())
            }
            phase => Err(ContactError::InvalidTransition {
                phase,
                action: "open",
            }),
        }
    }

    pub fn begin_send(&mut self, now: Instant) -> Result<(), ContactError> {
        self.tick(now);
        match self.phase {
            ContactPhase::Filling => {
                self.phase = ContactPhase::Sending;
                Ok(())
            }
            phase => Err(ContactError::InvalidTransition {
                phase,
                action: "send",
            }),
        }
    }

    /// Outcome of a send started with `begin_send`. Failure closes the form; there is no retry.
    pub fn finish_send(&mut self, succeeded: bool, now: Instant) -> Result<(), ContactError> {
        if self.phase != ContactPhase::Sending {
            return Err(ContactError::InvalidTransition {
                phase: self.phase,
                action: "finish sending",
            });
        }
        if succeeded {
            self.phase = ContactPhase::Sent;
            self.sent_at = Some(now);
        } else {
            self.phase = ContactPhase::Idle;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::Value;

    use super::*;

    const RESET: Duration = Duration::from_secs(3);

    fn draft() -> ContactDraft {
        ContactDraft {
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            message: "Let's talk about a role.".to_string(),
        }
    }

    #[test]
    fn test_full_cycle_with_auto_revert() {
        let start = Instant::now();
        let mut form = ContactForm::new(RESET);
        form.open(start).unwrap();
        assert_eq!(form.phase(), ContactPhase::Filling);
        form.begin_send(start).unwrap();
        assert_eq!(form.phase(), ContactPhase::Sending);
        form.finish_send(true, start).unwrap();
        assert_eq!(form.phase(), ContactPhase::Sent);

        form.tick(start + Duration::from_secs(1));
        assert_eq!(form.phase(), ContactPhase::Sent);
        form.tick(start + RESET);
        assert_eq!(form.phase(), ContactPhase::Idle);
    }

    #[test]
    fn test_failed_send_closes_form() {
        let now = Instant::now();
        let mut form = ContactForm::new(RESET);
        form.open(now).unwrap();
        form.begin_send(now).unwrap();
        form.finish_send(false, now).unwrap();
        assert_eq!(form.phase(), ContactPhase::Idle);
    }

    #[test]
    fn test_send_requires_open_form() {
        let now = Instant::now();
        let mut form = ContactForm::new(RESET);
        let err = form.begin_send(now).unwrap_err();
        assert_eq!(
            err,
            ContactError::InvalidTransition {
                phase: ContactPhase::Idle,
                action: "send"
            }
        );
    }

    #[test]
    fn test_reopen_during_sent_confirmation() {
        let now = Instant::now();
        let mut form = ContactForm::new(RESET);
        form.open(now).unwrap();
        form.begin_send(now).unwrap();
        form.finish_send(true, now).unwrap();

        form.open(now + Duration::from_secs(1)).unwrap();
        assert_eq!(form.phase(), ContactPhase::Filling);
        // the old confirmation timer no longer applies
        form.tick(now + RESET);
        assert_eq!(form.phase(), ContactPhase::Filling);
    }

    #[test]
    fn test_cannot_open_while_sending() {
        let now = Instant::now();
        let mut form = ContactForm::new(RESET);
        form.open(now).unwrap();
        form.begin_send(now).unwrap();
        assert!(form.open(now).is_err());
        assert!(form.finish_send(true, now).is_ok());
        assert!(form.finish_send(true, now).is_err());
    }

    #[test]
    fn test_draft_validation() {
        assert!(draft().validate().is_ok());

        let mut missing_name = draft();
        missing_name.name = "  ".to_string();
        assert!(matches!(missing_name.validate(), Err(ContactError::Validation(_))));

        let mut bad_email = draft();
        bad_email.email = "not-an-address".to_string();
        assert!(bad_email.validate().is_err());

        let mut empty_message = draft();
        empty_message.message = String::new();
        assert!(empty_message.validate().is_err());
    }

    #[tokio::test]
    async fn test_logging_sender_succeeds() {
        assert!(LoggingContactSender.send(&draft()).await.is_ok());
    }

    async fn spawn_webhook(status: StatusCode) -> (Arc<AtomicUsize>, String) {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/hook",
            post(move |Json(body): Json<Value>| {
                let counter = counter.clone();
                async move {
                    assert_eq!(body["email"], "sam@example.com");
                    counter.fetch_add(1, Ordering::SeqCst);
                    status
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        (hits, format!("http://{addr}/hook"))
    }

    #[tokio::test]
    async fn test_webhook_sender_posts_draft() {
        let (hits, url) = spawn_webhook(StatusCode::NO_CONTENT).await;
        let sender = WebhookContactSender::new(url, Duration::from_secs(5)).unwrap();
        assert!(sender.send(&draft()).await.is_ok());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_webhook_error_status_is_send_failure() {
        let (_, url) = spawn_webhook(StatusCode::BAD_GATEWAY).await;
        let sender = WebhookContactSender::new(url, Duration::from_secs(5)).unwrap();
        let err = sender.send(&draft()).await.unwrap_err();
        assert!(matches!(err, ContactError::Send(ref msg) if msg.contains("502")));
    }
}
