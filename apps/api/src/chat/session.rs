//! Chat Session Controller state for one chat widget.
//!
//! Widget: Closed → Idle → AwaitingResponse → Idle. At most one turn is pending.
//! History is append-only; a reply is committed once, when its turn finishes,
//! while streamed fragments only touch the transient display buffer.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::task::AbortHandle;
use tracing::debug;
use uuid::Uuid;

use crate::chat::contact::{ContactError, ContactForm, ContactPhase};

pub const WELCOME_MESSAGE: &str =
    "Hi there! 👋 I'm Akansha's virtual assistant. How can I help you today?";
pub const CONTACT_SENT_MESSAGE: &str =
    "Thanks for reaching out! Your message has been sent and Akansha will get back to you soon.";
pub const CONTACT_PENDING_MESSAGE: &str =
    "Your previous message to Akansha is still on its way. You can send another once it has gone through.";
pub const CONTACT_FAILED_PREFIX: &str = "Sorry, your message could not be sent";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Chat is closed")]
    Closed,

    #[error("A response is already in progress")]
    TurnPending,

    #[error("Turn was cancelled or superseded")]
    StaleTurn,

    #[error(transparent)]
    Contact(#[from] ContactError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Monotonic within a session.
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetState {
    Closed,
    Idle,
    AwaitingResponse,
}

/// Identifies one user turn; replies carrying an outdated ticket are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnTicket(u64);

#[derive(Debug)]
struct PendingTurn {
    ticket: TurnTicket,
    abort: Option<AbortHandle>,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Sent → Idle auto-revert delay for the contact form.
    pub contact_reset_after: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            contact_reset_after: Duration::from_millis(3000),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub state: WidgetState,
    pub messages: Vec<ChatMessage>,
    pub streaming: Option<String>,
    pub contact_form: ContactPhase,
}

#[derive(Debug)]
pub struct ChatSession {
    id: Uuid,
    state: WidgetState,
    history: Vec<ChatMessage>,
    next_message_id: u64,
    next_turn: u64,
    pending: Option<PendingTurn>,
    streaming_buffer: String,
    contact: ContactForm,
}

impl ChatSession {
    pub fn new(settings: &SessionSettings) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            state: WidgetState::Closed,
            history: Vec::new(),
            next_message_id: 1,
            next_turn: 0,
            pending: None,
            streaming_buffer: String::new(),
            contact: ContactForm::new(settings.contact_reset_after),
        };
        session.append(WELCOME_MESSAGE.to_string(), Sender::Bot);
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn contact_phase(&mut self, now: Instant) -> ContactPhase {
        self.contact.tick(now);
        self.contact.phase()
    }

    /// Opening while a reply is streaming cancels it; nothing partial is kept.
    pub fn open(&mut self) {
        self.cancel_turn();
        self.state = WidgetState::Idle;
    }

    pub fn close(&mut self) {
        self.cancel_turn();
        self.state = WidgetState::Closed;
    }

    /// Records the user's message and moves to AwaitingResponse.
    pub fn begin_turn(&mut self, text: &str) -> Result<TurnTicket, SessionError> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        match self.state {
            WidgetState::Closed => return Err(SessionError::Closed),
            WidgetState::AwaitingResponse => return Err(SessionError::TurnPending),
            WidgetState::Idle => {}
        }

        self.append(text.to_string(), Sender::User);
        self.next_turn += 1;
        let ticket = TurnTicket(self.next_turn);
        self.pending = Some(PendingTurn {
            ticket,
            abort: None,
        });
        self.streaming_buffer.clear();
        self.state = WidgetState::AwaitingResponse;
        Ok(ticket)
    }

    /// Registers the task producing this turn's reply so it can be cancelled.
    /// Ignored if the turn is no longer current.
    pub fn attach_abort(&mut self, ticket: TurnTicket, handle: AbortHandle) {
        match self.pending.as_mut() {
            Some(pending) if pending.ticket == ticket => pending.abort = Some(handle),
            _ => handle.abort(),
        }
    }

    pub fn is_current(&self, ticket: TurnTicket) -> bool {
        matches!(&self.pending, Some(p) if p.ticket == ticket)
    }

    /// Appends a streamed fragment to the display buffer. Returns false for stale turns.
    pub fn push_chunk(&mut self, ticket: TurnTicket, fragment: &str) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.streaming_buffer.push_str(fragment);
        true
    }

    /// Commits the finished reply to history in one step.
    pub fn commit_turn(
        &mut self,
        ticket: TurnTicket,
        text: String,
    ) -> Result<ChatMessage, SessionError> {
        if !self.is_current(ticket) {
            return Err(SessionError::StaleTurn);
        }
        self.pending = None;
        self.streaming_buffer.clear();
        self.state = WidgetState::Idle;
        Ok(self.append(text, Sender::Bot).clone())
    }

    /// Commits the contact-form prompt and shows the form. While an earlier
    /// message is still sending, the turn ends with a notice instead.
    pub fn offer_contact_form(
        &mut self,
        ticket: TurnTicket,
        text: String,
        now: Instant,
    ) -> Result<ChatMessage, SessionError> {
        if !self.is_current(ticket) {
            return Err(SessionError::StaleTurn);
        }
        let text = match self.contact.open(now) {
            Ok(()) => text,
            Err(e) => {
                debug!("Contact form not offered in session {}: {e}", self.id);
                CONTACT_PENDING_MESSAGE.to_string()
            }
        };
        self.commit_turn(ticket, text)
    }

    /// Aborts the in-flight turn, if any. Returns whether one was cancelled.
    pub fn cancel_turn(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        if let Some(handle) = pending.abort {
            handle.abort();
        }
        debug!("Cancelled pending turn in session {}", self.id);
        self.streaming_buffer.clear();
        if self.state == WidgetState::AwaitingResponse {
            self.state = WidgetState::Idle;
        }
        true
    }

    pub fn submit_contact(&mut self, now: Instant) -> Result<(), SessionError> {
        self.contact.begin_send(now)?;
        Ok(())
    }

    /// Records the send outcome; either way a bot message reports it in the chat log.
    pub fn finish_contact(
        &mut self,
        outcome: Result<(), ContactError>,
        now: Instant,
    ) -> Result<ChatMessage, SessionError> {
        self.contact.finish_send(outcome.is_ok(), now)?;
        let text = match outcome {
            Ok(()) => CONTACT_SENT_MESSAGE.to_string(),
            Err(e) => format!("{CONTACT_FAILED_PREFIX}: {e}. You can email akansha.akg19@gmail.com directly."),
        };
        Ok(self.append(text, Sender::Bot).clone())
    }

    pub fn snapshot(&mut self, now: Instant) -> SessionSnapshot {
        let streaming = (self.state == WidgetState::AwaitingResponse)
            .then(|| self.streaming_buffer.clone());
        SessionSnapshot {
            id: self.id,
            state: self.state,
            messages: self.history.clone(),
            streaming,
            contact_form: self.contact_phase(now),
        }
    }

    fn append(&mut self, text: String, sender: Sender) -> &ChatMessage {
        let message = ChatMessage {
            id: self.next_message_id,
            text,
            sender,
            timestamp: Utc::now(),
        };
        self.next_message_id += 1;
        self.history.push(message);
        // just pushed
        &self.history[self.history.len() - 1]
    }
}

#[cfg(test)]
impl ChatSession {
    pub(crate) fn state(&self) -> WidgetState {
        self.state
    }

    pub(crate) fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub(crate) fn streaming_text(&self) -> &str {
        &self.streaming_buffer
    }
}
