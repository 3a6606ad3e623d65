use std::convert::Infallible;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::chat::contact::{ContactDraft, ContactPhase};
use crate::chat::resolver::{Reply, ReplySource};
use crate::chat::session::{ChatMessage, ChatSession, SessionError, SessionSnapshot, TurnTicket};
use crate::errors::AppError;
use crate::matching::AgentResult;
use crate::state::AppState;

const BODY_CHANNEL_CAPACITY: usize = 32;
const REPLY_SOURCE_HEADER: &str = "x-reply-source";

#[derive(Deserialize)]
pub struct AskRequest {
    pub query: String,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub answer: Option<String>,
    pub agent: AgentResult,
}

#[derive(Serialize)]
pub struct StartersResponse {
    pub starters: &'static [&'static str],
}

#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct TurnResponse {
    pub reply: ChatMessage,
    pub source: ReplySource,
    pub contact_form: ContactPhase,
}

#[derive(Serialize)]
pub struct ContactResponse {
    pub message: ChatMessage,
    pub contact_form: ContactPhase,
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Chat session {id} not found"))
}

fn with_session<R>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut ChatSession) -> R,
) -> Result<R, AppError> {
    state
        .sessions
        .with_session(id, f)
        .ok_or_else(|| session_not_found(id))
}

/// Commits a finished reply. A contact-form reply also opens the form.
fn commit_reply(
    session: &mut ChatSession,
    ticket: TurnTicket,
    reply: Reply,
) -> Result<ChatMessage, SessionError> {
    match reply.source {
        ReplySource::ContactForm => session.offer_contact_form(ticket, reply.text, Instant::now()),
        _ => session.commit_turn(ticket, reply.text),
    }
}

/// GET /api/v1/chat/starters
pub async fn handle_starters(State(state): State<AppState>) -> Json<StartersResponse> {
    Json(StartersResponse {
        starters: state.content.conversation_starters(),
    })
}

/// POST /api/v1/chat/ask
/// Local matching only: `answer` is null when the matcher has nothing.
pub async fn handle_ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    let query = req.query.trim();
    if query.is_empty() {
        return Err(AppError::Validation("Query cannot be empty".to_string()));
    }

    let matcher = state.resolver.matcher();
    Ok(Json(AskResponse {
        answer: matcher.find_relevant_answer(query),
        agent: matcher.agent().process_query(query),
    }))
}

/// POST /api/v1/chat/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionSnapshot>) {
    (StatusCode::CREATED, Json(state.sessions.create()))
}

/// GET /api/v1/chat/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let snapshot = with_session(&state, id, |s| s.snapshot(Instant::now()))?;
    Ok(Json(snapshot))
}

/// POST /api/v1/chat/sessions/:id/open
pub async fn handle_open_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let snapshot = with_session(&state, id, |s| {
        s.open();
        s.snapshot(Instant::now())
    })?;
    Ok(Json(snapshot))
}

/// POST /api/v1/chat/sessions/:id/close
pub async fn handle_close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let snapshot = with_session(&state, id, |s| {
        s.close();
        s.snapshot(Instant::now())
    })?;
    Ok(Json(snapshot))
}

/// POST /api/v1/chat/sessions/:id/messages
///
/// Resolves the turn in a spawned task that commits on its own, so the reply lands
/// in history even if this request is dropped. Re-opening the widget aborts it.
pub async fn handle_send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<TurnResponse>, AppError> {
    let ticket = with_session(&state, id, |s| s.begin_turn(&req.text))??;

    let resolver = state.resolver.clone();
    let sessions = state.sessions.clone();
    let text = req.text;
    let task = tokio::spawn(async move {
        let reply = resolver.respond(&text).await;
        let source = reply.source.clone();
        sessions.with_session(id, |s| -> Result<_, SessionError> {
            let message = commit_reply(s, ticket, reply)?;
            Ok((message, source, s.contact_phase(Instant::now())))
        })
    });
    with_session(&state, id, |s| s.attach_abort(ticket, task.abort_handle()))?;

    let committed = match task.await {
        Ok(committed) => committed,
        Err(e) if e.is_cancelled() => return Err(SessionError::StaleTurn.into()),
        Err(e) => return Err(AppError::Internal(anyhow::anyhow!("Turn task failed: {e}"))),
    };
    let (reply, source, contact_form) = committed.ok_or_else(|| session_not_found(id))??;
    debug!("Committed reply {} in session {id}", reply.id);

    Ok(Json(TurnResponse {
        reply,
        source,
        contact_form,
    }))
}

/// POST /api/v1/chat/sessions/:id/messages/stream
///
/// Streams the reply as `text/plain`. Fragments go to the session's display buffer
/// as they arrive; the full reply is committed once the stream ends.
pub async fn handle_stream_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Response, AppError> {
    let ticket = with_session(&state, id, |s| s.begin_turn(&req.text))??;
    let (source, mut stream) = state.resolver.respond_stream(&req.text);

    let (tx, rx) = mpsc::channel::<Result<Bytes, Infallible>>(BODY_CHANNEL_CAPACITY);
    let sessions = state.sessions.clone();
    let reply_source = source.clone();
    let task = tokio::spawn(async move {
        let mut text = String::new();
        while let Some(fragment) = stream.next().await {
            let current = sessions
                .with_session(id, |s| s.push_chunk(ticket, &fragment))
                .unwrap_or(false);
            if !current {
                debug!("Turn in session {id} superseded; dropping stream");
                stream.abort();
                return;
            }
            text.push_str(&fragment);
            // keep consuming after the client disconnects
            let _ = tx.send(Ok(Bytes::from(fragment))).await;
        }

        let reply = Reply {
            text,
            source: reply_source,
        };
        match sessions.with_session(id, |s| commit_reply(s, ticket, reply)) {
            Some(Ok(message)) => debug!("Committed streamed reply {} in session {id}", message.id),
            Some(Err(e)) => debug!("Discarded streamed reply in session {id}: {e}"),
            None => warn!("Session {id} disappeared while streaming"),
        }
    });
    with_session(&state, id, |s| s.attach_abort(ticket, task.abort_handle()))?;

    let headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
        (HeaderName::from_static(REPLY_SOURCE_HEADER), source.kind()),
    ];
    Ok((headers, Body::from_stream(ReceiverStream::new(rx))).into_response())
}

/// POST /api/v1/chat/sessions/:id/contact
pub async fn handle_contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<ContactDraft>,
) -> Result<Json<ContactResponse>, AppError> {
    draft.validate()?;
    with_session(&state, id, |s| s.submit_contact(Instant::now()))??;

    let outcome = state.contact_sender.send(&draft).await;
    match &outcome {
        Ok(()) => info!("Contact form sent for session {id}"),
        Err(e) => warn!("Contact form send failed for session {id}: {e}"),
    }

    let (message, contact_form) = with_session(&state, id, |s| -> Result<_, SessionError> {
        let message = s.finish_contact(outcome, Instant::now())?;
        Ok((message, s.contact_phase(Instant::now())))
    })??;

    Ok(Json(ContactResponse {
        message,
        contact_form,
    }))
}

/// POST /api/v1/completion/availability
/// Checks the completion endpoint; the only way to clear a latched failure.
pub async fn handle_check_availability(
    State(state): State<AppState>,
) -> Json<AvailabilityResponse> {
    let available = state.resolver.completion().check_api_availability().await;
    Json(AvailabilityResponse { available })
}
