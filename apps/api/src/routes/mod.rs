pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers as chat;
use crate::content::handlers as portfolio;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Portfolio content
        .route(
            "/api/v1/portfolio/experience",
            get(portfolio::handle_experience),
        )
        .route("/api/v1/portfolio/projects", get(portfolio::handle_projects))
        .route(
            "/api/v1/portfolio/case-studies/:key",
            get(portfolio::handle_case_study),
        )
        // Chat
        .route("/api/v1/chat/starters", get(chat::handle_starters))
        .route("/api/v1/chat/ask", post(chat::handle_ask))
        .route("/api/v1/chat/sessions", post(chat::handle_create_session))
        .route("/api/v1/chat/sessions/:id", get(chat::handle_get_session))
        .route(
            "/api/v1/chat/sessions/:id/open",
            post(chat::handle_open_session),
        )
        .route(
            "/api/v1/chat/sessions/:id/close",
            post(chat::handle_close_session),
        )
        .route(
            "/api/v1/chat/sessions/:id/messages",
            post(chat::handle_send_message),
        )
        .route(
            "/api/v1/chat/sessions/:id/messages/stream",
            post(chat::handle_stream_message),
        )
        .route(
            "/api/v1/chat/sessions/:id/contact",
            post(chat::handle_contact),
        )
        // Completion endpoint
        .route(
            "/api/v1/completion/availability",
            post(chat::handle_check_availability),
        )
        .with_state(state)
}
