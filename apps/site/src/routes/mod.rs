pub mod health;
pub mod theme;

use axum::{
    routing::{get, post},
    Router,
};

use crate::contact::handlers as contact;
use crate::pages::handlers as pages;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Content pages
        .route("/api/v1/home", get(pages::handle_home))
        .route("/api/v1/events", get(pages::handle_events))
        .route("/api/v1/events/:slug", get(pages::handle_event))
        .route("/api/v1/speakers", get(pages::handle_speakers))
        .route("/api/v1/speakers/:slug", get(pages::handle_speaker))
        .route("/api/v1/sponsors", get(pages::handle_sponsors))
        .route("/api/v1/sponsors/:slug", get(pages::handle_sponsor))
        .route("/api/v1/tickets", get(pages::handle_tickets))
        // Contact form
        .route("/api/v1/contact", post(contact::handle_contact))
        .route("/api/v1/contact/sessions", post(contact::handle_open_session))
        .route("/api/v1/contact/sessions/:id", get(contact::handle_session_status))
        .route(
            "/api/v1/contact/sessions/:id/submit",
            post(contact::handle_session_submit),
        )
        // Theme preference
        .route(
            "/api/v1/theme",
            get(theme::handle_get_theme).put(theme::handle_set_theme),
        )
        .with_state(state)
}
