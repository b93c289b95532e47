//! HTTP surface — the LINE webhook callback, the job detail page and health.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use secrecy::{ExposeSecret, SecretString};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::bot::BotService;
use crate::line::{SIGNATURE_HEADER, WebhookBody, verify_signature};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub bot: Arc<BotService>,
    pub channel_secret: Arc<SecretString>,
}

/// Build the Axum router with the webhook and detail routes.
pub fn webhook_routes(bot: Arc<BotService>, channel_secret: SecretString) -> Router {
    let state = AppState {
        bot,
        channel_secret: Arc::new(channel_secret),
    };

    Router::new()
        .route("/", post(callback))
        .route("/callback", post(callback))
        .route("/jobs/{index}", get(job_detail))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "jobline"
    }))
}

// ── Webhook ─────────────────────────────────────────────────────────────

async fn callback(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let Some(signature) = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
    else {
        warn!("Webhook request without signature");
        return (StatusCode::BAD_REQUEST, "Missing signature").into_response();
    };

    if !verify_signature(state.channel_secret.expose_secret(), signature, &body) {
        warn!("Webhook signature mismatch");
        return (StatusCode::BAD_REQUEST, "Invalid signature").into_response();
    }

    let payload: WebhookBody = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "Malformed webhook body");
            return (StatusCode::BAD_REQUEST, "Malformed body").into_response();
        }
    };

    debug!(events = payload.events.len(), "Webhook received");

    for event in &payload.events {
        if let Err(e) = state.bot.handle_event(event).await {
            error!(error = %e, kind = event.kind(), user_id = ?event.user_id(), "Event handling failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Event handling failed").into_response();
        }
    }

    "OK".into_response()
}

// ── Job detail ──────────────────────────────────────────────────────────

async fn job_detail(State(state): State<AppState>, Path(index): Path<String>) -> Html<String> {
    Html(state.bot.detail_page(&index))
}
