use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::chat::{answer, Suggestion, CONNECTION_FALLBACK, GREETING, SUGGESTIONS};
use crate::error::PortalError;
use crate::server::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/api/chat/greeting", get(greeting_handler))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest {
    message: String,
    #[serde(default)]
    herb_name: Option<String>,
}

/// One widget bubble, shaped like the browser's message objects
#[derive(Debug, Serialize)]
pub struct BotMessage {
    pub id: String,
    pub sender: &'static str,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl BotMessage {
    fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender: "bot",
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Greeting {
    #[serde(flatten)]
    message: BotMessage,
    suggestions: &'static [Suggestion],
}

async fn greeting_handler() -> Json<Greeting> {
    Json(Greeting {
        message: BotMessage::new(GREETING),
        suggestions: &SUGGESTIONS,
    })
}

async fn chat_handler(
    State(state): State<AppState>,
    request: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<BotMessage>, PortalError> {
    let Json(request) = request.map_err(|_| PortalError::BadRequest("Invalid chat request"))?;

    let question = request.message.trim();
    if question.is_empty() {
        return Err(PortalError::BadRequest("Message is required"));
    }
    let herb = request
        .herb_name
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty());

    if !state.quota.allow_chat() {
        return Ok(Json(BotMessage::new(CONNECTION_FALLBACK)));
    }

    debug!("Chat via {} (herb: {:?})", state.chat.name(), herb);
    let text = answer(state.chat.as_ref(), herb, question).await;
    Ok(Json(BotMessage::new(text)))
}
