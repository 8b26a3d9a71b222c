//! Herb Chat Module
//!
//! Answers herb questions for the dashboard chat widget, either through the
//! generative-language API or through the offline keyword responder.

mod cache;
mod gemini;
mod keyword;
mod prompt;

pub use cache::{CachedResponder, ReplyCache};
pub use gemini::GeminiResponder;
pub use keyword::KeywordResponder;
pub use prompt::build_prompt;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::utils::truncate;

pub const CONNECTION_FALLBACK: &str =
    "⚠️ I’m having trouble connecting to the Ayurveda knowledge base right now.";
pub const EMPTY_REPLY_FALLBACK: &str =
    "⚠️ Sorry, I couldn’t generate a response. Please try again.";

pub const GREETING: &str = "Hello! I'm your Ayurvedic herb assistant. I can help you with information about herbs, their benefits, dosages, and quality standards. How can I assist you today?";

/// Quick-question chips shown under the chat input
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Suggestion {
    pub label: &'static str,
    pub prompt: &'static str,
}

pub const SUGGESTIONS: [Suggestion; 3] = [
    Suggestion { label: "Ashwagandha", prompt: "Tell me about Ashwagandha benefits" },
    Suggestion { label: "Quality", prompt: "What is the quality testing process?" },
    Suggestion { label: "Storage", prompt: "How should I store herbs?" },
];

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat API returned status {0}")]
    Status(u16),

    #[error("chat API returned no candidate text")]
    EmptyCandidate,

    #[error("chat request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ChatError {
    /// The fixed text the widget shows instead of an answer
    pub fn fallback_text(&self) -> &'static str {
        match self {
            ChatError::EmptyCandidate => EMPTY_REPLY_FALLBACK,
            _ => CONNECTION_FALLBACK,
        }
    }
}

#[async_trait]
pub trait ChatResponder: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Answer `question`, optionally in the context of the herb being viewed
    async fn reply(&self, herb: Option<&str>, question: &str) -> Result<String, ChatError>;
}

/// Ask `responder`, degrading any failure to its fallback text
pub async fn answer(responder: &dyn ChatResponder, herb: Option<&str>, question: &str) -> String {
    match responder.reply(herb, question).await {
        Ok(text) => text,
        Err(e) => {
            warn!(
                "{} chat failed for '{}': {}",
                responder.name(),
                truncate(question, 60),
                e
            );
            e.fallback_text().to_string()
        }
    }
}
