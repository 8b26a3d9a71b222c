//! Chat Reply Cache
//!
//! Keeps successful generative replies so repeated widget questions don't
//! spend upstream quota. Failures are never stored.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{ChatError, ChatResponder};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    herb_hash: [u8; 32],
    question_hash: [u8; 32],
}

impl CacheKey {
    fn new(herb: Option<&str>, question: &str) -> Self {
        Self {
            herb_hash: hash(herb.unwrap_or("")),
            question_hash: hash(question),
        }
    }
}

fn hash(text: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.finalize().into()
}

/// Bounded reply cache. Once full, new replies are not stored.
pub struct ReplyCache {
    replies: RwLock<HashMap<CacheKey, String>>,
    capacity: usize,
}

impl ReplyCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            replies: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    pub async fn get(&self, herb: Option<&str>, question: &str) -> Option<String> {
        let replies = self.replies.read().await;
        replies.get(&CacheKey::new(herb, question)).cloned()
    }

    pub async fn set(&self, herb: Option<&str>, question: &str, reply: String) {
        let mut replies = self.replies.write().await;
        let key = CacheKey::new(herb, question);
        if replies.len() >= self.capacity && !replies.contains_key(&key) {
            return;
        }
        replies.insert(key, reply);
    }

    pub async fn len(&self) -> usize {
        self.replies.read().await.len()
    }

    pub async fn clear(&self) {
        self.replies.write().await.clear();
    }
}

impl Default for ReplyCache {
    fn default() -> Self {
        Self::new(512)
    }
}

/// Responder that consults a `ReplyCache` before delegating
pub struct CachedResponder {
    inner: Arc<dyn ChatResponder>,
    cache: Arc<ReplyCache>,
}

impl CachedResponder {
    pub fn new(inner: Arc<dyn ChatResponder>, cache: Arc<ReplyCache>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl ChatResponder for CachedResponder {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn reply(&self, herb: Option<&str>, question: &str) -> Result<String, ChatError> {
        if let Some(cached) = self.cache.get(herb, question).await {
            debug!("Chat cache hit for {} backend", self.inner.name());
            return Ok(cached);
        }

        let reply = self.inner.reply(herb, question).await?;
        self.cache.set(herb, question, reply.clone()).await;
        Ok(reply)
    }
}
