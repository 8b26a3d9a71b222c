//! Upstream Quota Guard
//!
//! Caps how often the portal may call the paid identification and chat APIs.
//! A quota left unset never refuses.

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use tracing::warn;

pub struct UpstreamQuota {
    identify: Option<DefaultDirectRateLimiter>,
    chat: Option<DefaultDirectRateLimiter>,
}

impl UpstreamQuota {
    pub fn new(identify_per_minute: Option<u32>, chat_per_minute: Option<u32>) -> Self {
        Self {
            identify: Self::limiter(identify_per_minute),
            chat: Self::limiter(chat_per_minute),
        }
    }

    pub fn unlimited() -> Self {
        Self::new(None, None)
    }

    // Zero is treated as "no limit" rather than "always refuse".
    fn limiter(per_minute: Option<u32>) -> Option<DefaultDirectRateLimiter> {
        per_minute
            .and_then(NonZeroU32::new)
            .map(|n| RateLimiter::direct(Quota::per_minute(n)))
    }

    fn check(limiter: &Option<DefaultDirectRateLimiter>, what: &str) -> bool {
        match limiter {
            Some(l) if l.check().is_err() => {
                warn!("{} quota exhausted", what);
                false
            }
            _ => true,
        }
    }

    /// Check the identification quota
    pub fn allow_identify(&self) -> bool {
        Self::check(&self.identify, "identify")
    }

    /// Check the chat quota
    pub fn allow_chat(&self) -> bool {
        Self::check(&self.chat, "chat")
    }
}

impl Default for UpstreamQuota {
    fn default() -> Self {
        Self::unlimited()
    }
}
