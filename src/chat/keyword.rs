//! Offline keyword responder
//!
//! Canned answers picked by keyword, for running the portal without a
//! generative API key.

use async_trait::async_trait;
use rand::seq::SliceRandom;

use super::{ChatError, ChatResponder};

const RULES: &[(&[&str], &str)] = &[
    (
        &["ashwagandha"],
        "Ashwagandha (Withania somnifera) is an adaptogenic herb known for stress relief and energy enhancement. It's commonly used in powder or capsule form. The optimal dosage is typically 300-600mg daily.",
    ),
    (
        &["turmeric", "haldi"],
        "Turmeric contains curcumin, a powerful anti-inflammatory compound. For best absorption, consume with black pepper and healthy fats. Typical dosage is 500-1000mg of curcumin daily.",
    ),
    (
        &["triphala"],
        "Triphala is a combination of three fruits: Amalaki, Bibhitaki, and Haritaki. It's excellent for digestive health and detoxification. Take 1-2 grams before bedtime with warm water.",
    ),
    (
        &["brahmi"],
        "Brahmi (Bacopa monnieri) is renowned for cognitive enhancement and memory support. It may take 8-12 weeks to see full benefits. Typical dosage is 300-600mg daily with meals.",
    ),
    (
        &["neem"],
        "Neem has powerful antibacterial and antifungal properties. It's used for skin health and immune support. Can be taken as capsules (500mg daily) or applied topically as oil.",
    ),
    (
        &["quality", "purity"],
        "Our herbs undergo rigorous quality testing including heavy metal analysis, microbial testing, and potency verification. All products are third-party lab tested and certified.",
    ),
    (
        &["dosage", "how much"],
        "Dosages vary by herb and individual needs. Always start with the lowest recommended dose and consult with an Ayurvedic practitioner. Most herbs are best taken with meals to improve absorption.",
    ),
    (
        &["side effects", "safe"],
        "While Ayurvedic herbs are generally safe, some may interact with medications or cause allergic reactions. Pregnant/nursing women and those with medical conditions should consult healthcare providers before use.",
    ),
    (
        &["storage", "store"],
        "Store herbs in a cool, dry place away from direct sunlight. Keep containers tightly sealed. Most powdered herbs last 2-3 years, while whole herbs can last longer when stored properly.",
    ),
    (
        &["organic", "certification"],
        "Our herbs are sourced from certified organic farms and undergo strict quality control. We maintain AYUSH, FSSAI, and GMP certifications to ensure the highest standards.",
    ),
];

pub const DEFAULT_REPLIES: [&str; 3] = [
    "I'm here to help with questions about Ayurvedic herbs, their benefits, dosages, and quality standards. What would you like to know?",
    "Feel free to ask about specific herbs like Ashwagandha, Turmeric, Triphala, or general Ayurvedic practices. I'm here to assist!",
    "I can provide information about herb quality, storage, dosages, and traditional uses. How can I help you today?",
];

#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordResponder;

impl KeywordResponder {
    pub fn new() -> Self {
        Self
    }

    /// First rule whose keyword appears in the message, in table order
    fn matched(message: &str) -> Option<&'static str> {
        let message = message.to_lowercase();
        RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| message.contains(k)))
            .map(|(_, reply)| *reply)
    }
}

#[async_trait]
impl ChatResponder for KeywordResponder {
    fn name(&self) -> &'static str {
        "keyword"
    }

    async fn reply(&self, _herb: Option<&str>, question: &str) -> Result<String, ChatError> {
        let reply = Self::matched(question).unwrap_or_else(|| {
            DEFAULT_REPLIES
                .choose(&mut rand::thread_rng())
                .copied()
                .unwrap_or(DEFAULT_REPLIES[0])
        });
        Ok(reply.to_string())
    }
}
