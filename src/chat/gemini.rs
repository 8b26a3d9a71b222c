use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{build_prompt, ChatError, ChatResponder};

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn into_first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.is_empty())
    }
}

/// Generative-language (`generateContent`) chat backend
pub struct GeminiResponder {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiResponder {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder().timeout(timeout).build().unwrap_or_default(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ChatResponder for GeminiResponder {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn reply(&self, herb: Option<&str>, question: &str) -> Result<String, ChatError> {
        let prompt = build_prompt(herb, question);
        let body = GenerateContentRequest {
            contents: [RequestContent {
                role: "user",
                parts: [RequestPart { text: &prompt }],
            }],
        };

        debug!("Sending {} byte prompt to generative API", prompt.len());

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ChatError::Status(response.status().as_u16()));
        }

        let payload: GenerateContentResponse = response.json().await?;
        payload.into_first_text().ok_or(ChatError::EmptyCandidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> GenerateContentResponse {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_first_candidate_text_extracted() {
        let payload = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"Take with warm milk."},{"text":"ignored"}]}},{"content":{"parts":[{"text":"second"}]}}]}"#,
        );
        assert_eq!(payload.into_first_text().as_deref(), Some("Take with warm milk."));
    }

    #[test]
    fn test_missing_or_empty_text_is_none() {
        assert!(parse(r#"{}"#).into_first_text().is_none());
        assert!(parse(r#"{"candidates":[]}"#).into_first_text().is_none());
        assert!(parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).into_first_text().is_none());
        assert!(parse(r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#)
            .into_first_text()
            .is_none());
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateContentRequest {
            contents: [RequestContent {
                role: "user",
                parts: [RequestPart { text: "hi" }],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
    }
}
