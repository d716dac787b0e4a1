//! Outbound relay to the generative text service.
//!
//! The relay forwards one user message and returns the model's reply
//! verbatim. Resilience lives in the calling service: any relay failure is
//! replaced with a fixed apology so the conversation never breaks.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ChatConfig;

/// Error raised by a chat relay.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("relay unavailable: {0}")]
    Unavailable(String),
    #[error("relay request failed: {0}")]
    RequestFailed(String),
    #[error("relay returned an unexpected reply shape")]
    UnexpectedShape,
}

/// Abstraction over the generative backend so the chat service can be
/// exercised with stub relays in tests.
#[async_trait]
pub trait ChatRelay: Send + Sync {
    async fn reply(&self, message: &str) -> Result<String, RelayError>;
}

/// Relay backed by the Gemini `generateContent` endpoint.
pub struct GeminiRelay {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GeminiRelay {
    pub fn new(config: &ChatConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            endpoint: config.gemini_endpoint.clone(),
            api_key: config.gemini_api_key.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ReplyContent>,
}

#[derive(Debug, Deserialize)]
struct ReplyContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Debug, Deserialize)]
struct ReplyPart {
    text: Option<String>,
}

#[async_trait]
impl ChatRelay for GeminiRelay {
    async fn reply(&self, message: &str) -> Result<String, RelayError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(RelayError::Unavailable(
                "GEMINI_API_KEY is not configured".to_string(),
            ));
        };

        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: format!("You are a mental health assistant. Respond to: {message}"),
                }],
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|err| RelayError::RequestFailed(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::RequestFailed(format!(
                "upstream returned {status}"
            )));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|err| RelayError::RequestFailed(err.to_string()))?;

        payload
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .filter(|text| !text.is_empty())
            .ok_or(RelayError::UnexpectedShape)
    }
}
