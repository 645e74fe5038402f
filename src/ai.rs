//! Client for the upstream chat-completion API
//!
//! One thin wrapper around an OpenAI-compatible `/chat/completions` endpoint,
//! plus the helpers needed to dig usable JSON out of free-form model output.
//! Every call is a single attempt with an explicit timeout; retrying is the
//! caller's non-problem, resilience lives in the estimation cascade.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::RoutecastError;
use crate::config::AiConfig;

/// Client for an OpenAI-compatible chat-completion endpoint
#[derive(Debug, Clone)]
pub struct AiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl AiClient {
    /// Build a client from configuration. Returns `None` when no API key is
    /// configured; that is a normal state, not an error.
    pub fn from_config(config: &AiConfig) -> Result<Option<Self>> {
        let Some(api_key) = config.api_key.clone() else {
            debug!("No AI API key configured; AI features disabled");
            return Ok(None);
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("routecast/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Some(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        }))
    }

    /// Issue one chat completion and return the first choice's content.
    #[instrument(skip(self, system, user), fields(model = %self.model))]
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user.to_string(),
                },
            ],
            temperature: 0.7,
        };

        debug!("Sending chat-completion request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .with_context(|| "Chat-completion request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Chat-completion request rejected");
            return Err(RoutecastError::api(format!("Status {status}: {body}")).into());
        }

        let completion: ChatResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse chat-completion response")?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| RoutecastError::api("Chat completion carried no content").into())
    }
}

/// Extract the first balanced `{...}` block from free-form model output.
///
/// Models asked for strict JSON still wrap it in prose often enough that the
/// callers cannot rely on the whole reply parsing.
#[must_use]
pub fn extract_json_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Strip an optional wrapping markdown code fence (``` or ```json) from a
/// model reply.
#[must_use]
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string on the opening fence line ("json", "JSON", ...)
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };

    rest.strip_suffix("```").unwrap_or(rest).trim()
}
