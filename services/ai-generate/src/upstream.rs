//! Client for the local completion backend.
//!
//! The backend speaks an OpenAI-style completions dialect, but deployments
//! vary in which response shape they emit. [`normalize_completion`] accepts
//! the common variants and reduces them to a single [`Completion`].

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::warn;

use crate::config::UpstreamConfig;

pub(crate) const COMPLETION_TEMPERATURE: f64 = 0.7;

const STRICT_RETRY_SUFFIX: &str = "Reply with the answer text only. \
    Do not describe response formats, schemas, or your own limitations.";

/// A normalized completion from the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Completion {
    pub(crate) text: String,
    pub(crate) tokens: u64,
}

/// Failures while talking to the completion backend.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("completion backend refused the connection")]
    Connect,
    #[error("completion backend timed out")]
    Timeout,
    #[error("completion backend returned status {0}")]
    Status(u16),
    #[error("completion backend payload had no usable text")]
    MalformedPayload,
    #[error("completion request failed: {0}")]
    Transport(String),
}

pub(crate) struct UpstreamClient {
    http: reqwest::Client,
    config: UpstreamConfig,
}

impl UpstreamClient {
    pub(crate) fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| UpstreamError::Transport(err.to_string()))?;
        Ok(Self { http, config })
    }

    /// Requests a completion, retrying once with a stricter instruction when
    /// the backend answers with a description of its own response format.
    pub(crate) async fn generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        max_tokens: u32,
    ) -> Result<Completion, UpstreamError> {
        let system = system_prompt.unwrap_or(&self.config.system_prompt);
        let completion = self.request_completion(prompt, system, max_tokens).await?;
        if !looks_like_schema_notice(&completion.text) {
            return Ok(completion);
        }

        warn!("backend described its response format, retrying with a strict instruction");
        let strict_system = format!("{system} {STRICT_RETRY_SUFFIX}");
        self.request_completion(prompt, &strict_system, max_tokens)
            .await
    }

    async fn request_completion(
        &self,
        prompt: &str,
        system_prompt: &str,
        max_tokens: u32,
    ) -> Result<Completion, UpstreamError> {
        let url = format!(
            "{}/v1/completions",
            self.config.backend_url.trim_end_matches('/')
        );
        let payload = completion_payload(prompt, system_prompt, max_tokens);
        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|_| UpstreamError::MalformedPayload)?;
        normalize_completion(&body).ok_or(UpstreamError::MalformedPayload)
    }
}

fn classify_send_error(err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout
    } else if err.is_connect() {
        UpstreamError::Connect
    } else {
        UpstreamError::Transport(err.to_string())
    }
}

fn completion_payload(prompt: &str, system_prompt: &str, max_tokens: u32) -> Value {
    json!({
        "prompt": prompt,
        "max_tokens": max_tokens,
        "temperature": COMPLETION_TEMPERATURE,
        "stream": false,
        "messages": [
            {"role": "system", "content": system_prompt},
            {"role": "user", "content": prompt},
        ],
    })
}

/// Reduces any of the known backend response shapes to a [`Completion`].
fn normalize_completion(body: &Value) -> Option<Completion> {
    let text = completion_text(body)?;
    let tokens = completion_tokens(body);
    Some(Completion {
        text: text.to_string(),
        tokens,
    })
}

fn completion_text(body: &Value) -> Option<&str> {
    let body = match body {
        Value::Array(items) => items.first()?,
        other => other,
    };

    if let Some(choice) = body.get("choices").and_then(|c| c.get(0)) {
        if let Some(text) = choice.get("text").and_then(Value::as_str) {
            return Some(text);
        }
        if let Some(content) = choice
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(Value::as_str)
        {
            return Some(content);
        }
        if let Some(output) = choice.get("output").and_then(Value::as_str) {
            return Some(output);
        }
    }

    if let Some(text) = body.get("text").and_then(Value::as_str) {
        return Some(text);
    }
    body.get("output").and_then(Value::as_str)
}

fn completion_tokens(body: &Value) -> u64 {
    let body = match body {
        Value::Array(items) => match items.first() {
            Some(first) => first,
            None => return 0,
        },
        other => other,
    };

    ["usage", "meta"]
        .iter()
        .filter_map(|key| body.get(key))
        .find_map(|section| {
            section
                .get("total_tokens")
                .or_else(|| section.get("tokens"))
                .and_then(Value::as_u64)
        })
        .unwrap_or(0)
}

/// Detects replies where the backend described its response contract instead
/// of answering. Small local models do this when the prompt mentions JSON.
fn looks_like_schema_notice(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return true;
    }
    let lowered = trimmed.to_lowercase();
    lowered.starts_with("i cannot")
        || lowered.starts_with("i can't")
        || lowered.starts_with("i am unable")
        || lowered.starts_with("as an ai")
        || lowered.contains("json schema")
        || lowered.contains("response format")
        || lowered.contains("response schema")
}

/// Stand-in completion for when the backend is unreachable, so the rest of
/// the platform can keep demoing without a model running locally.
pub(crate) fn mock_completion(prompt: &str) -> Completion {
    let text = format!(
        "[mock] The completion backend is offline. Echoing your prompt: {prompt}"
    );
    let tokens = text.split_whitespace().count() as u64;
    Completion { text, tokens }
}
