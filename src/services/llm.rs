// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for an OpenAI-compatible chat completions endpoint.

use crate::config::Config;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sends single-turn prompts to the configured model.
#[derive(Clone)]
pub struct InferenceClient {
    http: reqwest::Client,
    api_url: String,
    api_token: Option<String>,
    model_id: Option<String>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

impl InferenceClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.llm_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build HTTP client: {}", e)))?;

        if config.hf_api_token.is_none() {
            tracing::warn!("HF_API_TOKEN not set, inference requests will be sent unauthenticated");
        }

        Ok(Self {
            http,
            api_url: config.llm_api_url.clone(),
            api_token: config.hf_api_token.clone(),
            model_id: config.model_id.clone(),
        })
    }

    /// Send `prompt` as one user message and return the reply text.
    pub async fn complete(&self, prompt: &str) -> Result<String, AppError> {
        let body = ChatRequest {
            model: self.model_id.as_deref(),
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut request = self.http.post(&self.api_url).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let started = std::time::Instant::now();
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Upstream("Inference request timed out".to_string())
            } else {
                AppError::Upstream(format!("Inference request failed: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("Inference HTTP {}: {}", status, body)));
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Inference JSON parse error: {}", e)))?;

        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Inference request completed"
        );

        reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AppError::Upstream("Inference reply had no content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let body = ChatRequest {
            model: Some("meta-llama/Llama-3.1-8B-Instruct"),
            messages: [ChatMessage {
                role: "user",
                content: "hello",
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "meta-llama/Llama-3.1-8B-Instruct");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");

        let anonymous = ChatRequest { model: None, ..body };
        assert!(serde_json::to_value(&anonymous).unwrap().get("model").is_none());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_upstream_error() {
        let config = Config {
            llm_api_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            llm_timeout_secs: 2,
            ..Config::default()
        };
        let client = InferenceClient::new(&config).unwrap();
        assert!(matches!(client.complete("hi").await, Err(AppError::Upstream(_))));
    }
}
