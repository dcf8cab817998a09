//! Gemini `generateContent` client.
//!
//! One POST per invocation, with the credential in the `key` query parameter
//! and an optional forward proxy installed on the HTTP client.

use async_trait::async_trait;
use reqwest::{Client, Proxy};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::GatewayError;

/// Parameters of a single provider call.
#[derive(Debug, Clone)]
pub struct GenerationCall<'a> {
    pub api_key: &'a str,
    pub model: &'a str,
    pub prompt: &'a str,
    pub timeout: Duration,
}

/// Seam between the gateway and the provider. The production
/// implementation is [`GeminiClient`].
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, call: &GenerationCall<'_>) -> crate::Result<GenerateContentResponse>;
}

pub struct GeminiClient {
    base_url: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: &ProviderConfig) -> crate::Result<Self> {
        let mut builder = Client::builder();

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url)
                .map_err(|e| GatewayError::Config(format!("Invalid proxy_url: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| GatewayError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn api_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(&self, call: &GenerationCall<'_>) -> crate::Result<GenerateContentResponse> {
        let request = GenerateContentRequest::from_prompt(call.prompt);

        debug!(
            "Sending {} prompt chars to model {} (timeout {:?})",
            call.prompt.chars().count(),
            call.model,
            call.timeout
        );

        let response = self
            .client
            .post(self.api_url(call.model))
            .query(&[("key", call.api_key)])
            .timeout(call.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(e, call.timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(e, call.timeout))?;

        if !status.is_success() {
            return Err(GatewayError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            GatewayError::MalformedResponse(format!("Ошибка парсинга JSON: {}", e))
        })
    }
}

fn transport_error(e: reqwest::Error, timeout: Duration) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout(timeout.as_secs())
    } else {
        GatewayError::Transport(e.to_string())
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part::text(prompt)],
            }],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            inline_data: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}
