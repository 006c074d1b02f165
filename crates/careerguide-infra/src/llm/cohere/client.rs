//! CohereProvider -- concrete [`CompletionProvider`] implementation for Cohere.
//!
//! Sends requests to the Cohere Chat API (`/v1/chat`) with bearer
//! authentication. Only single-shot completions are supported.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use careerguide_core::advisor::provider::CompletionProvider;
use careerguide_types::llm::{
    CompletionRequest, CompletionResponse, FinishReason, LlmError, Usage,
};

use super::types::{CohereChatRequest, CohereChatResponse, CohereChatTurn, CohereErrorResponse};

/// Cohere chat completion provider.
///
/// Implements [`CompletionProvider`] for the Cohere Chat API.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing HTTP request headers. It never appears in Debug output,
/// Display output, or tracing logs.
pub struct CohereProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl CohereProvider {
    /// Create a new Cohere provider.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Cohere API key wrapped in SecretString
    /// * `request_timeout` - upper bound on the whole HTTP round trip
    pub fn new(api_key: SecretString, request_timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://api.cohere.com".to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Convert a generic [`CompletionRequest`] into a [`CohereChatRequest`].
    fn to_cohere_request(&self, request: &CompletionRequest) -> CohereChatRequest {
        CohereChatRequest {
            model: request.model.clone(),
            message: request.message.clone(),
            preamble: request.system.clone(),
            chat_history: request
                .history
                .iter()
                .map(CohereChatTurn::from_message)
                .collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

/// Convert a Cohere response into the provider-agnostic shape.
///
/// Cohere does not echo the model back, so the request's model is carried
/// through.
fn into_completion_response(response: CohereChatResponse, model: &str) -> CompletionResponse {
    let finish_reason = match response.finish_reason.as_deref() {
        Some("COMPLETE") => FinishReason::Complete,
        Some("MAX_TOKENS") => FinishReason::MaxTokens,
        Some("ERROR") | Some("ERROR_TOXIC") | Some("ERROR_LIMIT") => FinishReason::Error,
        _ => FinishReason::Complete,
    };

    let billed = response
        .meta
        .and_then(|m| m.billed_units)
        .unwrap_or_default();

    CompletionResponse {
        id: response.response_id,
        content: response.text,
        model: model.to_string(),
        finish_reason,
        usage: Usage {
            input_tokens: billed.input_tokens,
            output_tokens: billed.output_tokens,
        },
    }
}

impl CompletionProvider for CohereProvider {
    fn name(&self) -> &str {
        "cohere"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.to_cohere_request(request);
        let url = self.url("/v1/chat");

        let response = self
            .client
            .post(&url)
            .header(
                "authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after_ms = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(|secs| secs * 1000);

            let error_body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<CohereErrorResponse>(&error_body)
                .map(|e| e.message)
                .unwrap_or(error_body);

            return Err(match status.as_u16() {
                401 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited { retry_after_ms },
                400 | 422 => LlmError::InvalidRequest(detail),
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {detail}"),
                },
            });
        }

        let cohere_resp: CohereChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        Ok(into_completion_response(cohere_resp, &request.model))
    }
}
