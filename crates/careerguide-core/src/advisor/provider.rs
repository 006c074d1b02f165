//! CompletionProvider trait definition.
//!
//! This is the abstraction the advisor gateway calls through.
//! Implementations live in careerguide-infra (e.g., `CohereProvider`).

use careerguide_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for chat-completion provider backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). Only
/// single-shot completions are modeled; the product does not stream.
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g., "cohere").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
