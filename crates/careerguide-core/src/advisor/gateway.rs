//! Advisor gateway: turns a session's history and a new user message into
//! a model reply.
//!
//! The gateway performs no persistence. Callers load the session history,
//! call [`AdvisorGateway::generate_reply`], and record turns through the
//! chat service themselves.

use careerguide_types::chat::ChatMessage;
use careerguide_types::config::AdvisorConfig;
use careerguide_types::llm::{CompletionRequest, FinishReason, LlmError, Usage};
use tracing::info;

use crate::advisor::prompt;
use crate::advisor::provider::CompletionProvider;

/// A generated advisor reply plus provider metadata for instrumentation.
#[derive(Debug, Clone)]
pub struct AdvisorReply {
    pub text: String,
    pub response_id: String,
    pub finish_reason: FinishReason,
    pub usage: Usage,
}

/// Calls the completion provider with the counselor preamble and the
/// session's conversation history.
pub struct AdvisorGateway<P: CompletionProvider> {
    provider: P,
    settings: AdvisorConfig,
}

impl<P: CompletionProvider> AdvisorGateway<P> {
    pub fn new(provider: P, settings: AdvisorConfig) -> Self {
        Self { provider, settings }
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// The underlying provider's name.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Generate a reply to `user_message` given the prior session history.
    ///
    /// `history` must be in ascending conversation order.
    pub async fn generate_reply(
        &self,
        history: &[ChatMessage],
        user_message: &str,
    ) -> Result<AdvisorReply, LlmError> {
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            system: Some(prompt::ADVISOR_PREAMBLE.to_string()),
            history: prompt::conversation_turns(history),
            message: user_message.to_string(),
            max_tokens: self.settings.max_tokens,
            temperature: Some(self.settings.temperature),
        };

        let response = self.provider.complete(&request).await?;

        info!(
            provider = self.provider.name(),
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            finish_reason = %response.finish_reason,
            "Advisor reply generated"
        );

        Ok(AdvisorReply {
            text: response.content,
            response_id: response.id,
            finish_reason: response.finish_reason,
            usage: response.usage,
        })
    }
}
