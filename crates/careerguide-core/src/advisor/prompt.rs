//! Prompt assembly for the career advisor.
//!
//! The preamble frames every completion; stored session messages become
//! the provider's conversation turns unchanged and in order.

use careerguide_types::chat::ChatMessage;
use careerguide_types::llm::Message;

/// System preamble framing every advisor completion.
pub const ADVISOR_PREAMBLE: &str = "You are CareerGuide, an experienced career counselor. \
You help people explore career paths, plan transitions, improve resumes, and prepare for \
interviews. Ground your advice in what the user has already shared in this conversation, \
ask one clarifying question when their goal is ambiguous, and keep answers practical, \
specific, and encouraging. If a question falls outside career guidance, say so briefly \
and steer the conversation back to the user's professional goals.";

/// Convert stored session messages into provider conversation turns.
///
/// Callers pass messages already sorted ascending; order is preserved.
pub fn conversation_turns(messages: &[ChatMessage]) -> Vec<Message> {
    messages
        .iter()
        .map(|m| Message {
            role: m.role,
            content: m.content.clone(),
        })
        .collect()
}
