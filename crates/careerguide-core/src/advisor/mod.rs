//! Career advisor gateway for CareerGuide.
//!
//! Defines the `CompletionProvider` port, the fixed counselor preamble,
//! and the `AdvisorGateway` that shapes a session's history into
//! completion requests.

pub mod gateway;
pub mod prompt;
pub mod provider;
