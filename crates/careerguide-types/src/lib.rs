//! Shared domain types for CareerGuide.
//!
//! This crate contains the core domain types used across the CareerGuide
//! platform: User, ChatSession, ChatMessage, pagination, LLM shapes, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod identity;
pub mod llm;
pub mod page;
pub mod user;
