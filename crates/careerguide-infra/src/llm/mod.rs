//! LLM provider implementations.
//!
//! Contains concrete implementations of the [`CompletionProvider`] trait
//! defined in `careerguide-core`. Cohere is the only wired provider; the
//! trait boundary keeps the advisor gateway independent of it.
//!
//! [`CompletionProvider`]: careerguide_core::advisor::provider::CompletionProvider

pub mod cohere;
