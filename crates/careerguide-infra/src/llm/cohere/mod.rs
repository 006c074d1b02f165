//! Cohere LLM provider implementation.
//!
//! This module provides the [`CohereProvider`] which implements the
//! [`CompletionProvider`](careerguide_core::advisor::provider::CompletionProvider)
//! trait for the Cohere Chat API.

pub mod client;
pub mod types;

pub use client::CohereProvider;
