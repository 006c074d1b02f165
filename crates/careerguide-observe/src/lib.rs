//! Observability for CareerGuide.
//!
//! Tracing subscriber setup (structured logging, optional OpenTelemetry
//! export) and GenAI semantic-convention attribute constants for LLM call
//! instrumentation.

pub mod genai_attrs;
pub mod tracing_setup;
