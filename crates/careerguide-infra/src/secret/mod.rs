//! Secret loading.
//!
//! Secrets come from the environment only and are never persisted. Both
//! are mandatory: the server refuses to start without them.

pub mod env;

/// Environment variable holding the Cohere API key.
pub const COHERE_API_KEY_VAR: &str = "COHERE_API_KEY";

/// Environment variable holding the shared secret for identity tokens.
pub const AUTH_SECRET_VAR: &str = "CAREERGUIDE_AUTH_SECRET";
