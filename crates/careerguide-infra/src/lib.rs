//! Infrastructure layer for CareerGuide.
//!
//! Contains implementations of the ports defined in `careerguide-core`:
//! SQLite storage, the Cohere completion provider, identity token
//! verification, and environment-backed secrets and configuration.

pub mod config;
pub mod identity;
pub mod llm;
pub mod secret;
pub mod sqlite;
