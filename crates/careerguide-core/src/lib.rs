//! Business logic and repository trait definitions for CareerGuide.
//!
//! This crate defines the "ports" (repository and provider traits) that the
//! infrastructure layer implements, plus the services built on top of them.
//! It depends only on `careerguide-types` -- never on `careerguide-infra`
//! or any database/IO crate.

pub mod advisor;
pub mod chat;
pub mod user;
