//! Request extractors: identity token auth and list query parameters.

pub mod auth;
pub mod query;
