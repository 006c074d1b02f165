//! User types for CareerGuide.
//!
//! Users are materialized from the external identity provider; `id` is the
//! provider's opaque subject string, never an internally generated value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Profile data used to materialize or refresh a user row.
///
/// Built from verified identity claims; when the provider supplies no
/// name or email the placeholders mirror what the rest of the product
/// expects (`"User"`, derived address).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl UserProfile {
    /// Placeholder display name for providers that omit one.
    pub const DEFAULT_NAME: &'static str = "User";

    pub fn new(id: String, name: Option<String>, email: Option<String>) -> Self {
        let name = match name {
            Some(n) if !n.trim().is_empty() => n,
            _ => Self::DEFAULT_NAME.to_string(),
        };
        let email = match email {
            Some(e) if !e.trim().is_empty() => e,
            _ => format!("{id}@users.local"),
        };
        Self { id, name, email }
    }
}
