//! Identity claims issued by the external identity provider.
//!
//! CareerGuide never authenticates users itself. The provider issues a
//! signed token whose payload deserializes into [`IdentityClaims`];
//! signature verification lives in careerguide-infra.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserProfile;

/// Verified claims carried by an identity token.
///
/// `sub` is the provider's opaque subject id and becomes the user's
/// primary key. `exp` is a unix timestamp in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: i64,
}

impl IdentityClaims {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }

    /// Profile used to materialize the user row for these claims.
    pub fn profile(&self) -> UserProfile {
        UserProfile::new(self.sub.clone(), self.name.clone(), self.email.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn claims(exp: i64) -> IdentityClaims {
        IdentityClaims {
            sub: "user_2abc".to_string(),
            name: Some("Alice Johnson".to_string()),
            email: Some("alice@example.com".to_string()),
            exp,
        }
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert!(claims(1_699_999_999).is_expired(now));
        assert!(claims(1_700_000_000).is_expired(now));
        assert!(!claims(1_700_000_001).is_expired(now));
    }

    #[test]
    fn test_profile_from_claims() {
        let profile = claims(i64::MAX).profile();
        assert_eq!(profile.id, "user_2abc");
        assert_eq!(profile.name, "Alice Johnson");
    }

    #[test]
    fn test_claims_deserialize_without_optional_fields() {
        let json = r#"{"sub":"user_2abc","exp":1700000000}"#;
        let parsed: IdentityClaims = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.sub, "user_2abc");
        assert!(parsed.name.is_none());
        assert!(parsed.email.is_none());
    }
}
