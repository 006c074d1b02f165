//! Identity token verification.
//!
//! CareerGuide does not issue credentials itself. Tokens arrive from the
//! external auth provider as `base64url(claims JSON) + "." + hex(signature)`
//! where the signature is HMAC-SHA256 over the encoded claims segment,
//! keyed with the shared `CAREERGUIDE_AUTH_SECRET`.
//!
//! Signature verification is constant-time (via the `hmac` crate's
//! `verify_slice`) and happens before the claims are decoded.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use careerguide_types::error::IdentityError;
use careerguide_types::identity::IdentityClaims;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

/// Verifies externally issued identity tokens against the shared secret.
///
/// The secret is wrapped in [`SecretString`] and only exposed while keying
/// the MAC. It never appears in Debug output or logs.
pub struct TokenVerifier {
    secret: SecretString,
}

impl TokenVerifier {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Verify a token and return its claims.
    ///
    /// Order of checks: shape, signature, claims decoding, expiry. An
    /// expired token with a valid signature yields [`IdentityError::Expired`];
    /// everything signature-related collapses to
    /// [`IdentityError::InvalidSignature`] so callers cannot distinguish
    /// why verification failed.
    pub fn verify(&self, token: &str) -> Result<IdentityClaims, IdentityError> {
        let (encoded_claims, signature_hex) =
            token.split_once('.').ok_or(IdentityError::Malformed)?;

        let expected = hex_decode(signature_hex).map_err(|_| IdentityError::InvalidSignature)?;

        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|_| IdentityError::InvalidSignature)?;
        mac.update(encoded_claims.as_bytes());
        mac.verify_slice(&expected)
            .map_err(|_| IdentityError::InvalidSignature)?;

        let claims_json = URL_SAFE_NO_PAD
            .decode(encoded_claims)
            .map_err(|_| IdentityError::Malformed)?;
        let claims: IdentityClaims =
            serde_json::from_slice(&claims_json).map_err(|_| IdentityError::Malformed)?;

        if claims.is_expired(Utc::now()) {
            return Err(IdentityError::Expired);
        }

        Ok(claims)
    }
}

/// Sign claims into a wire-format token.
///
/// Produces exactly what the auth provider would issue for these claims.
/// Used by the local development tooling and tests.
pub fn mint_token(claims: &IdentityClaims, secret: &SecretString) -> Result<String, IdentityError> {
    let claims_json = serde_json::to_vec(claims).map_err(|_| IdentityError::Malformed)?;
    let encoded = URL_SAFE_NO_PAD.encode(claims_json);

    let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
        .map_err(|_| IdentityError::InvalidSignature)?;
    mac.update(encoded.as_bytes());
    let signature = hex_encode(&mac.finalize().into_bytes());

    Ok(format!("{encoded}.{signature}"))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Decode a hex string to bytes.
fn hex_decode(hex: &str) -> Result<Vec<u8>, ()> {
    if hex.len() % 2 != 0 {
        return Err(());
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ()))
        .collect()
}

/// Encode bytes to a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
