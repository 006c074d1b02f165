//! Development identity token minting command.
//!
//! Signs a token with the same `CAREERGUIDE_AUTH_SECRET` the server
//! verifies against, standing in for the external auth provider during
//! local development. Production tokens always come from the provider.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use console::style;

use careerguide_infra::identity::mint_token;
use careerguide_infra::secret::AUTH_SECRET_VAR;
use careerguide_infra::secret::env::EnvSecretProvider;
use careerguide_types::identity::IdentityClaims;

/// Mint a signed identity token for local development.
pub fn mint(
    user: &str,
    name: Option<&str>,
    email: Option<&str>,
    ttl_mins: i64,
    json: bool,
) -> Result<()> {
    let secret = EnvSecretProvider::new()
        .get(AUTH_SECRET_VAR)
        .with_context(|| format!("{AUTH_SECRET_VAR} must be set"))?;

    let expires_at = Utc::now() + Duration::minutes(ttl_mins.max(1));
    let claims = IdentityClaims {
        sub: user.to_string(),
        name: name.map(str::to_string),
        email: email.map(str::to_string),
        exp: expires_at.timestamp(),
    };

    let token = mint_token(&claims, &secret)?;

    if json {
        let out = serde_json::json!({
            "token": token,
            "sub": claims.sub,
            "expires_at": expires_at.to_rfc3339(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("  {} Token minted for {}", style("✓").green().bold(), style(user).bold());
    println!("  Expires: {}", style(expires_at.to_rfc3339()).dim());
    println!();
    println!("{token}");
    println!();

    Ok(())
}
