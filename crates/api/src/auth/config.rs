use anyhow::{bail, Context, Result};
use axum::http::HeaderValue;
use std::env;
use std::fmt;

/// HS256 keys shorter than this are rejected at startup.
pub const MIN_SECRET_LEN: usize = 32;

/// Upper bound for `SESSION_TOKEN_TTL_DAYS`.
pub const MAX_SESSION_TTL_DAYS: u64 = 3650;

#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Older secrets still accepted when verifying tokens.
    pub jwt_previous_secrets: Vec<String>,
    pub session_token_ttl_days: u64,
    pub cookie_domain: Option<String>,
    pub cookie_secure: bool,
}

impl AuthConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let Some(jwt_secret) = lookup("JWT_SECRET") else {
            bail!("JWT_SECRET must be set");
        };
        if jwt_secret.len() < MIN_SECRET_LEN {
            bail!("JWT_SECRET must be at least {MIN_SECRET_LEN} bytes");
        }

        let jwt_previous_secrets = lookup("JWT_PREVIOUS_SECRETS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let session_token_ttl_days = match lookup("SESSION_TOKEN_TTL_DAYS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid SESSION_TOKEN_TTL_DAYS: {raw}"))?,
            None => 365,
        };
        if !(1..=MAX_SESSION_TTL_DAYS).contains(&session_token_ttl_days) {
            bail!("SESSION_TOKEN_TTL_DAYS must be between 1 and {MAX_SESSION_TTL_DAYS}");
        }

        let cookie_domain = lookup("COOKIE_DOMAIN")
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        if let Some(domain) = &cookie_domain {
            validate_cookie_domain(domain)?;
        }

        Ok(Self {
            jwt_secret,
            jwt_previous_secrets,
            session_token_ttl_days,
            cookie_domain,
            cookie_secure: lookup("COOKIE_SECURE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
        })
    }

    pub fn session_max_age_secs(&self) -> u64 {
        self.session_token_ttl_days.saturating_mul(24 * 60 * 60)
    }
}

/// The domain ends up inside a `Set-Cookie` header, so it must be a valid
/// header value and must not start a new cookie attribute.
fn validate_cookie_domain(domain: &str) -> Result<()> {
    if domain.contains(';') || domain.contains(char::is_whitespace) {
        bail!("COOKIE_DOMAIN must not contain ';' or whitespace: {domain:?}");
    }
    HeaderValue::from_str(domain)
        .with_context(|| format!("COOKIE_DOMAIN is not a valid header value: {domain:?}"))?;
    Ok(())
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_previous_secrets", &self.jwt_previous_secrets.len())
            .field("session_token_ttl_days", &self.session_token_ttl_days)
            .field("cookie_domain", &self.cookie_domain)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}
