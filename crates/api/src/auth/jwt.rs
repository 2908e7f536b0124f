use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::auth::AuthConfig;
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user uuid)
    pub iat: i64,    // Issued at
    pub exp: i64,    // Expiration
}

impl Claims {
    /// Fails when `ttl_days` does not fit a timestamp.
    pub fn new(user_uuid: Uuid, ttl_days: u64) -> Result<Self, AppError> {
        let now = Utc::now();
        let exp = i64::try_from(ttl_days)
            .ok()
            .and_then(Duration::try_days)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::Internal(format!("Session TTL of {ttl_days} days is out of range"))
            })?;

        Ok(Self {
            sub: user_uuid.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        })
    }

    pub fn user_uuid(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Short fingerprint of a signing secret, carried in the token's `kid` header.
pub fn key_id(secret: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(secret.as_bytes()));
    digest[..16].to_string()
}

#[derive(Clone)]
struct VerifyingKey {
    kid: String,
    key: DecodingKey,
}

/// Signs session tokens with the current secret and accepts tokens signed by
/// the current or any previous secret.
#[derive(Clone)]
pub struct JwtService {
    kid: String,
    encoding_key: EncodingKey,
    verifying_keys: Vec<VerifyingKey>,
    ttl_days: u64,
}

impl JwtService {
    pub fn new(config: &AuthConfig) -> Self {
        let verifying_keys = std::iter::once(&config.jwt_secret)
            .chain(config.jwt_previous_secrets.iter())
            .map(|secret| VerifyingKey {
                kid: key_id(secret),
                key: DecodingKey::from_secret(secret.as_bytes()),
            })
            .collect();

        Self {
            kid: key_id(&config.jwt_secret),
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            verifying_keys,
            ttl_days: config.session_token_ttl_days,
        }
    }

    pub fn create_token(&self, user_uuid: Uuid) -> Result<String, AppError> {
        let claims = Claims::new(user_uuid, self.ttl_days)?;
        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some(self.kid.clone());
        encode(&header, &claims, &self.encoding_key).map_err(|e| AppError::Internal(e.to_string()))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let header = decode_header(token)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        let validation = Validation::new(Algorithm::HS256);
        let mut last_error = None;

        // No kid in the header: try every key.
        for candidate in self
            .verifying_keys
            .iter()
            .filter(|k| header.kid.as_deref().is_none_or(|kid| kid == k.kid))
        {
            match decode::<Claims>(token, &candidate.key, &validation) {
                Ok(data) => return Ok(data.claims),
                Err(e) => last_error = Some(e),
            }
        }

        Err(AppError::Unauthorized(match last_error {
            Some(e) => format!("Invalid token: {}", e),
            None => "Invalid token: unknown signing key".to_string(),
        }))
    }
}
