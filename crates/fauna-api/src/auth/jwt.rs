//! Bearer token verification
//!
//! `IdentityProvider` is the seam between the HTTP layer and whatever issues tokens. The
//! shipped provider verifies HS256 JWTs signed with `JWT_SECRET` and takes the owner id
//! from the `sub` claim.

use crate::auth::models::{JwtClaims, OwnerIdentity};
use async_trait::async_trait;
use chrono::Utc;
use fauna_core::AppError;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// Turns a bearer token into the identity of the caller
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn authenticate(&self, token: &str) -> Result<OwnerIdentity, AppError>;
}

/// HS256 JWT verification with a shared secret
pub struct JwtIdentityProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityProvider {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign a token for `owner_id` valid for `ttl_seconds`
    pub fn issue_token(&self, owner_id: &str, ttl_seconds: i64) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = JwtClaims {
            sub: owner_id.to_string(),
            exp: now + ttl_seconds,
            iat: now,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    fn verify(&self, token: &str) -> Result<JwtClaims, AppError> {
        decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let message = match e.kind() {
                    ErrorKind::ExpiredSignature => "Token has expired",
                    ErrorKind::InvalidSignature => "Token signature is invalid",
                    ErrorKind::MissingRequiredClaim(_) => "Token is missing required claims",
                    _ => "Token is invalid",
                };
                AppError::Unauthorized(message.to_string())
            })
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn authenticate(&self, token: &str) -> Result<OwnerIdentity, AppError> {
        let claims = self.verify(token)?;

        let owner_id = claims.sub.trim();
        if owner_id.is_empty() {
            return Err(AppError::Unauthorized("Token subject is empty".to_string()));
        }

        Ok(OwnerIdentity {
            owner_id: owner_id.to_string(),
        })
    }
}
